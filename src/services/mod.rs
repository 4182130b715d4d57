// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.
//!
//! Every operation takes the acting owner ID explicitly; ownership of a
//! document addressed by ID is checked by loading it first, and a document
//! owned by someone else is reported as not found.

pub mod catalog;
pub mod ledger;
pub mod profile;
pub mod progress;
pub mod splits;
pub mod workouts;

pub use catalog::ExerciseCatalog;
pub use ledger::{LedgerService, WeightLog};
pub use profile::{Identity, ProfileService};
pub use progress::{ProgressChart, ProgressPoint, ProgressSeries, ProgressService};
pub use splits::SplitService;
pub use workouts::WorkoutService;

/// Result of an idempotent add.
///
/// `Existing` is not an error: the row the caller asked for is already
/// there and is returned unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum FindOrCreate<T> {
    Created(T),
    Existing(T),
}

impl<T> FindOrCreate<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Created(value) | Self::Existing(value) => value,
        }
    }

    pub fn get(&self) -> &T {
        match self {
            Self::Created(value) | Self::Existing(value) => value,
        }
    }
}

/// Fresh opaque document ID.
pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
