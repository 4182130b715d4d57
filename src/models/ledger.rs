// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Progress ledger: tracked exercises, repetition buckets and weight entries.
//!
//! The three levels form a hierarchy (TrackedExercise → Repetition → Weight)
//! with no database-level foreign keys. Tracked exercises and repetition
//! buckets are unique per key; their document IDs are derived from that key
//! so a create-only insert doubles as the uniqueness check.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// An exercise selected for longitudinal progress tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrackedExercise {
    /// Document ID, see [`TrackedExercise::document_id`]
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub created_at: String,
}

impl TrackedExercise {
    /// Document ID for the `(owner_id, name)` uniqueness key.
    ///
    /// Both parts are base64url encoded, so the ID can be used as a URL path
    /// segment unescaped and never contains `/` or the `:` separator.
    pub fn document_id(owner_id: &str, name: &str) -> String {
        format!(
            "te:{}:{}",
            URL_SAFE_NO_PAD.encode(owner_id),
            URL_SAFE_NO_PAD.encode(name)
        )
    }

    pub fn new(owner_id: &str, name: &str, created_at: String) -> Self {
        Self {
            id: Self::document_id(owner_id, name),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            created_at,
        }
    }
}

/// A repetition-count bucket grouping weight entries of one tracked exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Repetition {
    /// Document ID, see [`Repetition::document_id`]
    pub id: String,
    /// Owner of the parent tracked exercise (denormalized for access checks)
    pub owner_id: String,
    pub tracked_exercise_id: String,
    /// Repetition count
    pub repetitions: u32,
    pub created_at: String,
}

impl Repetition {
    /// Document ID for the `(tracked_exercise_id, repetitions)` uniqueness key.
    pub fn document_id(tracked_exercise_id: &str, repetitions: u32) -> String {
        format!("{}:r{}", tracked_exercise_id, repetitions)
    }

    pub fn new(tracked: &TrackedExercise, repetitions: u32, created_at: String) -> Self {
        Self {
            id: Self::document_id(&tracked.id, repetitions),
            owner_id: tracked.owner_id.clone(),
            tracked_exercise_id: tracked.id.clone(),
            repetitions,
            created_at,
        }
    }
}

/// A dated weight-lifted entry. Append-only; never de-duplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Weight {
    pub id: String,
    pub owner_id: String,
    pub repetition_id: String,
    /// Weight lifted
    pub weight: f64,
    /// Caller-formatted date, typically `MM/DD/YYYY`
    pub date: String,
    /// Storage timestamp; weights are listed in this order
    pub created_at: String,
}

/// Request body for tracking an exercise.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTrackedExercise {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Optional owner assertion; must match the session when present
    #[serde(default, alias = "googleId")]
    pub owner_id: Option<String>,
}

/// Request body for adding a repetition bucket.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewRepetition {
    #[validate(length(min = 1))]
    pub tracked_exercise_id: String,
    #[validate(range(min = 1))]
    pub repetitions: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RepetitionPatch {
    #[validate(range(min = 1))]
    pub repetitions: Option<u32>,
}

/// Request body for appending a weight entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewWeight {
    #[validate(length(min = 1))]
    pub repetition_id: String,
    #[validate(range(min = 0.0))]
    pub weight: f64,
    #[validate(length(min = 1, max = 32))]
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct WeightPatch {
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    #[validate(length(min = 1, max = 32))]
    pub date: Option<String>,
}

/// Request body for the composite log operation.
///
/// Accepts the field names the web client sends (`Repetitions`, `Weight`,
/// `googleId`) as aliases.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogWeight {
    #[serde(default, alias = "googleId")]
    pub owner_id: Option<String>,
    #[serde(alias = "Repetitions")]
    #[validate(range(min = 1))]
    pub repetitions: u32,
    #[serde(alias = "Weight")]
    #[validate(range(min = 0.0))]
    pub weight: f64,
    #[validate(length(min = 1, max = 32))]
    pub date: String,
}
