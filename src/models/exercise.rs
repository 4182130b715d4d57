// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise catalog entries and the snapshots embedded in workouts.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A user-owned exercise definition in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    /// Document ID
    pub id: String,
    pub owner_id: String,
    /// Workout this exercise was created from, if any (informational only)
    #[serde(default)]
    pub workout_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    /// HTML-bearing description
    #[serde(default)]
    pub description: String,
    pub created_at: String,
}

/// Copy of an exercise embedded in a workout.
///
/// Carries no id: once embedded it has no tie back to the catalog, and
/// edits on either side never propagate to the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseSnapshot {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub notes: String,
}

impl From<&Exercise> for ExerciseSnapshot {
    fn from(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name.clone(),
            description: exercise.description.clone(),
            notes: exercise.notes.clone(),
        }
    }
}

/// Request body for adding an exercise to the catalog.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewExercise {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub notes: String,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub description: String,
    #[serde(default)]
    pub workout_id: Option<String>,
}

/// Partial update for a catalog exercise.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExercisePatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 10000))]
    pub notes: Option<String>,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    pub workout_id: Option<String>,
}

impl Exercise {
    pub fn new(id: String, owner_id: &str, fields: NewExercise, created_at: String) -> Self {
        Self {
            id,
            owner_id: owner_id.to_string(),
            workout_id: fields.workout_id,
            name: fields.name,
            notes: fields.notes,
            description: fields.description,
            created_at,
        }
    }

    pub fn apply(&mut self, patch: ExercisePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(workout_id) = patch.workout_id {
            self.workout_id = Some(workout_id);
        }
    }
}
