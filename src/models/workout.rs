// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout aggregate: a named, ordered list of embedded exercise snapshots.

use crate::models::ExerciseSnapshot;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Stored workout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    pub id: String,
    pub owner_id: String,
    /// Split this workout was built for, if any
    #[serde(default)]
    pub split_id: Option<String>,
    pub name: String,
    /// Exercise copies taken when they were added
    pub exercises: Vec<ExerciseSnapshot>,
    pub created_at: String,
}

/// Copy of a workout embedded in a split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutSnapshot {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<ExerciseSnapshot>,
}

impl From<&Workout> for WorkoutSnapshot {
    fn from(workout: &Workout) -> Self {
        Self {
            name: workout.name.clone(),
            exercises: workout.exercises.clone(),
        }
    }
}

/// Request body for creating a workout.
///
/// `exercises` are taken as-is; `exercise_ids` name catalog entries that are
/// snapshotted at write time and appended after them.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewWorkout {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub split_id: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<ExerciseSnapshot>,
    #[serde(default)]
    pub exercise_ids: Vec<String>,
}

/// Partial update for a workout. `exercises`, when present, replaces the
/// whole embedded list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct WorkoutPatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub split_id: Option<String>,
    #[validate(nested)]
    pub exercises: Option<Vec<ExerciseSnapshot>>,
}

impl Workout {
    pub fn apply(&mut self, patch: WorkoutPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(split_id) = patch.split_id {
            self.split_id = Some(split_id);
        }
        if let Some(exercises) = patch.exercises {
            self.exercises = exercises;
        }
    }
}
