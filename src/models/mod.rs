// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod exercise;
pub mod ledger;
pub mod split;
pub mod user;
pub mod workout;

pub use exercise::{Exercise, ExercisePatch, ExerciseSnapshot, NewExercise};
pub use ledger::{
    LogWeight, NewRepetition, NewTrackedExercise, NewWeight, Repetition, RepetitionPatch,
    TrackedExercise, Weight, WeightPatch,
};
pub use split::{NewSplit, Split, SplitPatch, Visibility, VisibilityAction};
pub use user::{ProfileFields, User};
pub use workout::{NewWorkout, Workout, WorkoutPatch, WorkoutSnapshot};
