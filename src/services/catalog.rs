// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalog service.
//!
//! Duplicate names are allowed here, unlike tracked exercises.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{Exercise, ExercisePatch, ExerciseSnapshot, NewExercise};
use crate::services::new_document_id;
use crate::time_utils::now_rfc3339;
use validator::Validate;

#[derive(Clone)]
pub struct ExerciseCatalog {
    db: Db,
}

impl ExerciseCatalog {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Exercise>> {
        tracing::debug!(owner_id, "Listing catalog exercises");
        self.db.get_exercises_for_owner(owner_id).await
    }

    pub async fn create(&self, owner_id: &str, fields: NewExercise) -> Result<Exercise> {
        fields.validate()?;

        let exercise = Exercise::new(new_document_id(), owner_id, fields, now_rfc3339());
        self.db.set_exercise(&exercise).await?;

        tracing::info!(
            owner_id,
            exercise_id = %exercise.id,
            name = %exercise.name,
            "Exercise created"
        );
        Ok(exercise)
    }

    pub async fn update(&self, owner_id: &str, id: &str, patch: ExercisePatch) -> Result<Exercise> {
        patch.validate()?;

        let mut exercise = self.get_owned(owner_id, id).await?;
        exercise.apply(patch);
        self.db.set_exercise(&exercise).await?;

        tracing::info!(owner_id, exercise_id = id, "Exercise updated");
        Ok(exercise)
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<()> {
        self.get_owned(owner_id, id).await?;
        self.db.delete_exercise(id).await?;

        tracing::info!(owner_id, exercise_id = id, "Exercise deleted");
        Ok(())
    }

    /// Snapshot the named catalog entries, in the order given.
    ///
    /// Every ID must name one of the owner's exercises.
    pub async fn snapshots(&self, owner_id: &str, ids: &[String]) -> Result<Vec<ExerciseSnapshot>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let catalog = self.db.get_exercises_for_owner(owner_id).await?;
        ids.iter()
            .map(|id| {
                catalog
                    .iter()
                    .find(|exercise| &exercise.id == id)
                    .map(ExerciseSnapshot::from)
                    .ok_or_else(|| AppError::Validation(format!("Unknown exercise id: {}", id)))
            })
            .collect()
    }

    async fn get_owned(&self, owner_id: &str, id: &str) -> Result<Exercise> {
        self.db
            .get_exercise(id)
            .await?
            .filter(|exercise| exercise.owner_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Exercise {} not found", id)))
    }
}
