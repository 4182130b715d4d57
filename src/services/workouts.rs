// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout aggregate service.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{NewWorkout, Workout, WorkoutPatch, WorkoutSnapshot};
use crate::services::{new_document_id, ExerciseCatalog};
use crate::time_utils::now_rfc3339;
use validator::Validate;

#[derive(Clone)]
pub struct WorkoutService {
    db: Db,
    catalog: ExerciseCatalog,
}

impl WorkoutService {
    pub fn new(db: Db, catalog: ExerciseCatalog) -> Self {
        Self { db, catalog }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Workout>> {
        tracing::debug!(owner_id, "Listing workouts");
        self.db.get_workouts_for_owner(owner_id).await
    }

    pub async fn get(&self, owner_id: &str, id: &str) -> Result<Workout> {
        self.db
            .get_workout(id)
            .await?
            .filter(|workout| workout.owner_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
    }

    /// Create a workout from supplied snapshots plus snapshots of the
    /// referenced catalog exercises, persisted in one write.
    pub async fn create(&self, owner_id: &str, request: NewWorkout) -> Result<Workout> {
        request.validate()?;

        let mut exercises = request.exercises;
        exercises.extend(
            self.catalog
                .snapshots(owner_id, &request.exercise_ids)
                .await?,
        );

        let workout = Workout {
            id: new_document_id(),
            owner_id: owner_id.to_string(),
            split_id: request.split_id,
            name: request.name,
            exercises,
            created_at: now_rfc3339(),
        };
        self.db.set_workout(&workout).await?;

        tracing::info!(
            owner_id,
            workout_id = %workout.id,
            exercises = workout.exercises.len(),
            "Workout created"
        );
        Ok(workout)
    }

    pub async fn update(&self, owner_id: &str, id: &str, patch: WorkoutPatch) -> Result<Workout> {
        patch.validate()?;

        let mut workout = self.get(owner_id, id).await?;
        workout.apply(patch);
        self.db.set_workout(&workout).await?;

        tracing::info!(owner_id, workout_id = id, "Workout updated");
        Ok(workout)
    }

    /// Delete a workout. Splits keep their own snapshot of it.
    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<()> {
        self.get(owner_id, id).await?;
        self.db.delete_workout(id).await?;

        tracing::info!(owner_id, workout_id = id, "Workout deleted");
        Ok(())
    }

    /// Snapshot the owner's stored workouts, in the order given.
    pub async fn snapshots(&self, owner_id: &str, ids: &[String]) -> Result<Vec<WorkoutSnapshot>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let workouts = self.db.get_workouts_for_owner(owner_id).await?;
        ids.iter()
            .map(|id| {
                workouts
                    .iter()
                    .find(|workout| &workout.id == id)
                    .map(WorkoutSnapshot::from)
                    .ok_or_else(|| AppError::Validation(format!("Unknown workout id: {}", id)))
            })
            .collect()
    }
}
