// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed operations per collection.
//!
//! Provides high-level operations for:
//! - Users (profile storage, keyed by owner)
//! - Exercises (the catalog)
//! - Tracked exercises, repetitions and weights (the progress ledger)
//! - Workouts and splits (aggregates of embedded snapshots)

use crate::db::{collections, Db, FieldFilter};
use crate::error::AppError;
use crate::models::{
    Exercise, Repetition, Split, TrackedExercise, User, Visibility, Weight, Workout,
};
use futures_util::future::try_join_all;

impl Db {
    // ─── User Operations ─────────────────────────────────────────

    pub async fn get_user(&self, owner_id: &str) -> Result<Option<User>, AppError> {
        self.get(collections::USERS, owner_id).await
    }

    /// Create a profile; `false` if one already exists for the owner.
    pub async fn insert_user(&self, user: &User) -> Result<bool, AppError> {
        self.insert(collections::USERS, &user.owner_id, user).await
    }

    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.put(collections::USERS, &user.owner_id, user).await
    }

    // ─── Exercise Catalog Operations ─────────────────────────────

    pub async fn get_exercise(&self, id: &str) -> Result<Option<Exercise>, AppError> {
        self.get(collections::EXERCISES, id).await
    }

    pub async fn get_exercises_for_owner(&self, owner_id: &str) -> Result<Vec<Exercise>, AppError> {
        self.list(
            collections::EXERCISES,
            vec![FieldFilter::eq("owner_id", owner_id)],
            Some("created_at"),
        )
        .await
    }

    pub async fn set_exercise(&self, exercise: &Exercise) -> Result<(), AppError> {
        self.put(collections::EXERCISES, &exercise.id, exercise).await
    }

    pub async fn delete_exercise(&self, id: &str) -> Result<(), AppError> {
        self.delete(collections::EXERCISES, id).await
    }

    // ─── Tracked Exercise Operations ─────────────────────────────

    pub async fn get_tracked_exercise(
        &self,
        id: &str,
    ) -> Result<Option<TrackedExercise>, AppError> {
        self.get(collections::TRACKED_EXERCISES, id).await
    }

    pub async fn get_tracked_exercises_for_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<TrackedExercise>, AppError> {
        self.list(
            collections::TRACKED_EXERCISES,
            vec![FieldFilter::eq("owner_id", owner_id)],
            Some("created_at"),
        )
        .await
    }

    /// Create-only insert keyed on `(owner_id, name)`.
    pub async fn insert_tracked_exercise(
        &self,
        tracked: &TrackedExercise,
    ) -> Result<bool, AppError> {
        self.insert(collections::TRACKED_EXERCISES, &tracked.id, tracked)
            .await
    }

    pub async fn delete_tracked_exercise(&self, id: &str) -> Result<(), AppError> {
        self.delete(collections::TRACKED_EXERCISES, id).await
    }

    // ─── Repetition Operations ───────────────────────────────────

    pub async fn get_repetition(&self, id: &str) -> Result<Option<Repetition>, AppError> {
        self.get(collections::REPETITIONS, id).await
    }

    /// Repetition buckets of a tracked exercise, in storage order.
    pub async fn get_repetitions_for_tracked(
        &self,
        tracked_exercise_id: &str,
    ) -> Result<Vec<Repetition>, AppError> {
        self.list(
            collections::REPETITIONS,
            vec![FieldFilter::eq("tracked_exercise_id", tracked_exercise_id)],
            None,
        )
        .await
    }

    /// Create-only insert keyed on `(tracked_exercise_id, repetitions)`.
    pub async fn insert_repetition(&self, repetition: &Repetition) -> Result<bool, AppError> {
        self.insert(collections::REPETITIONS, &repetition.id, repetition)
            .await
    }

    pub async fn delete_repetition(&self, id: &str) -> Result<(), AppError> {
        self.delete(collections::REPETITIONS, id).await
    }

    // ─── Weight Operations ───────────────────────────────────────

    pub async fn get_weight(&self, id: &str) -> Result<Option<Weight>, AppError> {
        self.get(collections::WEIGHTS, id).await
    }

    /// Weight entries of a repetition bucket, in the order they were written.
    pub async fn get_weights_for_repetition(
        &self,
        repetition_id: &str,
    ) -> Result<Vec<Weight>, AppError> {
        self.list(
            collections::WEIGHTS,
            vec![FieldFilter::eq("repetition_id", repetition_id)],
            Some("created_at"),
        )
        .await
    }

    pub async fn set_weight(&self, weight: &Weight) -> Result<(), AppError> {
        self.put(collections::WEIGHTS, &weight.id, weight).await
    }

    pub async fn delete_weight(&self, id: &str) -> Result<(), AppError> {
        self.delete(collections::WEIGHTS, id).await
    }

    /// Delete every weight entry in the given repetition buckets.
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_weights_for_repetitions(
        &self,
        repetition_ids: &[String],
    ) -> Result<usize, AppError> {
        let per_bucket = try_join_all(
            repetition_ids
                .iter()
                .map(|id| self.get_weights_for_repetition(id)),
        )
        .await?;

        let ids: Vec<String> = per_bucket.into_iter().flatten().map(|w| w.id).collect();
        self.delete_many(collections::WEIGHTS, &ids).await?;
        Ok(ids.len())
    }

    // ─── Workout Operations ──────────────────────────────────────

    pub async fn get_workout(&self, id: &str) -> Result<Option<Workout>, AppError> {
        self.get(collections::WORKOUTS, id).await
    }

    pub async fn get_workouts_for_owner(&self, owner_id: &str) -> Result<Vec<Workout>, AppError> {
        self.list(
            collections::WORKOUTS,
            vec![FieldFilter::eq("owner_id", owner_id)],
            Some("created_at"),
        )
        .await
    }

    pub async fn set_workout(&self, workout: &Workout) -> Result<(), AppError> {
        self.put(collections::WORKOUTS, &workout.id, workout).await
    }

    pub async fn delete_workout(&self, id: &str) -> Result<(), AppError> {
        self.delete(collections::WORKOUTS, id).await
    }

    // ─── Split Operations ────────────────────────────────────────

    pub async fn get_split(&self, id: &str) -> Result<Option<Split>, AppError> {
        self.get(collections::SPLITS, id).await
    }

    pub async fn get_splits_for_owner(&self, owner_id: &str) -> Result<Vec<Split>, AppError> {
        self.list(
            collections::SPLITS,
            vec![FieldFilter::eq("owner_id", owner_id)],
            Some("created_at"),
        )
        .await
    }

    pub async fn get_public_splits(&self) -> Result<Vec<Split>, AppError> {
        self.list(
            collections::SPLITS,
            vec![FieldFilter::eq("visibility", Visibility::Public.as_str())],
            Some("created_at"),
        )
        .await
    }

    pub async fn set_split(&self, split: &Split) -> Result<(), AppError> {
        self.put(collections::SPLITS, &split.id, split).await
    }

    pub async fn delete_split(&self, id: &str) -> Result<(), AppError> {
        self.delete(collections::SPLITS, id).await
    }

    // ─── User Data Deletion ──────────────────────────────────────

    /// Delete ALL data for an owner.
    ///
    /// Every collection except `users` carries an `owner_id` field; the
    /// profile itself is keyed by owner.
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_owner_data(&self, owner_id: &str) -> Result<usize, AppError> {
        const OWNED: [&str; 6] = [
            collections::WEIGHTS,
            collections::REPETITIONS,
            collections::TRACKED_EXERCISES,
            collections::EXERCISES,
            collections::WORKOUTS,
            collections::SPLITS,
        ];

        let counts = try_join_all(OWNED.into_iter().map(|collection| async move {
            let docs: Vec<serde_json::Value> = self
                .list(
                    collection,
                    vec![FieldFilter::eq("owner_id", owner_id)],
                    None,
                )
                .await?;

            let ids: Vec<String> = docs
                .iter()
                .filter_map(|doc| doc.get("id").and_then(|id| id.as_str()).map(String::from))
                .collect();

            self.delete_many(collection, &ids).await?;
            tracing::debug!(owner_id, collection, count = ids.len(), "Deleted owner documents");
            Ok::<_, AppError>(ids.len())
        }))
        .await?;

        let mut deleted_count: usize = counts.into_iter().sum();

        if self.get_user(owner_id).await?.is_some() {
            self.delete(collections::USERS, owner_id).await?;
            deleted_count += 1;
        }

        tracing::info!(owner_id, deleted_count, "Owner data deletion complete");

        Ok(deleted_count)
    }
}
