// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress ledger service.
//!
//! Handles the three-level ledger:
//! 1. Tracked exercises, unique per `(owner, name)`
//! 2. Repetition buckets, unique per `(tracked exercise, count)`
//! 3. Weight entries, append-only
//!
//! Uniqueness comes from deterministic document IDs plus create-only
//! inserts, so concurrent duplicate adds resolve to a single row.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{
    LogWeight, NewWeight, Repetition, RepetitionPatch, TrackedExercise, Weight, WeightPatch,
};
use crate::services::{new_document_id, FindOrCreate};
use crate::time_utils::now_rfc3339;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidateLength};

/// Outcome of the composite log operation.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeightLog {
    pub tracked_exercise: TrackedExercise,
    pub repetition: Repetition,
    pub weight: Weight,
    pub tracked_exercise_created: bool,
    pub repetition_created: bool,
}

#[derive(Clone)]
pub struct LedgerService {
    db: Db,
}

impl LedgerService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    // ─── Tracked Exercises ───────────────────────────────────────

    pub async fn list_tracked(&self, owner_id: &str) -> Result<Vec<TrackedExercise>> {
        tracing::debug!(owner_id, "Listing tracked exercises");
        self.db.get_tracked_exercises_for_owner(owner_id).await
    }

    /// Start tracking `name` for `owner_id`, or return the existing entry.
    ///
    /// Applies the same name rules as a tracked exercise request body, so the
    /// composite log cannot create names the direct endpoint would reject.
    pub async fn track(
        &self,
        owner_id: &str,
        name: &str,
    ) -> Result<FindOrCreate<TrackedExercise>> {
        let name = name.trim();
        if !name.validate_length(Some(1), Some(100), None) {
            return Err(AppError::Validation(
                "name: length must be between 1 and 100 characters".to_string(),
            ));
        }

        let tracked = TrackedExercise::new(owner_id, name, now_rfc3339());
        if self.db.insert_tracked_exercise(&tracked).await? {
            tracing::info!(owner_id, tracked_exercise_id = %tracked.id, "Tracked exercise created");
            return Ok(FindOrCreate::Created(tracked));
        }

        // Lost the insert: the row exists, return it as stored
        let existing = self
            .db
            .get_tracked_exercise(&tracked.id)
            .await?
            .ok_or_else(|| {
                AppError::Database(format!(
                    "Tracked exercise {} vanished after conflict",
                    tracked.id
                ))
            })?;
        tracing::debug!(
            owner_id,
            tracked_exercise_id = %existing.id,
            "Tracked exercise already exists"
        );
        Ok(FindOrCreate::Existing(existing))
    }

    /// Stop tracking an exercise, removing its buckets and weights.
    ///
    /// Children are deleted before the parent, so a failure part-way leaves
    /// the tracked exercise in place for a retry. Returns the number of
    /// documents deleted.
    pub async fn delete_tracked(&self, owner_id: &str, id: &str) -> Result<usize> {
        let tracked = self.get_tracked(owner_id, id).await?;

        let repetition_ids: Vec<String> = self
            .db
            .get_repetitions_for_tracked(&tracked.id)
            .await?
            .into_iter()
            .map(|rep| rep.id)
            .collect();

        let weights_deleted = self
            .db
            .delete_weights_for_repetitions(&repetition_ids)
            .await?;
        self.db
            .delete_many(crate::db::collections::REPETITIONS, &repetition_ids)
            .await?;
        self.db.delete_tracked_exercise(&tracked.id).await?;

        let deleted = weights_deleted + repetition_ids.len() + 1;
        tracing::info!(owner_id, tracked_exercise_id = id, deleted, "Tracked exercise deleted");
        Ok(deleted)
    }

    pub async fn get_tracked(&self, owner_id: &str, id: &str) -> Result<TrackedExercise> {
        self.db
            .get_tracked_exercise(id)
            .await?
            .filter(|tracked| tracked.owner_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Tracked exercise {} not found", id)))
    }

    // ─── Repetitions ─────────────────────────────────────────────

    /// Repetition buckets sorted by ascending count.
    pub async fn list_repetitions(
        &self,
        owner_id: &str,
        tracked_exercise_id: &str,
    ) -> Result<Vec<Repetition>> {
        let tracked = self.get_tracked(owner_id, tracked_exercise_id).await?;
        let mut repetitions = self.db.get_repetitions_for_tracked(&tracked.id).await?;
        repetitions.sort_by_key(|rep| rep.repetitions);
        Ok(repetitions)
    }

    pub async fn add_repetition(
        &self,
        owner_id: &str,
        tracked_exercise_id: &str,
        repetitions: u32,
    ) -> Result<FindOrCreate<Repetition>> {
        let tracked = self.get_tracked(owner_id, tracked_exercise_id).await?;
        self.bucket_for(&tracked, repetitions).await
    }

    async fn bucket_for(
        &self,
        tracked: &TrackedExercise,
        repetitions: u32,
    ) -> Result<FindOrCreate<Repetition>> {
        if repetitions == 0 {
            return Err(AppError::Validation(
                "repetitions: must be at least 1".to_string(),
            ));
        }

        let repetition = Repetition::new(tracked, repetitions, now_rfc3339());
        if self.db.insert_repetition(&repetition).await? {
            tracing::info!(
                owner_id = %tracked.owner_id,
                repetition_id = %repetition.id,
                repetitions,
                "Repetition bucket created"
            );
            return Ok(FindOrCreate::Created(repetition));
        }

        let existing = self
            .db
            .get_repetition(&repetition.id)
            .await?
            .ok_or_else(|| {
                AppError::Database(format!("Repetition {} vanished after conflict", repetition.id))
            })?;
        Ok(FindOrCreate::Existing(existing))
    }

    /// Change a bucket's repetition count.
    ///
    /// The bucket's document ID encodes its count, so a new count moves it
    /// to a new document and re-parents its weights. Moving onto a count
    /// that already has a bucket is a conflict.
    pub async fn update_repetition(
        &self,
        owner_id: &str,
        id: &str,
        patch: RepetitionPatch,
    ) -> Result<Repetition> {
        patch.validate()?;
        let current = self.get_repetition(owner_id, id).await?;

        let Some(count) = patch.repetitions.filter(|&n| n != current.repetitions) else {
            return Ok(current);
        };

        let moved = Repetition {
            id: Repetition::document_id(&current.tracked_exercise_id, count),
            repetitions: count,
            ..current.clone()
        };
        if !self.db.insert_repetition(&moved).await? {
            return Err(AppError::Conflict(format!(
                "A {}-repetition bucket already exists",
                count
            )));
        }

        let weights = self.db.get_weights_for_repetition(&current.id).await?;
        for mut weight in weights {
            weight.repetition_id = moved.id.clone();
            self.db.set_weight(&weight).await?;
        }
        self.db.delete_repetition(&current.id).await?;

        tracing::info!(owner_id, from = %current.id, to = %moved.id, "Repetition bucket re-keyed");
        Ok(moved)
    }

    /// Delete a bucket and every weight logged in it.
    pub async fn delete_repetition(&self, owner_id: &str, id: &str) -> Result<usize> {
        let repetition = self.get_repetition(owner_id, id).await?;

        let weights_deleted = self
            .db
            .delete_weights_for_repetitions(std::slice::from_ref(&repetition.id))
            .await?;
        self.db.delete_repetition(&repetition.id).await?;

        tracing::info!(owner_id, repetition_id = id, weights_deleted, "Repetition bucket deleted");
        Ok(weights_deleted + 1)
    }

    pub async fn get_repetition(&self, owner_id: &str, id: &str) -> Result<Repetition> {
        self.db
            .get_repetition(id)
            .await?
            .filter(|rep| rep.owner_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Repetition {} not found", id)))
    }

    // ─── Weights ─────────────────────────────────────────────────

    /// Weight entries of a bucket, in the order they were logged.
    pub async fn list_weights(&self, owner_id: &str, repetition_id: &str) -> Result<Vec<Weight>> {
        let repetition = self.get_repetition(owner_id, repetition_id).await?;
        self.db.get_weights_for_repetition(&repetition.id).await
    }

    /// Append a weight entry. Never de-duplicated.
    pub async fn add_weight(&self, owner_id: &str, entry: NewWeight) -> Result<Weight> {
        entry.validate()?;
        let repetition = self.get_repetition(owner_id, &entry.repetition_id).await?;
        self.append_weight(&repetition, entry.weight, entry.date).await
    }

    async fn append_weight(
        &self,
        repetition: &Repetition,
        value: f64,
        date: String,
    ) -> Result<Weight> {
        let weight = Weight {
            id: new_document_id(),
            owner_id: repetition.owner_id.clone(),
            repetition_id: repetition.id.clone(),
            weight: value,
            date,
            created_at: now_rfc3339(),
        };
        self.db.set_weight(&weight).await?;

        tracing::info!(
            owner_id = %weight.owner_id,
            repetition_id = %weight.repetition_id,
            weight = weight.weight,
            "Weight logged"
        );
        Ok(weight)
    }

    pub async fn update_weight(
        &self,
        owner_id: &str,
        id: &str,
        patch: WeightPatch,
    ) -> Result<Weight> {
        patch.validate()?;
        let mut weight = self.get_weight(owner_id, id).await?;

        if let Some(value) = patch.weight {
            weight.weight = value;
        }
        if let Some(date) = patch.date {
            weight.date = date;
        }
        self.db.set_weight(&weight).await?;

        tracing::info!(owner_id, weight_id = id, "Weight updated");
        Ok(weight)
    }

    pub async fn delete_weight(&self, owner_id: &str, id: &str) -> Result<()> {
        let weight = self.get_weight(owner_id, id).await?;
        self.db.delete_weight(&weight.id).await?;

        tracing::info!(owner_id, weight_id = id, "Weight deleted");
        Ok(())
    }

    async fn get_weight(&self, owner_id: &str, id: &str) -> Result<Weight> {
        self.db
            .get_weight(id)
            .await?
            .filter(|weight| weight.owner_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Weight {} not found", id)))
    }

    // ─── Composite Log ───────────────────────────────────────────

    /// Log a weight against an exercise by name and repetition count.
    ///
    /// Finds or creates the tracked exercise, then the repetition bucket,
    /// then appends the weight. A failure stops at that step; parents
    /// created by earlier steps are kept.
    pub async fn log_weight(
        &self,
        owner_id: &str,
        exercise_name: &str,
        entry: LogWeight,
    ) -> Result<WeightLog> {
        entry.validate()?;

        let tracked = self.track(owner_id, exercise_name).await?;
        let tracked_exercise_created = tracked.was_created();
        let tracked_exercise = tracked.into_inner();

        let repetition = self.bucket_for(&tracked_exercise, entry.repetitions).await?;
        let repetition_created = repetition.was_created();
        let repetition = repetition.into_inner();

        let weight = self
            .append_weight(&repetition, entry.weight, entry.date)
            .await?;

        Ok(WeightLog {
            tracked_exercise,
            repetition,
            weight,
            tracked_exercise_created,
            repetition_created,
        })
    }
}
