// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Split aggregate service: CRUD, sharing and cloning.
//!
//! Sharing follows [`Visibility::apply`]: private and public toggle, and a
//! cloned split is `Copied` for good.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{NewSplit, Split, SplitPatch, Visibility, VisibilityAction};
use crate::services::{new_document_id, WorkoutService};
use crate::time_utils::now_rfc3339;
use validator::Validate;

#[derive(Clone)]
pub struct SplitService {
    db: Db,
    workouts: WorkoutService,
}

impl SplitService {
    pub fn new(db: Db, workouts: WorkoutService) -> Self {
        Self { db, workouts }
    }

    /// Splits any user has shared.
    pub async fn list_public(&self) -> Result<Vec<Split>> {
        tracing::debug!("Listing public splits");
        self.db.get_public_splits().await
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Split>> {
        tracing::debug!(owner_id, "Listing splits");
        self.db.get_splits_for_owner(owner_id).await
    }

    /// Assemble a split from supplied workout snapshots plus snapshots of
    /// the owner's stored workouts, and persist it in one write.
    pub async fn create(&self, owner_id: &str, request: NewSplit) -> Result<Split> {
        request.validate()?;

        let mut workouts = request.workouts;
        workouts.extend(
            self.workouts
                .snapshots(owner_id, &request.workout_ids)
                .await?,
        );

        let split = Split {
            id: new_document_id(),
            owner_id: owner_id.to_string(),
            name: request.name,
            workouts,
            notes: request.notes,
            visibility: Visibility::Private,
            copied_from: None,
            created_at: now_rfc3339(),
        };
        self.db.set_split(&split).await?;

        tracing::info!(
            owner_id,
            split_id = %split.id,
            workouts = split.workouts.len(),
            "Split created"
        );
        Ok(split)
    }

    pub async fn update(&self, owner_id: &str, id: &str, patch: SplitPatch) -> Result<Split> {
        patch.validate()?;

        let mut split = self.get_owned(owner_id, id).await?;
        split.apply(patch);
        self.db.set_split(&split).await?;

        tracing::info!(owner_id, split_id = id, "Split updated");
        Ok(split)
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<()> {
        self.get_owned(owner_id, id).await?;
        self.db.delete_split(id).await?;

        tracing::info!(owner_id, split_id = id, "Split deleted");
        Ok(())
    }

    /// Apply a sharing action. A `Copied` split is returned unchanged.
    pub async fn set_visibility(
        &self,
        owner_id: &str,
        id: &str,
        action: VisibilityAction,
    ) -> Result<Split> {
        let mut split = self.get_owned(owner_id, id).await?;

        let next = split.visibility.apply(action);
        if next == split.visibility {
            tracing::debug!(
                owner_id,
                split_id = id,
                ?action,
                state = next.as_str(),
                "Visibility unchanged"
            );
            return Ok(split);
        }

        let previous = split.visibility;
        split.visibility = next;
        self.db.set_split(&split).await?;

        tracing::info!(
            owner_id,
            split_id = id,
            from = previous.as_str(),
            to = next.as_str(),
            "Split visibility changed"
        );
        Ok(split)
    }

    /// Copy a split into `owner_id`'s collection.
    ///
    /// Anyone may clone a public split; owners may also clone their own
    /// splits in any state. The source document is not modified.
    pub async fn clone_split(&self, owner_id: &str, source_id: &str) -> Result<Split> {
        let source = self
            .db
            .get_split(source_id)
            .await?
            .filter(|split| split.visibility.is_public() || split.owner_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Split {} not found", source_id)))?;

        let copy = source.clone_for(owner_id, new_document_id(), now_rfc3339());
        self.db.set_split(&copy).await?;

        tracing::info!(
            owner_id,
            source_id,
            source_owner = %source.owner_id,
            split_id = %copy.id,
            "Split cloned"
        );
        Ok(copy)
    }

    async fn get_owned(&self, owner_id: &str, id: &str) -> Result<Split> {
        self.db
            .get_split(id)
            .await?
            .filter(|split| split.owner_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Split {} not found", id)))
    }
}
