// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile service.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{ProfileFields, User};
use crate::time_utils::now_rfc3339;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Session identity plus the stored profile, if one exists yet.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Identity {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub profile: Option<User>,
}

#[derive(Clone)]
pub struct ProfileService {
    db: Db,
    default_picture: String,
}

impl ProfileService {
    pub fn new(db: Db, default_picture: impl Into<String>) -> Self {
        Self {
            db,
            default_picture: default_picture.into(),
        }
    }

    pub async fn get(&self, owner_id: &str) -> Result<Option<User>> {
        self.db.get_user(owner_id).await
    }

    /// Create the profile. Fails with a conflict if one already exists.
    pub async fn create(&self, owner_id: &str, fields: ProfileFields) -> Result<User> {
        fields.validate()?;

        let mut user = User::new(owner_id, &self.default_picture, now_rfc3339());
        user.apply(fields);

        if !self.db.insert_user(&user).await? {
            return Err(AppError::Conflict(format!(
                "Profile for {} already exists",
                owner_id
            )));
        }

        tracing::info!(owner_id, "Profile created");
        Ok(user)
    }

    /// Update the profile, creating it first when missing.
    pub async fn update(&self, owner_id: &str, fields: ProfileFields) -> Result<User> {
        fields.validate()?;

        let mut user = match self.db.get_user(owner_id).await? {
            Some(user) => user,
            None => {
                tracing::debug!(owner_id, "No profile yet, creating on update");
                User::new(owner_id, &self.default_picture, now_rfc3339())
            }
        };
        user.apply(fields);
        self.db.upsert_user(&user).await?;

        tracing::info!(owner_id, "Profile updated");
        Ok(user)
    }

    pub async fn identity(&self, user: &AuthUser) -> Result<Identity> {
        let profile = self.db.get_user(&user.owner_id).await?;
        Ok(Identity {
            id: user.owner_id.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
            profile,
        })
    }

    /// Remove the profile and everything the owner has stored.
    pub async fn delete_account(&self, owner_id: &str) -> Result<usize> {
        let deleted = self.db.delete_owner_data(owner_id).await?;
        tracing::info!(owner_id, deleted, "Account deleted");
        Ok(deleted)
    }
}
