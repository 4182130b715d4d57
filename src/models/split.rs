// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Split aggregate: a training program made of embedded workout snapshots,
//! with a sharing state.

use crate::models::WorkoutSnapshot;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Sharing state of a split.
///
/// Stored as the strings `"false"`, `"true"` and `"COPIED"` so documents
/// written by the web client stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Visibility {
    /// Only visible to the owner
    #[default]
    #[serde(rename = "false")]
    Private,
    /// Listed in the public split browser
    #[serde(rename = "true")]
    Public,
    /// Clone of a shared split; can never be shared again
    #[serde(rename = "COPIED")]
    Copied,
}

/// Requested change to a split's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityAction {
    #[default]
    Toggle,
    Publish,
    Unpublish,
}

impl Visibility {
    /// Storage representation, used in queries.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "false",
            Self::Public => "true",
            Self::Copied => "COPIED",
        }
    }

    /// Next state after `action`. `Copied` absorbs every action.
    pub const fn apply(self, action: VisibilityAction) -> Self {
        match (self, action) {
            (Self::Copied, _) => Self::Copied,
            (Self::Private, VisibilityAction::Toggle) => Self::Public,
            (Self::Public, VisibilityAction::Toggle) => Self::Private,
            (_, VisibilityAction::Publish) => Self::Public,
            (_, VisibilityAction::Unpublish) => Self::Private,
        }
    }

    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Stored split document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Split {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub workouts: Vec<WorkoutSnapshot>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub visibility: Visibility,
    /// Source split ID when this split is a clone
    #[serde(default)]
    pub copied_from: Option<String>,
    pub created_at: String,
}

impl Split {
    /// Copy this split into `owner_id`'s collection.
    ///
    /// Workout and exercise snapshots are duplicated by value; only the
    /// top-level document gets a new identity.
    pub fn clone_for(&self, owner_id: &str, id: String, created_at: String) -> Self {
        Self {
            id,
            owner_id: owner_id.to_string(),
            name: self.name.clone(),
            workouts: self.workouts.clone(),
            notes: self.notes.clone(),
            visibility: Visibility::Copied,
            copied_from: Some(self.id.clone()),
            created_at,
        }
    }

    pub fn apply(&mut self, patch: SplitPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(workouts) = patch.workouts {
            self.workouts = workouts;
        }
    }
}

/// Request body for creating a split.
///
/// `workout_ids` name the caller's stored workouts; they are snapshotted at
/// write time and appended after `workouts`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSplit {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub notes: String,
    #[serde(default)]
    #[validate(nested)]
    pub workouts: Vec<WorkoutSnapshot>,
    #[serde(default)]
    pub workout_ids: Vec<String>,
}

/// Partial update for a split. Visibility changes go through the
/// visibility endpoint only.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SplitPatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 10000))]
    pub notes: Option<String>,
    #[validate(nested)]
    pub workouts: Option<Vec<WorkoutSnapshot>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseSnapshot;

    fn sample_split(visibility: Visibility) -> Split {
        Split {
            id: "s1".to_string(),
            owner_id: "u1".to_string(),
            name: "PPL".to_string(),
            workouts: vec![WorkoutSnapshot {
                name: "Push".to_string(),
                exercises: vec![ExerciseSnapshot {
                    name: "Bench".to_string(),
                    description: String::new(),
                    notes: "3x5".to_string(),
                }],
            }],
            notes: "six days".to_string(),
            visibility,
            copied_from: None,
            created_at: "2024-01-01T00:00:00.000000000Z".to_string(),
        }
    }

    #[test]
    fn test_toggle_round_trip() {
        let state = Visibility::Private.apply(VisibilityAction::Toggle);
        assert_eq!(state, Visibility::Public);
        assert_eq!(state.apply(VisibilityAction::Toggle), Visibility::Private);
    }

    #[test]
    fn test_copied_is_absorbing() {
        let mut state = Visibility::Copied;
        for action in [
            VisibilityAction::Toggle,
            VisibilityAction::Publish,
            VisibilityAction::Unpublish,
            VisibilityAction::Toggle,
        ] {
            state = state.apply(action);
            assert_eq!(state, Visibility::Copied);
        }
    }

    #[test]
    fn test_publish_and_unpublish_are_idempotent() {
        assert_eq!(
            Visibility::Public.apply(VisibilityAction::Publish),
            Visibility::Public
        );
        assert_eq!(
            Visibility::Private.apply(VisibilityAction::Unpublish),
            Visibility::Private
        );
    }

    #[test]
    fn test_visibility_wire_format() {
        assert_eq!(
            serde_json::to_string(&Visibility::Private).unwrap(),
            "\"false\""
        );
        assert_eq!(serde_json::to_string(&Visibility::Public).unwrap(), "\"true\"");
        let copied: Visibility = serde_json::from_str("\"COPIED\"").unwrap();
        assert_eq!(copied, Visibility::Copied);
        assert_eq!(copied.as_str(), "COPIED");
    }

    #[test]
    fn test_missing_visibility_defaults_to_private() {
        let json = r#"{"id":"s1","owner_id":"u1","name":"PPL","created_at":"now"}"#;
        let split: Split = serde_json::from_str(json).unwrap();
        assert_eq!(split.visibility, Visibility::Private);
        assert!(split.workouts.is_empty());
    }

    #[test]
    fn test_clone_for_transfers_ownership() {
        let source = sample_split(Visibility::Public);
        let copy = source.clone_for("u2", "s2".to_string(), "later".to_string());

        assert_eq!(copy.id, "s2");
        assert_eq!(copy.owner_id, "u2");
        assert_eq!(copy.visibility, Visibility::Copied);
        assert_eq!(copy.copied_from.as_deref(), Some("s1"));
        assert_eq!(copy.name, source.name);
        assert_eq!(copy.notes, source.notes);
        assert_eq!(copy.workouts, source.workouts);
        // Source is untouched
        assert_eq!(source.visibility, Visibility::Public);
    }
}
