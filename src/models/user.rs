//! User profile model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// User profile stored in Firestore.
///
/// Keyed by the identity-provider subject; at most one per owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Identity-provider subject (also used as document ID)
    pub owner_id: String,
    /// Date of birth as entered by the user
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub height_feet: Option<u32>,
    #[serde(default)]
    pub height_inches: Option<u32>,
    /// Body weight
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: String,
    /// Profile picture URL
    pub profile_picture: String,
    /// When the profile was first written
    pub created_at: String,
}

/// Profile fields accepted on create and update.
///
/// Every field is optional; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileFields {
    #[validate(length(max = 32))]
    pub date_of_birth: Option<String>,
    #[validate(range(max = 9))]
    pub height_feet: Option<u32>,
    #[validate(range(max = 11))]
    pub height_inches: Option<u32>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    #[validate(length(max = 10000))]
    pub notes: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub profile_picture: Option<String>,
}

impl User {
    /// Build a fresh profile for `owner_id`.
    pub fn new(owner_id: &str, default_picture: &str, created_at: String) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            date_of_birth: None,
            height_feet: None,
            height_inches: None,
            weight: None,
            notes: String::new(),
            profile_picture: default_picture.to_string(),
            created_at,
        }
    }

    /// Overwrite every field present in `fields`.
    pub fn apply(&mut self, fields: ProfileFields) {
        if let Some(dob) = fields.date_of_birth {
            self.date_of_birth = Some(dob);
        }
        if let Some(feet) = fields.height_feet {
            self.height_feet = Some(feet);
        }
        if let Some(inches) = fields.height_inches {
            self.height_inches = Some(inches);
        }
        if let Some(weight) = fields.weight {
            self.weight = Some(weight);
        }
        if let Some(notes) = fields.notes {
            self.notes = notes;
        }
        if let Some(picture) = fields.profile_picture {
            self.profile_picture = picture;
        }
    }
}
