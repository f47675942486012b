//! Celebrity profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wornby_core::types::{DbId, Timestamp};

/// A row from the `celebrities` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Celebrity {
    pub id: DbId,
    pub name: String,
    pub profession: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub is_elite: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a celebrity profile.
#[derive(Debug, Deserialize)]
pub struct CreateCelebrity {
    pub name: String,
    pub profession: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub is_elite: bool,
}

/// DTO for updating a celebrity profile.
#[derive(Debug, Deserialize)]
pub struct UpdateCelebrity {
    pub name: Option<String>,
    pub profession: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub is_elite: Option<bool>,
}
