//! Video model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wornby_core::types::{DbId, Timestamp};

/// A row from the `videos` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Video {
    pub id: DbId,
    pub celebrity_id: DbId,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub duration_secs: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a video.
#[derive(Debug, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub duration_secs: Option<f64>,
}

/// DTO for updating a video.
#[derive(Debug, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub duration_secs: Option<f64>,
}
