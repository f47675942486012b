//! Repository for the `videos` table.

use sqlx::PgPool;
use wornby_core::types::DbId;

use crate::models::video::{CreateVideo, UpdateVideo, Video};

/// Column list for videos queries.
const COLUMNS: &str = "id, celebrity_id, title, video_url, thumbnail_url, category, \
    duration_secs, created_at, updated_at";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Create a new video under a celebrity, returning the created row.
    pub async fn create(
        pool: &PgPool,
        celebrity_id: DbId,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos
                (celebrity_id, title, video_url, thumbnail_url, category, duration_secs)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(celebrity_id)
            .bind(&input.title)
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .bind(&input.category)
            .bind(input.duration_secs)
            .fetch_one(pool)
            .await
    }

    /// Find a video by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all videos for a celebrity, newest first.
    pub async fn list_by_celebrity(
        pool: &PgPool,
        celebrity_id: DbId,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos WHERE celebrity_id = $1 ORDER BY id DESC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(celebrity_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a video. Absent fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($1, title),
                video_url = COALESCE($2, video_url),
                thumbnail_url = COALESCE($3, thumbnail_url),
                category = COALESCE($4, category),
                duration_secs = COALESCE($5, duration_secs),
                updated_at = now()
             WHERE id = $6
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .bind(&input.category)
            .bind(input.duration_secs)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a video by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
