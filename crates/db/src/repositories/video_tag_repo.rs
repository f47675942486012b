//! Repository for the `video_tags` table.
//!
//! Writes take the engine's domain representation ([`ProductTag`]) rather
//! than a separate DTO: handlers run the overlay engine on an in-memory
//! collection first, then persist the already-validated result here.

use sqlx::PgPool;
use wornby_core::tag::{ProductTag, TagStatus};
use wornby_core::types::DbId;

use crate::models::video_tag::VideoTagRow;

/// Column list for video_tags queries.
const COLUMNS: &str = "id, video_id, product_id, name, brand, price, image_url, \
    purchase_url, position_x, position_y, time_start, time_end, source, status, \
    confidence, created_at, updated_at";

/// Provides persistence for video product tags.
pub struct VideoTagRepo;

impl VideoTagRepo {
    /// Insert one tag, returning the stored row (with its database id).
    pub async fn insert(pool: &PgPool, tag: &ProductTag) -> Result<VideoTagRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_tags
                (video_id, product_id, name, brand, price, image_url, purchase_url,
                 position_x, position_y, time_start, time_end, source, status, confidence)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoTagRow>(&query)
            .bind(tag.video_id)
            .bind(tag.product_id)
            .bind(&tag.product.name)
            .bind(&tag.product.brand)
            .bind(&tag.product.price)
            .bind(&tag.product.image_url)
            .bind(&tag.product.purchase_url)
            .bind(tag.position.x)
            .bind(tag.position.y)
            .bind(tag.time_start)
            .bind(tag.time_end)
            .bind(tag.source.as_str())
            .bind(tag.status.as_str())
            .bind(tag.confidence)
            .fetch_one(pool)
            .await
    }

    /// Insert a detector batch in one transaction: either every row lands or
    /// none do, matching the engine's all-or-nothing ingest.
    pub async fn insert_batch(
        pool: &PgPool,
        tags: &[ProductTag],
    ) -> Result<Vec<VideoTagRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_tags
                (video_id, product_id, name, brand, price, image_url, purchase_url,
                 position_x, position_y, time_start, time_end, source, status, confidence)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut rows = Vec::with_capacity(tags.len());
        for tag in tags {
            let row = sqlx::query_as::<_, VideoTagRow>(&query)
                .bind(tag.video_id)
                .bind(tag.product_id)
                .bind(&tag.product.name)
                .bind(&tag.product.brand)
                .bind(&tag.product.price)
                .bind(&tag.product.image_url)
                .bind(&tag.product.purchase_url)
                .bind(tag.position.x)
                .bind(tag.position.y)
                .bind(tag.time_start)
                .bind(tag.time_end)
                .bind(tag.source.as_str())
                .bind(tag.status.as_str())
                .bind(tag.confidence)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }
        tx.commit().await?;
        Ok(rows)
    }

    /// Find a tag by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VideoTagRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM video_tags WHERE id = $1");
        sqlx::query_as::<_, VideoTagRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tags for a video, by id ascending (creation-order stacking).
    pub async fn list_by_video(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Vec<VideoTagRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM video_tags WHERE video_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, VideoTagRow>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite a tag's mutable fields from an engine-validated domain tag.
    ///
    /// `source` and `confidence` are deliberately not in the SET list:
    /// provenance is immutable. A single whole-row UPDATE keeps concurrent
    /// editors at last-write-wins without torn rows.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        tag: &ProductTag,
    ) -> Result<Option<VideoTagRow>, sqlx::Error> {
        let query = format!(
            "UPDATE video_tags SET
                product_id = $1,
                name = $2,
                brand = $3,
                price = $4,
                image_url = $5,
                purchase_url = $6,
                position_x = $7,
                position_y = $8,
                time_start = $9,
                time_end = $10,
                status = $11,
                updated_at = now()
             WHERE id = $12
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoTagRow>(&query)
            .bind(tag.product_id)
            .bind(&tag.product.name)
            .bind(&tag.product.brand)
            .bind(&tag.product.price)
            .bind(&tag.product.image_url)
            .bind(&tag.product.purchase_url)
            .bind(tag.position.x)
            .bind(tag.position.y)
            .bind(tag.time_start)
            .bind(tag.time_end)
            .bind(tag.status.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set only the moderation status (approve/reject path).
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: TagStatus,
    ) -> Result<Option<VideoTagRow>, sqlx::Error> {
        let query = format!(
            "UPDATE video_tags SET status = $1, updated_at = now()
             WHERE id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoTagRow>(&query)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM video_tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
