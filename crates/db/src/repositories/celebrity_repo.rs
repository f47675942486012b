//! Repository for the `celebrities` table.

use sqlx::PgPool;
use wornby_core::types::DbId;

use crate::models::celebrity::{Celebrity, CreateCelebrity, UpdateCelebrity};

/// Column list for celebrities queries.
const COLUMNS: &str =
    "id, name, profession, category, image_url, bio, is_elite, created_at, updated_at";

/// Provides CRUD operations for celebrity profiles.
pub struct CelebrityRepo;

impl CelebrityRepo {
    /// Create a new celebrity profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCelebrity) -> Result<Celebrity, sqlx::Error> {
        let query = format!(
            "INSERT INTO celebrities (name, profession, category, image_url, bio, is_elite)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Celebrity>(&query)
            .bind(&input.name)
            .bind(&input.profession)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(&input.bio)
            .bind(input.is_elite)
            .fetch_one(pool)
            .await
    }

    /// Find a celebrity by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Celebrity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM celebrities WHERE id = $1");
        sqlx::query_as::<_, Celebrity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all celebrities, elite profiles first, then by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Celebrity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM celebrities ORDER BY is_elite DESC, name ASC"
        );
        sqlx::query_as::<_, Celebrity>(&query).fetch_all(pool).await
    }

    /// Patch a celebrity profile. Absent fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCelebrity,
    ) -> Result<Option<Celebrity>, sqlx::Error> {
        let query = format!(
            "UPDATE celebrities SET
                name = COALESCE($1, name),
                profession = COALESCE($2, profession),
                category = COALESCE($3, category),
                image_url = COALESCE($4, image_url),
                bio = COALESCE($5, bio),
                is_elite = COALESCE($6, is_elite),
                updated_at = now()
             WHERE id = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Celebrity>(&query)
            .bind(&input.name)
            .bind(&input.profession)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(&input.bio)
            .bind(input.is_elite)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a celebrity by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM celebrities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
