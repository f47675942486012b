//! Repository for the `products` table.

use sqlx::PgPool;
use wornby_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list for products queries.
const COLUMNS: &str = "id, celebrity_id, name, brand, category, price, image_url, \
    purchase_url, created_at, updated_at";

/// Provides CRUD operations for catalog products.
pub struct ProductRepo;

impl ProductRepo {
    /// Create a new product under a celebrity, returning the created row.
    pub async fn create(
        pool: &PgPool,
        celebrity_id: DbId,
        input: &CreateProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (celebrity_id, name, brand, category, price, image_url, purchase_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(celebrity_id)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.category)
            .bind(&input.price)
            .bind(&input.image_url)
            .bind(&input.purchase_url)
            .fetch_one(pool)
            .await
    }

    /// Find a product by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products for a celebrity, newest first.
    pub async fn list_by_celebrity(
        pool: &PgPool,
        celebrity_id: DbId,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE celebrity_id = $1 ORDER BY id DESC"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(celebrity_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a product. Absent fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($1, name),
                brand = COALESCE($2, brand),
                category = COALESCE($3, category),
                price = COALESCE($4, price),
                image_url = COALESCE($5, image_url),
                purchase_url = COALESCE($6, purchase_url),
                updated_at = now()
             WHERE id = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.category)
            .bind(&input.price)
            .bind(&input.image_url)
            .bind(&input.purchase_url)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
