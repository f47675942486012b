//! Catalog product model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wornby_core::types::{DbId, Timestamp};

/// A row from the `products` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: DbId,
    pub celebrity_id: DbId,
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub purchase_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub purchase_url: Option<String>,
}

/// DTO for updating a product.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub purchase_url: Option<String>,
}
