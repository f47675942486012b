//! Video product-tag row model and conversion to the domain type.
//!
//! `source` and `status` are stored as text (constrained by CHECKs in the
//! migration); conversion to [`ProductTag`] re-parses them so an out-of-band
//! row edit surfaces as a validation error instead of a panic.

use sqlx::FromRow;
use wornby_core::error::CoreError;
use wornby_core::tag::{Position, ProductInfo, ProductTag};
use wornby_core::types::{DbId, Timestamp};

/// A row from the `video_tags` table.
#[derive(Debug, Clone, FromRow)]
pub struct VideoTagRow {
    pub id: DbId,
    pub video_id: DbId,
    pub product_id: Option<DbId>,
    pub name: String,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub purchase_url: Option<String>,
    pub position_x: f64,
    pub position_y: f64,
    pub time_start: f64,
    pub time_end: f64,
    pub source: String,
    pub status: String,
    pub confidence: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VideoTagRow {
    /// Convert the row into the engine's working-copy representation.
    pub fn into_domain(self) -> Result<ProductTag, CoreError> {
        Ok(ProductTag {
            id: self.id,
            video_id: self.video_id,
            product_id: self.product_id,
            product: ProductInfo {
                name: self.name,
                brand: self.brand,
                price: self.price,
                image_url: self.image_url,
                purchase_url: self.purchase_url,
            },
            position: Position {
                x: self.position_x,
                y: self.position_y,
            },
            time_start: self.time_start,
            time_end: self.time_end,
            source: self.source.parse()?,
            status: self.status.parse()?,
            confidence: self.confidence,
        })
    }
}

/// Convert a whole result set, failing on the first bad row.
pub fn rows_into_domain(rows: Vec<VideoTagRow>) -> Result<Vec<ProductTag>, CoreError> {
    rows.into_iter().map(VideoTagRow::into_domain).collect()
}
