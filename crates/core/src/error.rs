use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Invalid time window: start {start} must be >= 0 and <= end {end}")]
    InvalidTimeWindow { start: f64, end: f64 },

    #[error("Invalid position: ({x}, {y}) must lie within [0, 100] on both axes")]
    InvalidPosition { x: f64, y: f64 },

    #[error("Tag {id} is not moderable: only AI-sourced tags go through moderation")]
    NotModerable { id: DbId },

    #[error("Invalid detection batch: entry {index} rejected: {reason}")]
    InvalidBatch { index: usize, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
