//! Product tag data model and field validation.
//!
//! A [`ProductTag`] associates a catalog product (or ad-hoc product fields)
//! with a spatial position and a time window on one video. Provenance
//! ([`TagSource`]) is fixed at creation; moderation status ([`TagStatus`])
//! is what the approve/reject workflow mutates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Highest allowed percent coordinate / confidence value.
pub const PERCENT_MAX: f64 = 100.0;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a tag came to exist. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSource {
    /// Placed by an automated detection pass; starts in moderation.
    Ai,
    /// Placed by a human editor; never enters moderation.
    Manual,
}

impl TagSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagSource::Ai => "ai",
            TagSource::Manual => "manual",
        }
    }
}

impl FromStr for TagSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai" => Ok(TagSource::Ai),
            "manual" => Ok(TagSource::Manual),
            other => Err(CoreError::Validation(format!(
                "Unknown tag source: '{other}'. Must be 'ai' or 'manual'"
            ))),
        }
    }
}

impl fmt::Display for TagSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation state of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    /// Awaiting an approve/reject decision (AI tags only).
    Pending,
    /// Visible to everyone.
    Approved,
    /// Never visible, to any role.
    Rejected,
}

impl TagStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagStatus::Pending => "pending",
            TagStatus::Approved => "approved",
            TagStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for TagStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TagStatus::Pending),
            "approved" => Ok(TagStatus::Approved),
            "rejected" => Ok(TagStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown tag status: '{other}'. Must be 'pending', 'approved' or 'rejected'"
            ))),
        }
    }
}

impl fmt::Display for TagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A moderation decision on a pending (or previously decided) AI tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// The status a tag ends up in after this decision.
    pub fn resulting_status(&self) -> TagStatus {
        match self {
            Decision::Approve => TagStatus::Approved,
            Decision::Reject => TagStatus::Rejected,
        }
    }
}

// ---------------------------------------------------------------------------
// Value structs
// ---------------------------------------------------------------------------

/// Normalized placement on the video frame, percent-based so it is
/// resolution-independent. Both axes must lie in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Inline product fields carried on a tag.
///
/// When `ProductTag::product_id` references the catalog these mirror the
/// catalog row at tagging time; for ad-hoc manual tags they are the only
/// product data. The engine treats them as opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub purchase_url: Option<String>,
}

/// A single taggable product reference overlaid on a video timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTag {
    pub id: DbId,
    pub video_id: DbId,
    /// Optional catalog reference; `None` for ad-hoc manual tags.
    pub product_id: Option<DbId>,
    pub product: ProductInfo,
    pub position: Position,
    /// Start of the closed visibility interval, in seconds.
    pub time_start: f64,
    /// End of the closed visibility interval, in seconds.
    pub time_end: f64,
    pub source: TagSource,
    pub status: TagStatus,
    /// Detector self-reported certainty in `[0, 100]`; AI tags only.
    pub confidence: Option<f64>,
}

/// One candidate from a detector run, consumed by batch ingest.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectedTag {
    #[serde(default)]
    pub product_id: Option<DbId>,
    pub product: ProductInfo,
    pub position: Position,
    pub time_start: f64,
    pub time_end: f64,
    pub confidence: f64,
}

/// Partial update applied to an existing tag.
///
/// `id` and `source` are deliberately absent: identity and provenance never
/// change. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagPatch {
    pub product_id: Option<DbId>,
    pub product: Option<ProductInfo>,
    pub position: Option<Position>,
    pub time_start: Option<f64>,
    pub time_end: Option<f64>,
    pub status: Option<TagStatus>,
}

/// Per-provenance tag counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub ai: usize,
    pub manual: usize,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a visibility window: both ends non-negative, start <= end.
pub fn validate_time_window(start: f64, end: f64) -> Result<(), CoreError> {
    if start < 0.0 || end < 0.0 || start > end || !start.is_finite() || !end.is_finite() {
        return Err(CoreError::InvalidTimeWindow { start, end });
    }
    Ok(())
}

/// Validate a frame position: both axes within `[0, 100]`.
pub fn validate_position(position: Position) -> Result<(), CoreError> {
    let in_range = |v: f64| v.is_finite() && (0.0..=PERCENT_MAX).contains(&v);
    if !in_range(position.x) || !in_range(position.y) {
        return Err(CoreError::InvalidPosition {
            x: position.x,
            y: position.y,
        });
    }
    Ok(())
}

/// Validate a detector confidence score: within `[0, 100]`.
pub fn validate_confidence(confidence: f64) -> Result<(), CoreError> {
    if !confidence.is_finite() || !(0.0..=PERCENT_MAX).contains(&confidence) {
        return Err(CoreError::Validation(format!(
            "confidence must be between 0 and 100, got {confidence}"
        )));
    }
    Ok(())
}

impl ProductTag {
    /// Whether this tag renders at playback time `t` for the given viewer.
    ///
    /// Temporal test is inclusive on both ends; pending tags are admin-only;
    /// rejected tags are invisible to every role.
    pub fn is_visible_at(&self, t: f64, viewer: crate::roles::ViewerRole) -> bool {
        let time_visible = t >= self.time_start && t <= self.time_end;
        let status_visible = match self.status {
            TagStatus::Approved => true,
            TagStatus::Pending => viewer == crate::roles::ViewerRole::Admin,
            TagStatus::Rejected => false,
        };
        time_visible && status_visible
    }
}
