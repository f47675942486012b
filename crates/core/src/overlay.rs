//! Tag visibility and moderation engine.
//!
//! Stateless functions over an explicit tag collection: the caller owns the
//! `Vec<ProductTag>` (one video's working copy), every mutation either
//! completes fully or leaves the collection untouched, and the visibility
//! query is a pure, lazy filter safe to re-run on every playback tick.
//!
//! Durability is the caller's job: persist the collection after a successful
//! mutation, discard it if persistence fails. No rollback API exists here.

use crate::error::CoreError;
use crate::roles::ViewerRole;
use crate::tag::{
    validate_confidence, validate_position, validate_time_window, Decision, DetectedTag, Position,
    ProductInfo, ProductTag, SourceCounts, TagPatch, TagSource, TagStatus,
};
use crate::types::DbId;

/// Entity name used in `NotFound` errors.
const ENTITY: &str = "ProductTag";

// ---------------------------------------------------------------------------
// Visibility query
// ---------------------------------------------------------------------------

/// Tags that should render as overlays at playback time `t` for `viewer`.
///
/// A tag is included when `time_start <= t <= time_end` (closed interval)
/// and its status is visible to the viewer: approved for everyone, pending
/// for admins only, rejected for nobody.
///
/// The iterator is lazy and borrows the input; input order is preserved and
/// no sort is applied. Callers needing a stacking order sort themselves.
pub fn visible_tags(
    tags: &[ProductTag],
    t: f64,
    viewer: ViewerRole,
) -> impl Iterator<Item = &ProductTag> {
    tags.iter().filter(move |tag| tag.is_visible_at(t, viewer))
}

/// Number of tags visible at `t` for `viewer`.
pub fn visible_count(tags: &[ProductTag], t: f64, viewer: ViewerRole) -> usize {
    visible_tags(tags, t, viewer).count()
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Allocate the next free id in the collection.
fn next_id(tags: &[ProductTag]) -> DbId {
    tags.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

/// Place a manual tag.
///
/// Manual tags skip moderation entirely: they are born `approved` and carry
/// no confidence score. Fails without mutating on an inverted/negative time
/// window or an out-of-range position.
pub fn create_manual_tag(
    tags: &mut Vec<ProductTag>,
    video_id: DbId,
    position: Position,
    time_start: f64,
    time_end: f64,
    product_id: Option<DbId>,
    product: ProductInfo,
) -> Result<&ProductTag, CoreError> {
    validate_time_window(time_start, time_end)?;
    validate_position(position)?;

    let tag = ProductTag {
        id: next_id(tags),
        video_id,
        product_id,
        product,
        position,
        time_start,
        time_end,
        source: TagSource::Manual,
        status: TagStatus::Approved,
        confidence: None,
    };
    let index = tags.len();
    tags.push(tag);
    Ok(&tags[index])
}

/// Ingest a detector batch.
///
/// Atomic over the batch: every candidate is validated up front and the
/// first offender rejects the whole batch with [`CoreError::InvalidBatch`],
/// leaving the collection unchanged. Detectors return a set, not a stream;
/// a half-applied run would surface as a half-moderated queue.
///
/// Accepted candidates are appended in batch order as `ai`/`pending` with
/// confidence carried through. Returns the newly appended slice.
pub fn ingest_detected_tags<'a>(
    tags: &'a mut Vec<ProductTag>,
    video_id: DbId,
    batch: &[DetectedTag],
) -> Result<&'a [ProductTag], CoreError> {
    for (index, candidate) in batch.iter().enumerate() {
        let check = validate_time_window(candidate.time_start, candidate.time_end)
            .and_then(|_| validate_position(candidate.position))
            .and_then(|_| validate_confidence(candidate.confidence));
        if let Err(err) = check {
            return Err(CoreError::InvalidBatch {
                index,
                reason: err.to_string(),
            });
        }
    }

    let first_new = tags.len();
    let mut id = next_id(tags);
    for candidate in batch {
        tags.push(ProductTag {
            id,
            video_id,
            product_id: candidate.product_id,
            product: candidate.product.clone(),
            position: candidate.position,
            time_start: candidate.time_start,
            time_end: candidate.time_end,
            source: TagSource::Ai,
            status: TagStatus::Pending,
            confidence: Some(candidate.confidence),
        });
        id += 1;
    }
    Ok(&tags[first_new..])
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// Apply an approve/reject decision to an AI-sourced tag.
///
/// Fails with `NotFound` for an unknown id and `NotModerable` for manual
/// tags (they were never pending). Re-moderating an already-decided tag is
/// allowed and simply overwrites the status: admins may reverse a decision,
/// and repeating the same decision is a no-op.
pub fn moderate(
    tags: &mut [ProductTag],
    tag_id: DbId,
    decision: Decision,
) -> Result<&ProductTag, CoreError> {
    let tag = tags
        .iter_mut()
        .find(|t| t.id == tag_id)
        .ok_or(CoreError::NotFound {
            entity: ENTITY,
            id: tag_id,
        })?;

    if tag.source != TagSource::Ai {
        return Err(CoreError::NotModerable { id: tag_id });
    }

    tag.status = decision.resulting_status();
    Ok(tag)
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

/// Apply a partial edit to a tag.
///
/// Position, time window, status, and product association are mutable; `id`
/// and `source` are not representable in [`TagPatch`]. The merged window and
/// position are validated before anything is written, so a failed update
/// leaves the tag exactly as it was.
pub fn update_tag<'a>(
    tags: &'a mut [ProductTag],
    tag_id: DbId,
    patch: &TagPatch,
) -> Result<&'a ProductTag, CoreError> {
    let tag = tags
        .iter_mut()
        .find(|t| t.id == tag_id)
        .ok_or(CoreError::NotFound {
            entity: ENTITY,
            id: tag_id,
        })?;

    let time_start = patch.time_start.unwrap_or(tag.time_start);
    let time_end = patch.time_end.unwrap_or(tag.time_end);
    let position = patch.position.unwrap_or(tag.position);
    validate_time_window(time_start, time_end)?;
    validate_position(position)?;

    tag.time_start = time_start;
    tag.time_end = time_end;
    tag.position = position;
    if let Some(product_id) = patch.product_id {
        tag.product_id = Some(product_id);
    }
    if let Some(product) = &patch.product {
        tag.product = product.clone();
    }
    if let Some(status) = patch.status {
        tag.status = status;
    }
    Ok(tag)
}

/// Remove a tag from the collection.
///
/// Fails with `NotFound` for an unknown id; batch-delete callers treat that
/// as non-fatal.
pub fn delete_tag(tags: &mut Vec<ProductTag>, tag_id: DbId) -> Result<(), CoreError> {
    let index = tags
        .iter()
        .position(|t| t.id == tag_id)
        .ok_or(CoreError::NotFound {
            entity: ENTITY,
            id: tag_id,
        })?;
    tags.remove(index);
    Ok(())
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Count of AI tags still awaiting a decision. Drives moderation-queue badges.
pub fn pending_count(tags: &[ProductTag]) -> usize {
    tags.iter()
        .filter(|t| t.source == TagSource::Ai && t.status == TagStatus::Pending)
        .count()
}

/// Tag counts split by provenance.
pub fn count_by_source(tags: &[ProductTag]) -> SourceCounts {
    let ai = tags.iter().filter(|t| t.source == TagSource::Ai).count();
    SourceCounts {
        ai,
        manual: tags.len() - ai,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
