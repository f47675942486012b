//! Handlers for video product tags: overlay queries, manual placement,
//! detector batch ingest, moderation, edits, and deletion.
//!
//! Every mutation follows the same shape: load the owning video's tag set
//! into memory, run the overlay engine on that working copy (which enforces
//! all invariants), then persist the validated result. If persistence fails
//! the working copy is simply dropped.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use wornby_core::error::CoreError;
use wornby_core::overlay;
use wornby_core::roles::ViewerRole;
use wornby_core::tag::{Decision, DetectedTag, Position, ProductInfo, ProductTag, TagPatch};
use wornby_core::types::DbId;
use wornby_db::models::video_tag::{rows_into_domain, VideoTagRow};
use wornby_db::repositories::{VideoRepo, VideoTagRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{OptionalViewer, RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /videos/{id}/tags/visible`.
#[derive(Debug, Deserialize)]
pub struct VisibleQuery {
    /// Playback time in seconds.
    pub t: Option<f64>,
}

/// Request body for `POST /videos/{id}/tags`.
#[derive(Debug, Deserialize)]
pub struct CreateManualTagRequest {
    pub position: Position,
    pub time_start: f64,
    pub time_end: f64,
    #[serde(default)]
    pub product_id: Option<DbId>,
    pub product: ProductInfo,
}

/// Request body for `POST /videos/{id}/tags/detections`.
#[derive(Debug, Deserialize)]
pub struct IngestDetectionsRequest {
    pub detections: Vec<DetectedTag>,
}

/// Request body for `POST /tags/{id}/moderate`.
#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    pub decision: Decision,
}

/// Response body for `GET /videos/{id}/tags/counts`.
#[derive(Debug, Serialize)]
pub struct TagCounts {
    /// AI tags awaiting a decision (moderation-queue badge).
    pub pending: usize,
    pub ai: usize,
    pub manual: usize,
}

// ---------------------------------------------------------------------------
// Handlers: queries
// ---------------------------------------------------------------------------

/// GET /api/v1/videos/{id}/tags
///
/// The video's full tag set for admin/editor viewers; approved tags only
/// for public callers. Creation order (id ascending).
pub async fn list_tags(
    State(state): State<AppState>,
    OptionalViewer(viewer): OptionalViewer,
    Path(video_id): Path<DbId>,
) -> AppResult<Json<Vec<ProductTag>>> {
    let tags = load_tag_set(&state, video_id).await?;
    let tags = match viewer {
        ViewerRole::Admin => tags,
        ViewerRole::Public => tags
            .into_iter()
            .filter(|t| t.status == wornby_core::tag::TagStatus::Approved)
            .collect(),
    };
    Ok(Json(tags))
}

/// GET /api/v1/videos/{id}/tags/visible?t=SECS
///
/// Tags that should render as overlays at playback time `t`, for the
/// caller's viewer class. Pure query; safe to poll on every timeline tick.
pub async fn visible_tags(
    State(state): State<AppState>,
    OptionalViewer(viewer): OptionalViewer,
    Path(video_id): Path<DbId>,
    Query(query): Query<VisibleQuery>,
) -> AppResult<Json<Vec<ProductTag>>> {
    let t = query.t.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Missing required query parameter: t".into(),
        ))
    })?;
    if !t.is_finite() || t < 0.0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Playback time must be a non-negative number, got {t}"
        ))));
    }

    let tags = load_tag_set(&state, video_id).await?;
    let visible: Vec<ProductTag> = overlay::visible_tags(&tags, t, viewer).cloned().collect();
    Ok(Json(visible))
}

/// GET /api/v1/videos/{id}/tags/counts (editor)
pub async fn tag_counts(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(video_id): Path<DbId>,
) -> AppResult<Json<TagCounts>> {
    let tags = load_tag_set(&state, video_id).await?;
    let by_source = overlay::count_by_source(&tags);
    Ok(Json(TagCounts {
        pending: overlay::pending_count(&tags),
        ai: by_source.ai,
        manual: by_source.manual,
    }))
}

// ---------------------------------------------------------------------------
// Handlers: mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/videos/{id}/tags (editor)
///
/// Place a manual tag. Manual tags are born approved and carry no
/// confidence score.
pub async fn create_manual_tag(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(video_id): Path<DbId>,
    Json(input): Json<CreateManualTagRequest>,
) -> AppResult<(StatusCode, Json<ProductTag>)> {
    let mut tags = load_tag_set(&state, video_id).await?;
    let tag = overlay::create_manual_tag(
        &mut tags,
        video_id,
        input.position,
        input.time_start,
        input.time_end,
        input.product_id,
        input.product,
    )?
    .clone();

    let row = VideoTagRepo::insert(&state.pool, &tag).await?;
    tracing::info!(user_id = user.user_id, video_id, tag_id = row.id, "Manual tag placed");
    Ok((StatusCode::CREATED, Json(row.into_domain()?)))
}

/// POST /api/v1/videos/{id}/tags/detections (admin)
///
/// Ingest a detector batch. Atomic both in memory (engine validation) and
/// in storage (single transaction): a half-applied run never surfaces.
pub async fn ingest_detections(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(video_id): Path<DbId>,
    Json(input): Json<IngestDetectionsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<ProductTag>>>)> {
    let mut tags = load_tag_set(&state, video_id).await?;
    let accepted: Vec<ProductTag> =
        overlay::ingest_detected_tags(&mut tags, video_id, &input.detections)?.to_vec();

    let rows = VideoTagRepo::insert_batch(&state.pool, &accepted).await?;
    tracing::info!(
        user_id = user.user_id,
        video_id,
        count = rows.len(),
        "Detector batch ingested"
    );
    let data = rows
        .into_iter()
        .map(VideoTagRow::into_domain)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// POST /api/v1/tags/{id}/moderate (admin)
///
/// Approve or reject an AI-sourced tag. Re-moderation is allowed (decisions
/// can be reversed); manual tags are rejected with 409.
pub async fn moderate_tag(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(tag_id): Path<DbId>,
    Json(input): Json<ModerateRequest>,
) -> AppResult<Json<ProductTag>> {
    let row = find_tag_row(&state, tag_id).await?;
    let mut tags = load_tag_set(&state, row.video_id).await?;
    let decided = overlay::moderate(&mut tags, tag_id, input.decision)?.clone();

    let updated = VideoTagRepo::update_status(&state.pool, tag_id, decided.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductTag",
            id: tag_id,
        }))?;
    tracing::info!(
        user_id = user.user_id,
        tag_id,
        decision = ?input.decision,
        "Tag moderated"
    );
    Ok(Json(updated.into_domain()?))
}

/// PUT /api/v1/tags/{id} (editor)
///
/// Partial edit of position, time window, status, or product association.
/// `id` and `source` are immutable.
pub async fn update_tag(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(tag_id): Path<DbId>,
    Json(patch): Json<TagPatch>,
) -> AppResult<Json<ProductTag>> {
    let row = find_tag_row(&state, tag_id).await?;
    let mut tags = load_tag_set(&state, row.video_id).await?;
    let merged = overlay::update_tag(&mut tags, tag_id, &patch)?.clone();

    let updated = VideoTagRepo::update(&state.pool, tag_id, &merged)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductTag",
            id: tag_id,
        }))?;
    Ok(Json(updated.into_domain()?))
}

/// DELETE /api/v1/tags/{id} (editor)
pub async fn delete_tag(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(tag_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = VideoTagRepo::delete(&state.pool, tag_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProductTag",
            id: tag_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a video's full tag set as the engine's working copy.
///
/// Fails with 404 if the video itself does not exist, so tag routes never
/// report an empty set for a bogus video id.
async fn load_tag_set(state: &AppState, video_id: DbId) -> AppResult<Vec<ProductTag>> {
    VideoRepo::find_by_id(&state.pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;
    let rows = VideoTagRepo::list_by_video(&state.pool, video_id).await?;
    Ok(rows_into_domain(rows)?)
}

async fn find_tag_row(state: &AppState, tag_id: DbId) -> AppResult<VideoTagRow> {
    VideoTagRepo::find_by_id(&state.pool, tag_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductTag",
            id: tag_id,
        }))
}
