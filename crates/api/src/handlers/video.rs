//! Handlers for the `/videos` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use wornby_core::error::CoreError;
use wornby_core::types::DbId;
use wornby_db::models::video::{CreateVideo, UpdateVideo, Video};
use wornby_db::repositories::{CelebrityRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/celebrities/{id}/videos
pub async fn list_by_celebrity(
    State(state): State<AppState>,
    Path(celebrity_id): Path<DbId>,
) -> AppResult<Json<Vec<Video>>> {
    CelebrityRepo::find_by_id(&state.pool, celebrity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Celebrity",
            id: celebrity_id,
        }))?;
    let videos = VideoRepo::list_by_celebrity(&state.pool, celebrity_id).await?;
    Ok(Json(videos))
}

/// GET /api/v1/videos/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Video>> {
    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    Ok(Json(video))
}

/// POST /api/v1/celebrities/{id}/videos (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(celebrity_id): Path<DbId>,
    Json(input): Json<CreateVideo>,
) -> AppResult<(StatusCode, Json<Video>)> {
    CelebrityRepo::find_by_id(&state.pool, celebrity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Celebrity",
            id: celebrity_id,
        }))?;
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Video title must not be empty".into(),
        )));
    }
    let video = VideoRepo::create(&state.pool, celebrity_id, &input).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// PUT /api/v1/videos/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<Json<Video>> {
    let video = VideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    Ok(Json(video))
}

/// DELETE /api/v1/videos/{id} (admin)
///
/// Cascades to the video's tags at the database level.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = VideoRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
