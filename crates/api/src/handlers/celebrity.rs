//! Handlers for the `/celebrities` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use wornby_core::error::CoreError;
use wornby_core::types::DbId;
use wornby_db::models::celebrity::{Celebrity, CreateCelebrity, UpdateCelebrity};
use wornby_db::repositories::CelebrityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/celebrities
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Celebrity>>> {
    let celebrities = CelebrityRepo::list(&state.pool).await?;
    Ok(Json(celebrities))
}

/// GET /api/v1/celebrities/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Celebrity>> {
    let celebrity = CelebrityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Celebrity",
            id,
        }))?;
    Ok(Json(celebrity))
}

/// POST /api/v1/celebrities (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(input): Json<CreateCelebrity>,
) -> AppResult<(StatusCode, Json<Celebrity>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Celebrity name must not be empty".into(),
        )));
    }
    let celebrity = CelebrityRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(celebrity)))
}

/// PUT /api/v1/celebrities/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCelebrity>,
) -> AppResult<Json<Celebrity>> {
    let celebrity = CelebrityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Celebrity",
            id,
        }))?;
    Ok(Json(celebrity))
}

/// DELETE /api/v1/celebrities/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CelebrityRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Celebrity",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
