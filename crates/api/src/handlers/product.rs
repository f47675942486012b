//! Handlers for the product catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use wornby_core::error::CoreError;
use wornby_core::types::DbId;
use wornby_db::models::product::{CreateProduct, Product, UpdateProduct};
use wornby_db::repositories::{CelebrityRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/celebrities/{id}/products
pub async fn list_by_celebrity(
    State(state): State<AppState>,
    Path(celebrity_id): Path<DbId>,
) -> AppResult<Json<Vec<Product>>> {
    ensure_celebrity_exists(&state, celebrity_id).await?;
    let products = ProductRepo::list_by_celebrity(&state.pool, celebrity_id).await?;
    Ok(Json(products))
}

/// POST /api/v1/celebrities/{id}/products (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(celebrity_id): Path<DbId>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    ensure_celebrity_exists(&state, celebrity_id).await?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Product name must not be empty".into(),
        )));
    }
    let product = ProductRepo::create(&state.pool, celebrity_id, &input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/v1/products/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// DELETE /api/v1/products/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_celebrity_exists(state: &AppState, id: DbId) -> AppResult<()> {
    CelebrityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Celebrity",
            id,
        }))?;
    Ok(())
}
