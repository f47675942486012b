//! Route definitions, one module per resource.

pub mod auth;
pub mod celebrity;
pub mod health;
pub mod product;
pub mod video;
pub mod video_tag;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
/// /auth/me                           current user (requires auth)
///
/// /celebrities                       list, create (admin)
/// /celebrities/{id}                  get, update, delete (admin)
/// /celebrities/{id}/products         list, create (admin)
/// /celebrities/{id}/videos           list, create (admin)
///
/// /products/{id}                     update, delete (admin)
///
/// /videos/{id}                       get, update, delete (admin)
/// /videos/{id}/tags                  list (role-filtered), create manual (editor)
/// /videos/{id}/tags/visible          overlay query at playback time (public)
/// /videos/{id}/tags/counts           moderation-queue counts (editor)
/// /videos/{id}/tags/detections       detector batch ingest (admin)
///
/// /tags/{id}                         update (editor), delete (editor)
/// /tags/{id}/moderate                approve/reject (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/celebrities", celebrity::router())
        .nest("/products", product::router())
        .nest("/videos", video::router())
        .nest("/tags", video_tag::router())
}
