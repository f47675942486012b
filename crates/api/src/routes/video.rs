//! Route definitions for videos and their tag overlay surface.
//!
//! ```text
//! GET    /{id}                   -> get
//! PUT    /{id}                   -> update (admin)
//! DELETE /{id}                   -> delete (admin)
//! GET    /{id}/tags              -> list_tags (role-filtered)
//! POST   /{id}/tags              -> create_manual_tag (editor)
//! GET    /{id}/tags/visible      -> visible_tags (public, ?t=SECS)
//! GET    /{id}/tags/counts       -> tag_counts (editor)
//! POST   /{id}/tags/detections   -> ingest_detections (admin)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{video, video_tag};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(video::get).put(video::update).delete(video::delete),
        )
        .route(
            "/{id}/tags",
            get(video_tag::list_tags).post(video_tag::create_manual_tag),
        )
        .route("/{id}/tags/visible", get(video_tag::visible_tags))
        .route("/{id}/tags/counts", get(video_tag::tag_counts))
        .route("/{id}/tags/detections", post(video_tag::ingest_detections))
}
