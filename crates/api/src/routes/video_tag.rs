//! Route definitions for tag-id-scoped operations.
//!
//! ```text
//! PUT    /{id}           -> update_tag (editor)
//! DELETE /{id}           -> delete_tag (editor)
//! POST   /{id}/moderate  -> moderate_tag (admin)
//! ```

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::video_tag;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            put(video_tag::update_tag).delete(video_tag::delete_tag),
        )
        .route("/{id}/moderate", post(video_tag::moderate_tag))
}
