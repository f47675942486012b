//! Route definitions for celebrity profiles and their nested resources.
//!
//! ```text
//! GET    /                  -> list
//! POST   /                  -> create (admin)
//! GET    /{id}              -> get
//! PUT    /{id}              -> update (admin)
//! DELETE /{id}              -> delete (admin)
//! GET    /{id}/products     -> product list
//! POST   /{id}/products     -> product create (admin)
//! GET    /{id}/videos       -> video list
//! POST   /{id}/videos       -> video create (admin)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{celebrity, product, video};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(celebrity::list).post(celebrity::create))
        .route(
            "/{id}",
            get(celebrity::get)
                .put(celebrity::update)
                .delete(celebrity::delete),
        )
        .route(
            "/{id}/products",
            get(product::list_by_celebrity).post(product::create),
        )
        .route(
            "/{id}/videos",
            get(video::list_by_celebrity).post(video::create),
        )
}
