//! Route definitions for catalog products (non-nested operations).
//!
//! ```text
//! PUT    /{id}  -> update (admin)
//! DELETE /{id}  -> delete (admin)
//! ```

use axum::routing::put;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(product::update).delete(product::delete))
}
