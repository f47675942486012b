//! Role-based access control extractors.
//!
//! [`RequireAdmin`] and [`RequireEditor`] wrap [`AuthUser`] and reject
//! requests whose role does not meet the minimum. [`OptionalViewer`] resolves
//! the overlay engine's viewer class without requiring authentication at all:
//! tag visibility queries are public endpoints where an absent or invalid
//! token simply means a public viewer.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use wornby_core::error::CoreError;
use wornby_core::roles::{ViewerRole, ROLE_ADMIN, ROLE_EDITOR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `editor` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_EDITOR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Editor or Admin role required".into(),
            )));
        }
        Ok(RequireEditor(user))
    }
}

/// Resolves the tag-visibility viewer class from an optional bearer token.
///
/// Never rejects: a missing, malformed, or expired token yields
/// [`ViewerRole::Public`]. The engine receives the role explicitly; nothing
/// downstream consults session state.
pub struct OptionalViewer(pub ViewerRole);

impl FromRequestParts<AppState> for OptionalViewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let viewer = match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => ViewerRole::from_role_name(&user.role),
            Err(_) => ViewerRole::Public,
        };
        Ok(OptionalViewer(viewer))
    }
}
