//! Well-known role name constants and viewer-role resolution.
//!
//! Role names must match the seed data in
//! `20260815000001_create_users_table.sql`.

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_USER: &str = "user";

/// All valid account roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR, ROLE_USER];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

/// The two visibility classes the overlay engine distinguishes.
///
/// Every query takes the viewer explicitly; the engine never consults
/// ambient session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    /// Sees approved tags plus pending AI suggestions.
    Admin,
    /// Sees approved tags only.
    Public,
}

impl ViewerRole {
    /// Map an account role name to a viewer class.
    ///
    /// Admins and editors both work the moderation queue, so both see
    /// pending tags. Everything else (including unauthenticated callers)
    /// is public.
    pub fn from_role_name(role: &str) -> Self {
        if role == ROLE_ADMIN || role == ROLE_EDITOR {
            ViewerRole::Admin
        } else {
            ViewerRole::Public
        }
    }
}
