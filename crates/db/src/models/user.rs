//! Account model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wornby_core::types::{DbId, Timestamp};

/// A row from the `users` table. `password_hash` never leaves this layer;
/// serialize [`PublicUser`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
}

/// The safe-to-serialize projection of a user.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub role: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            role: user.role.clone(),
        }
    }
}

/// DTO for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: String,
}
