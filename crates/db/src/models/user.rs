//! Tenant (user) entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full tenant row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    /// Legacy flag; every tenant administers their own portfolio.
    pub is_admin: bool,
    /// Platform-level privilege held by at most a few tenants.
    pub super_admin: bool,
    pub email: Option<String>,
    pub custom_domain: Option<String>,
    pub created_at: Timestamp,
}

/// Safe tenant representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub is_admin: bool,
    pub super_admin: bool,
    pub email: Option<String>,
    pub custom_domain: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            is_admin: user.is_admin,
            super_admin: user.super_admin,
            email: user.email,
            custom_domain: user.custom_domain,
        }
    }
}

/// DTO for creating a new tenant. The username must already be normalized
/// and validated (`folio_core::username::validate`).
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
}
