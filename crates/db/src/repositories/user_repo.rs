//! Repository for the `users` table (the tenant directory).

use folio_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, password_hash, is_admin, super_admin, email, custom_domain, created_at";

/// Provides lookups and mutations for tenants.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new tenant. Runs on a connection so registration can keep
    /// tenant creation, settings seeding, and invite consumption in one
    /// transaction.
    pub async fn create(conn: &mut PgConnection, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, email)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.email)
            .fetch_one(conn)
            .await
    }

    /// Find a tenant by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tenant by normalized username. Usernames are lowercased at
    /// registration, so this is a direct equality match.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find the tenant owning a custom domain. Absence is a normal
    /// outcome (requests on the platform's own domain), not an error.
    pub async fn find_by_domain(pool: &PgPool, domain: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE custom_domain = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(domain)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear a tenant's custom domain, returning the updated row.
    pub async fn set_custom_domain(
        pool: &PgPool,
        id: DbId,
        domain: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET custom_domain = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(domain)
            .fetch_optional(pool)
            .await
    }
}
