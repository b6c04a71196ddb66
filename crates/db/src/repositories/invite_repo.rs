//! Repository for the `invites` table.

use folio_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::invite::Invite;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, token, created_by, used_by, created_at, expires_at, used_at";

/// Provides CRUD operations for registration invites.
pub struct InviteRepo;

impl InviteRepo {
    /// Create a new invite with a random opaque token.
    ///
    /// `created_by` is NULL for system-issued invites.
    pub async fn create(
        pool: &PgPool,
        created_by: Option<DbId>,
        expires_at: Option<Timestamp>,
    ) -> Result<Invite, sqlx::Error> {
        let token = Uuid::new_v4().simple().to_string();
        let query = format!(
            "INSERT INTO invites (token, created_by, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invite>(&query)
            .bind(&token)
            .bind(created_by)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an invite by its token.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Invite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invites WHERE token = $1");
        sqlx::query_as::<_, Invite>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List invites created by a tenant, most recent first.
    pub async fn list_by_creator(pool: &PgPool, creator: DbId) -> Result<Vec<Invite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invites WHERE created_by = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Invite>(&query)
            .bind(creator)
            .fetch_all(pool)
            .await
    }

    /// Mark an invite consumed by a new tenant. Runs inside the
    /// registration transaction.
    ///
    /// The guard clause makes the unused -> used transition atomic: an
    /// already-used or expired token updates zero rows and `false` is
    /// returned, rolling the registration back.
    pub async fn consume(
        conn: &mut PgConnection,
        token: &str,
        used_by: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invites SET used_by = $2, used_at = NOW()
             WHERE token = $1
               AND used_at IS NULL
               AND (expires_at IS NULL OR expires_at > NOW())",
        )
        .bind(token)
        .bind(used_by)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete (revoke) an invite, only when owned by the caller.
    /// Returns `true` if a row was removed.
    pub async fn revoke(pool: &PgPool, creator: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invites WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(creator)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
