//! Repository for the `site_settings` table: a per-tenant key -> JSON map.

use folio_core::settings::REGISTRY;
use folio_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::setting::Setting;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, value, user_id, updated_at";

/// Provides operations over per-tenant settings documents.
pub struct SettingRepo;

impl SettingRepo {
    /// Fetch all settings for a tenant, excluding the given keys.
    ///
    /// Public reads pass the sensitive-key list here so keys like
    /// `integrations` never leave the store.
    pub async fn get_all(
        pool: &PgPool,
        tenant_id: DbId,
        exclude: &[&str],
    ) -> Result<Vec<Setting>, sqlx::Error> {
        let exclude: Vec<String> = exclude.iter().map(|k| k.to_string()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM site_settings
             WHERE user_id = $1 AND NOT (key = ANY($2))
             ORDER BY key ASC"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(tenant_id)
            .bind(&exclude)
            .fetch_all(pool)
            .await
    }

    /// Fetch one setting by key within the tenant's namespace.
    pub async fn get(
        pool: &PgPool,
        tenant_id: DbId,
        key: &str,
    ) -> Result<Option<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings WHERE user_id = $1 AND key = $2");
        sqlx::query_as::<_, Setting>(&query)
            .bind(tenant_id)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or wholesale-replace the document for `(tenant, key)`.
    ///
    /// Conflicts on the composite uniqueness are resolved in the store
    /// itself, never surfaced to the caller.
    pub async fn upsert(
        pool: &PgPool,
        tenant_id: DbId,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<Setting, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_settings (user_id, key, value)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, key)
             DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(tenant_id)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// Delete one setting. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, tenant_id: DbId, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM site_settings WHERE user_id = $1 AND key = $2")
            .bind(tenant_id)
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Seed the well-known default documents for a new tenant.
    ///
    /// Runs inside the registration transaction. `ON CONFLICT DO NOTHING`
    /// keeps it idempotent; an existing key is never overwritten.
    pub async fn seed_defaults(
        conn: &mut PgConnection,
        tenant_id: DbId,
    ) -> Result<(), sqlx::Error> {
        for spec in REGISTRY {
            sqlx::query(
                "INSERT INTO site_settings (user_id, key, value)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (user_id, key) DO NOTHING",
            )
            .bind(tenant_id)
            .bind(spec.key)
            .bind((spec.default)())
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}
