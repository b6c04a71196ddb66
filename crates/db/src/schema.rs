//! Schema evolution manager.
//!
//! [`ensure_schema`] runs an ordered list of named, idempotent steps on
//! every process start, before the HTTP listener binds. Each step
//! re-checks its own preconditions against `information_schema` /
//! `pg_catalog`, so re-running (including concurrent starts of multiple
//! instances against the same database) is safe. Any step failure must
//! abort startup: serving requests against a half-migrated schema is
//! worse than not serving at all.
//!
//! The multi-tenant backfill (step 3) converts a legacy single-tenant
//! dataset in place: resource tables gain a nullable `user_id`, every
//! existing row is assigned to the earliest-created tenant, and the
//! column is then tightened to NOT NULL. With zero tenants the column
//! stays nullable and a later run completes the tightening.

use sqlx::PgPool;

/// Resource tables that carry per-tenant ownership.
const TENANT_TABLES: &[&str] = &["projects", "design_works", "site_settings"];

/// Apply all schema steps in dependency order. Idempotent.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!(step = "create_base_tables", "applying schema step");
    create_base_tables(pool).await?;

    tracing::info!(step = "add_missing_columns", "applying schema step");
    add_missing_columns(pool).await?;

    tracing::info!(step = "multi_tenant_backfill", "applying schema step");
    multi_tenant_backfill(pool).await?;

    tracing::info!(step = "settings_composite_unique", "applying schema step");
    settings_composite_unique(pool).await?;

    tracing::info!("schema is up to date");
    Ok(())
}

/// Step 1: create any missing tables with their current definitions.
///
/// Fresh installs get the fully multi-tenant shape directly; tables that
/// already exist (possibly in a legacy shape) are left for steps 2 and 3.
async fn create_base_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username VARCHAR(50) NOT NULL CONSTRAINT uq_users_username UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            is_admin BOOLEAN NOT NULL DEFAULT TRUE,
            super_admin BOOLEAN NOT NULL DEFAULT FALSE,
            email VARCHAR(255),
            custom_domain VARCHAR(255),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS invites (
            id BIGSERIAL PRIMARY KEY,
            token VARCHAR(64) NOT NULL UNIQUE,
            created_by BIGINT REFERENCES users(id),
            used_by BIGINT REFERENCES users(id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            expires_at TIMESTAMPTZ,
            used_at TIMESTAMPTZ
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS projects (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(200) NOT NULL,
            description TEXT NOT NULL,
            tech_stack JSONB NOT NULL DEFAULT '[]',
            image_url VARCHAR(500),
            video_url VARCHAR(500),
            gallery JSONB NOT NULL DEFAULT '[]',
            github_link VARCHAR(500),
            live_url VARCHAR(500),
            links JSONB NOT NULL DEFAULT '[]',
            featured BOOLEAN NOT NULL DEFAULT FALSE,
            display_order INTEGER NOT NULL DEFAULT 0,
            user_id BIGINT NOT NULL REFERENCES users(id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS design_works (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(200) NOT NULL,
            description TEXT,
            category VARCHAR(50) NOT NULL,
            images JSONB NOT NULL DEFAULT '[]',
            primary_image INTEGER NOT NULL DEFAULT 0,
            video_urls JSONB NOT NULL DEFAULT '[]',
            client VARCHAR(200),
            year INTEGER,
            featured BOOLEAN NOT NULL DEFAULT FALSE,
            display_order INTEGER NOT NULL DEFAULT 0,
            user_id BIGINT NOT NULL REFERENCES users(id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS site_settings (
            id BIGSERIAL PRIMARY KEY,
            key VARCHAR(100) NOT NULL,
            value JSONB NOT NULL,
            user_id BIGINT NOT NULL REFERENCES users(id),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Step 2: additive column evolution.
///
/// For each table, columns present in the target schema but absent in
/// storage are added with safe defaults. Never destructive; ownership
/// columns are handled by the backfill step instead.
async fn add_missing_columns(pool: &PgPool) -> Result<(), sqlx::Error> {
    let targets: &[(&str, &str, &str)] = &[
        ("users", "is_admin", "BOOLEAN NOT NULL DEFAULT TRUE"),
        ("users", "super_admin", "BOOLEAN NOT NULL DEFAULT FALSE"),
        ("users", "email", "VARCHAR(255)"),
        ("users", "custom_domain", "VARCHAR(255)"),
        ("users", "created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        ("projects", "video_url", "VARCHAR(500)"),
        ("projects", "gallery", "JSONB NOT NULL DEFAULT '[]'"),
        ("projects", "links", "JSONB NOT NULL DEFAULT '[]'"),
        ("projects", "featured", "BOOLEAN NOT NULL DEFAULT FALSE"),
        ("projects", "display_order", "INTEGER NOT NULL DEFAULT 0"),
        ("design_works", "video_urls", "JSONB NOT NULL DEFAULT '[]'"),
        ("design_works", "primary_image", "INTEGER NOT NULL DEFAULT 0"),
        ("design_works", "featured", "BOOLEAN NOT NULL DEFAULT FALSE"),
        ("design_works", "display_order", "INTEGER NOT NULL DEFAULT 0"),
        ("site_settings", "updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ];

    for (table, column, definition) in targets {
        if !column_exists(pool, table, column).await? {
            tracing::info!(table, column, "adding missing column");
            sqlx::query(&format!(
                "ALTER TABLE {table} ADD COLUMN {column} {definition}"
            ))
            .execute(pool)
            .await?;
        }
    }

    // custom_domain must be globally unique when set.
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_users_custom_domain
         ON users (custom_domain) WHERE custom_domain IS NOT NULL",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Step 3: one-time multi-tenant ownership backfill.
///
/// A resource table without `user_id` gains it as a nullable FK. If any
/// tenant exists, legacy rows are assigned to the earliest-created tenant
/// (ascending id) and the column is tightened to NOT NULL. With no
/// tenants yet, the column stays nullable until a later run. Legacy
/// settings rows whose key the tenant already seeded are dropped instead
/// of assigned, keeping (user_id, key) unique.
async fn multi_tenant_backfill(pool: &PgPool) -> Result<(), sqlx::Error> {
    for table in TENANT_TABLES {
        if !column_exists(pool, table, "user_id").await? {
            tracing::info!(table, "adding ownership column");
            sqlx::query(&format!(
                "ALTER TABLE {table} ADD COLUMN user_id BIGINT REFERENCES users(id)"
            ))
            .execute(pool)
            .await?;
        }

        if column_is_nullable(pool, table, "user_id").await? {
            let first_tenant: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM users ORDER BY id ASC LIMIT 1")
                    .fetch_optional(pool)
                    .await?;

            match first_tenant {
                Some((tenant_id,)) => {
                    // A tenant registering during the zero-tenant window
                    // already holds seeded settings rows; a legacy row with
                    // the same key would collide with (user_id, key)
                    // uniqueness. The tenant's own document wins.
                    if *table == "site_settings" {
                        let shadowed = sqlx::query(
                            "DELETE FROM site_settings s
                             WHERE s.user_id IS NULL
                               AND EXISTS (
                                   SELECT 1 FROM site_settings o
                                   WHERE o.user_id = $1 AND o.key = s.key
                               )",
                        )
                        .bind(tenant_id)
                        .execute(pool)
                        .await?
                        .rows_affected();
                        if shadowed > 0 {
                            tracing::info!(
                                shadowed,
                                "dropped legacy settings shadowed by seeded documents"
                            );
                        }
                    }

                    let assigned = sqlx::query(&format!(
                        "UPDATE {table} SET user_id = $1 WHERE user_id IS NULL"
                    ))
                    .bind(tenant_id)
                    .execute(pool)
                    .await?
                    .rows_affected();

                    sqlx::query(&format!(
                        "ALTER TABLE {table} ALTER COLUMN user_id SET NOT NULL"
                    ))
                    .execute(pool)
                    .await?;

                    tracing::info!(table, tenant_id, assigned, "ownership backfill complete");
                }
                None => {
                    // First boot of an empty install: nothing to assign.
                    tracing::info!(table, "no tenants yet, ownership column stays nullable");
                }
            }
        }
    }

    Ok(())
}

/// Step 4: replace the legacy global uniqueness on `site_settings.key`
/// with composite `(user_id, key)` uniqueness.
async fn settings_composite_unique(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Drop any unique constraint covering exactly (key).
    let legacy_constraints: Vec<(String,)> = sqlx::query_as(
        "SELECT c.conname
         FROM pg_constraint c
         JOIN pg_class t ON t.oid = c.conrelid
         WHERE t.relname = 'site_settings'
           AND c.contype = 'u'
           AND (
               SELECT array_agg(a.attname::text ORDER BY a.attname)
               FROM unnest(c.conkey) AS k
               JOIN pg_attribute a ON a.attrelid = t.oid AND a.attnum = k
           ) = ARRAY['key']",
    )
    .fetch_all(pool)
    .await?;

    for (name,) in legacy_constraints {
        tracing::info!(constraint = %name, "dropping legacy settings key constraint");
        sqlx::query(&format!(
            "ALTER TABLE site_settings DROP CONSTRAINT IF EXISTS \"{name}\""
        ))
        .execute(pool)
        .await?;
    }

    // Drop any standalone unique index on (key) alone.
    let legacy_indexes: Vec<(String,)> = sqlx::query_as(
        "SELECT i.relname
         FROM pg_index x
         JOIN pg_class t ON t.oid = x.indrelid
         JOIN pg_class i ON i.oid = x.indexrelid
         WHERE t.relname = 'site_settings'
           AND x.indisunique
           AND x.indnatts = 1
           AND i.relname <> 'uq_site_settings_user_key'
           AND (
               SELECT a.attname FROM pg_attribute a
               WHERE a.attrelid = t.oid AND a.attnum = x.indkey[0]
           ) = 'key'",
    )
    .fetch_all(pool)
    .await?;

    for (name,) in legacy_indexes {
        tracing::info!(index = %name, "dropping legacy settings key index");
        sqlx::query(&format!("DROP INDEX IF EXISTS \"{name}\""))
            .execute(pool)
            .await?;
    }

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_site_settings_user_key
         ON site_settings (user_id, key)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Whether `table.column` exists in the public schema.
async fn column_exists(pool: &PgPool, table: &str, column: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as(
        "SELECT 1 FROM information_schema.columns
         WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
    )
    .bind(table)
    .bind(column)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

/// Whether `table.column` currently accepts NULL.
async fn column_is_nullable(pool: &PgPool, table: &str, column: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT is_nullable FROM information_schema.columns
         WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
    )
    .bind(table)
    .bind(column)
    .fetch_optional(pool)
    .await?;
    Ok(matches!(row, Some((nullable,)) if nullable == "YES"))
}
