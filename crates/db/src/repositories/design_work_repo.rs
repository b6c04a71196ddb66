//! Repository for the `design_works` table. All operations are tenant-scoped.

use folio_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::design_work::{CreateDesignWork, DesignWork, UpdateDesignWork};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, images, primary_image, video_urls, \
                       client, year, featured, display_order, user_id, created_at, updated_at";

/// Provides CRUD operations for design works.
pub struct DesignWorkRepo;

impl DesignWorkRepo {
    /// Insert a new design work owned by `tenant_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateDesignWork,
    ) -> Result<DesignWork, sqlx::Error> {
        let query = format!(
            "INSERT INTO design_works
                (title, description, category, images, primary_image, video_urls,
                 client, year, featured, display_order, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignWork>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(Json(&input.images))
            .bind(input.primary_image)
            .bind(Json(&input.video_urls))
            .bind(&input.client)
            .bind(input.year)
            .bind(input.featured)
            .bind(input.display_order)
            .bind(tenant_id)
            .fetch_one(pool)
            .await
    }

    /// Find a design work by ID within the tenant's namespace.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<DesignWork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM design_works WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, DesignWork>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's design works, optionally filtered by category,
    /// ordered by explicit rank ascending then descending id.
    pub async fn list(
        pool: &PgPool,
        tenant_id: DbId,
        category: Option<&str>,
        featured: Option<bool>,
    ) -> Result<Vec<DesignWork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM design_works
             WHERE user_id = $1
               AND ($2::varchar IS NULL OR category = $2)
               AND ($3::boolean IS NULL OR featured = $3)
             ORDER BY display_order ASC, id DESC"
        );
        sqlx::query_as::<_, DesignWork>(&query)
            .bind(tenant_id)
            .bind(category)
            .bind(featured)
            .fetch_all(pool)
            .await
    }

    /// Update a design work. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        input: &UpdateDesignWork,
    ) -> Result<Option<DesignWork>, sqlx::Error> {
        let query = format!(
            "UPDATE design_works SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                images = COALESCE($6, images),
                primary_image = COALESCE($7, primary_image),
                video_urls = COALESCE($8, video_urls),
                client = COALESCE($9, client),
                year = COALESCE($10, year),
                featured = COALESCE($11, featured),
                display_order = COALESCE($12, display_order),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignWork>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.images.as_ref().map(Json))
            .bind(input.primary_image)
            .bind(input.video_urls.as_ref().map(Json))
            .bind(&input.client)
            .bind(input.year)
            .bind(input.featured)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a design work within the tenant's namespace.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, tenant_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM design_works WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
