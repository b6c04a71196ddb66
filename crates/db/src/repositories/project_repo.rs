//! Repository for the `projects` table. All operations are tenant-scoped.

use folio_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, tech_stack, image_url, video_url, gallery, \
                       github_link, live_url, links, featured, display_order, user_id, \
                       created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `tenant_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (title, description, tech_stack, image_url, video_url, gallery,
                 github_link, live_url, links, featured, display_order, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(Json(&input.tech_stack))
            .bind(&input.image_url)
            .bind(&input.video_url)
            .bind(Json(&input.gallery))
            .bind(&input.github_link)
            .bind(&input.live_url)
            .bind(Json(&input.links))
            .bind(input.featured)
            .bind(input.display_order)
            .bind(tenant_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID within the tenant's namespace.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's projects ordered by explicit rank ascending,
    /// ties broken by descending id (newest-first among equal rank).
    pub async fn list(
        pool: &PgPool,
        tenant_id: DbId,
        featured: Option<bool>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE user_id = $1 AND ($2::boolean IS NULL OR featured = $2)
             ORDER BY display_order ASC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(tenant_id)
            .bind(featured)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` when the id does not exist in the tenant's namespace.
    pub async fn update(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                tech_stack = COALESCE($5, tech_stack),
                image_url = COALESCE($6, image_url),
                video_url = COALESCE($7, video_url),
                gallery = COALESCE($8, gallery),
                github_link = COALESCE($9, github_link),
                live_url = COALESCE($10, live_url),
                links = COALESCE($11, links),
                featured = COALESCE($12, featured),
                display_order = COALESCE($13, display_order),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.tech_stack.as_ref().map(Json))
            .bind(&input.image_url)
            .bind(&input.video_url)
            .bind(input.gallery.as_ref().map(Json))
            .bind(&input.github_link)
            .bind(&input.live_url)
            .bind(input.links.as_ref().map(Json))
            .bind(input.featured)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project within the tenant's namespace.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, tenant_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
