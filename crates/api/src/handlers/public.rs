//! Unauthenticated read handlers for public portfolio pages.
//!
//! Every route resolves a tenant from the `{username}` path segment (the
//! frontend resolves custom domains to a username first, via
//! `/resolve-domain`). Sensitive setting keys are stripped here and only
//! here; admin reads see everything.

use axum::extract::{Path, Query, State};
use axum::Json;
use folio_core::error::CoreError;
use folio_core::settings::{is_public_key, sensitive_keys};
use folio_core::types::DbId;
use folio_core::username;
use folio_db::models::design_work::DesignWork;
use folio_db::models::project::Project;
use folio_db::models::user::User;
use folio_db::repositories::{DesignWorkRepo, ProjectRepo, SettingRepo, UserRepo};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::handlers::designs::ListDesignsQuery;
use crate::handlers::domain::normalize_domain;
use crate::handlers::projects::ListProjectsQuery;
use crate::handlers::settings::settings_object;
use crate::state::AppState;

/// Design work as rendered publicly, with the primary image resolved.
/// An out-of-range index degrades to `null` rather than an error.
#[derive(Debug, Serialize)]
pub struct PublicDesignWork {
    #[serde(flatten)]
    pub work: DesignWork,
    pub primary_image_url: Option<String>,
}

impl From<DesignWork> for PublicDesignWork {
    fn from(work: DesignWork) -> Self {
        let primary_image_url = work.primary_image_url().map(str::to_string);
        PublicDesignWork {
            work,
            primary_image_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolveDomainQuery {
    pub domain: String,
}

#[derive(Debug, Serialize)]
pub struct ResolvedTenant {
    pub username: String,
}

/// Resolve the portfolio owner from a `{username}` path segment.
async fn tenant_by_username(state: &AppState, username: &str) -> AppResult<User> {
    let normalized = username::normalize(username);
    UserRepo::find_by_username(&state.pool, &normalized)
        .await?
        .ok_or(AppError::Core(CoreError::TenantNotFound("Portfolio")))
}

/// GET /api/resolve-domain?domain=...
///
/// Map a custom domain to its owning username. Unmapped domains 404,
/// which callers treat as "serve the platform's own pages".
pub async fn resolve_domain(
    State(state): State<AppState>,
    Query(query): Query<ResolveDomainQuery>,
) -> AppResult<Json<ResolvedTenant>> {
    let domain = normalize_domain(&query.domain).map_err(AppError::Core)?;

    let owner = UserRepo::find_by_domain(&state.pool, &domain)
        .await?
        .ok_or(AppError::Core(CoreError::TenantNotFound("Domain")))?;

    Ok(Json(ResolvedTenant {
        username: owner.username,
    }))
}

/// GET /api/u/{username}/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<ListProjectsQuery>,
) -> AppResult<Json<Vec<Project>>> {
    let tenant = tenant_by_username(&state, &username).await?;
    let projects = ProjectRepo::list(&state.pool, tenant.id, query.featured).await?;
    Ok(Json(projects))
}

/// GET /api/u/{username}/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path((username, id)): Path<(String, DbId)>,
) -> AppResult<Json<Project>> {
    let tenant = tenant_by_username(&state, &username).await?;
    let project = ProjectRepo::find_by_id(&state.pool, tenant.id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// GET /api/u/{username}/designs
pub async fn list_designs(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<ListDesignsQuery>,
) -> AppResult<Json<Vec<PublicDesignWork>>> {
    let tenant = tenant_by_username(&state, &username).await?;
    let works = DesignWorkRepo::list(
        &state.pool,
        tenant.id,
        query.category.as_deref(),
        query.featured,
    )
    .await?;
    Ok(Json(works.into_iter().map(PublicDesignWork::from).collect()))
}

/// GET /api/u/{username}/designs/{id}
pub async fn get_design(
    State(state): State<AppState>,
    Path((username, id)): Path<(String, DbId)>,
) -> AppResult<Json<PublicDesignWork>> {
    let tenant = tenant_by_username(&state, &username).await?;
    let work = DesignWorkRepo::find_by_id(&state.pool, tenant.id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DesignWork",
            id,
        }))?;
    Ok(Json(work.into()))
}

/// GET /api/u/{username}/settings
///
/// All public settings as one object. Sensitive keys never appear,
/// whether or not they exist in storage.
pub async fn get_settings(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Map<String, Value>>> {
    let tenant = tenant_by_username(&state, &username).await?;
    let settings = SettingRepo::get_all(&state.pool, tenant.id, &sensitive_keys()).await?;
    Ok(Json(settings_object(settings)))
}

/// GET /api/u/{username}/settings/{key}
///
/// A sensitive key 404s identically to a missing one.
pub async fn get_setting(
    State(state): State<AppState>,
    Path((username, key)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    let tenant = tenant_by_username(&state, &username).await?;

    if !is_public_key(&key) {
        return Err(AppError::Core(CoreError::TenantNotFound("Setting")));
    }

    let setting = SettingRepo::get(&state.pool, tenant.id, &key)
        .await?
        .ok_or(AppError::Core(CoreError::TenantNotFound("Setting")))?;

    Ok(Json(setting.value))
}
