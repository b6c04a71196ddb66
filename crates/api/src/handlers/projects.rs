//! Admin handlers for the authenticated tenant's projects.
//!
//! The tenant scope always comes from the access token; ids that belong
//! to another tenant 404 exactly like ids that do not exist.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, Project, UpdateProject};
use folio_db::repositories::ProjectRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    pub featured: Option<bool>,
}

/// GET /api/admin/projects
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool, user.user_id, query.featured).await?;
    Ok(Json(projects))
}

/// POST /api/admin/projects
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(user_id = user.user_id, project_id = project.id, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/admin/projects/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    Ok(Json(project))
}

/// PUT /api/admin/projects/{id}
///
/// Partial update: absent fields keep their stored values.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    Ok(Json(project))
}

/// DELETE /api/admin/projects/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, user.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    tracing::info!(user_id = user.user_id, project_id = id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}
