//! Admin handlers for the authenticated tenant's design works.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::design_work::{CreateDesignWork, DesignWork, UpdateDesignWork};
use folio_db::repositories::DesignWorkRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListDesignsQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

/// GET /api/admin/designs
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListDesignsQuery>,
) -> AppResult<Json<Vec<DesignWork>>> {
    let works = DesignWorkRepo::list(
        &state.pool,
        user.user_id,
        query.category.as_deref(),
        query.featured,
    )
    .await?;
    Ok(Json(works))
}

/// POST /api/admin/designs
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDesignWork>,
) -> AppResult<impl IntoResponse> {
    let work = DesignWorkRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(user_id = user.user_id, design_id = work.id, "Design work created");

    Ok((StatusCode::CREATED, Json(work)))
}

/// GET /api/admin/designs/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DesignWork>> {
    let work = DesignWorkRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DesignWork",
            id,
        }))?;

    Ok(Json(work))
}

/// PUT /api/admin/designs/{id}
///
/// Partial update: absent fields keep their stored values.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDesignWork>,
) -> AppResult<Json<DesignWork>> {
    let work = DesignWorkRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DesignWork",
            id,
        }))?;

    Ok(Json(work))
}

/// DELETE /api/admin/designs/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DesignWorkRepo::delete(&state.pool, user.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "DesignWork",
            id,
        }));
    }

    tracing::info!(user_id = user.user_id, design_id = id, "Design work deleted");

    Ok(StatusCode::NO_CONTENT)
}
