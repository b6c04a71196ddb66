//! Admin handlers for registration invites.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::invite::Invite;
use folio_db::repositories::{InviteRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    /// Days until expiry; omit for a non-expiring invite.
    pub expires_in_days: Option<i64>,
}

/// Only tenants with portfolio-admin rights may mint invites.
async fn require_admin(state: &AppState, user: &AuthUser) -> AppResult<()> {
    let record = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    if !record.is_admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins may manage invites".into(),
        )));
    }
    Ok(())
}

/// POST /api/admin/invites
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateInviteRequest>,
) -> AppResult<impl IntoResponse> {
    require_admin(&state, &user).await?;

    let expires_at = match input.expires_in_days {
        Some(days) if days <= 0 => {
            return Err(AppError::Core(CoreError::Validation(
                "expires_in_days must be positive".into(),
            )));
        }
        Some(days) => Some(Utc::now() + Duration::days(days)),
        None => None,
    };

    let invite = InviteRepo::create(&state.pool, Some(user.user_id), expires_at).await?;

    tracing::info!(user_id = user.user_id, invite_id = invite.id, "Invite created");

    Ok((StatusCode::CREATED, Json(invite)))
}

/// GET /api/admin/invites
///
/// Invites created by the caller, most recent first.
pub async fn list(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Invite>>> {
    require_admin(&state, &user).await?;

    let invites = InviteRepo::list_by_creator(&state.pool, user.user_id).await?;
    Ok(Json(invites))
}

/// DELETE /api/admin/invites/{id}
///
/// Revoke an invite the caller created. Foreign invites 404.
pub async fn revoke(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_admin(&state, &user).await?;

    let revoked = InviteRepo::revoke(&state.pool, user.user_id, id).await?;
    if !revoked {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Invite",
            id,
        }));
    }

    tracing::info!(user_id = user.user_id, invite_id = id, "Invite revoked");

    Ok(StatusCode::NO_CONTENT)
}
