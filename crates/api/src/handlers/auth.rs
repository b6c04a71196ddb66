//! Registration, login, and current-tenant handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::username;
use folio_db::models::user::{CreateUser, User, UserResponse};
use folio_db::repositories::{InviteRepo, SettingRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LEN};
use crate::config::RegistrationMode;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub invite_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token response shared by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserResponse,
}

fn auth_response(user: User, state: &AppState) -> AppResult<AuthResponse> {
    let token = generate_access_token(user.id, &user.username, user.super_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    Ok(AuthResponse {
        access_token: token,
        token_type: "bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user: user.into(),
    })
}

/// POST /api/auth/register
///
/// Create a new tenant. The username is validated before any invite is
/// touched, so a rejected username never burns a token. Tenant creation,
/// settings seeding, and invite consumption commit atomically.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let username = username::validate(&input.username).map_err(AppError::Core)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LEN)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    match state.config.registration_mode {
        RegistrationMode::Closed => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Registration is closed".into(),
            )));
        }
        RegistrationMode::Invite if input.invite_token.is_none() => {
            return Err(AppError::Core(CoreError::Validation(
                "An invite token is required to register".into(),
            )));
        }
        _ => {}
    }

    // Friendly pre-check; the unique constraint on users.username is the backstop.
    if UserRepo::find_by_username(&state.pool, &username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already taken".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let mut tx = state.pool.begin().await?;
    let user = UserRepo::create(
        &mut tx,
        &CreateUser {
            username,
            password_hash,
            email: input.email,
        },
    )
    .await?;
    SettingRepo::seed_defaults(&mut tx, user.id).await?;

    if state.config.registration_mode == RegistrationMode::Invite {
        let token = input.invite_token.as_deref().unwrap_or_default();
        if !InviteRepo::consume(&mut tx, token, user.id).await? {
            tx.rollback().await?;
            return Err(AppError::Core(CoreError::Validation(
                "Invalid or expired invite token".into(),
            )));
        }
    }
    tx.commit().await?;

    tracing::info!(user_id = user.id, username = %user.username, "Tenant registered");

    Ok((StatusCode::CREATED, Json(auth_response(user, &state)?)))
}

/// POST /api/auth/login
///
/// Authenticate by username and password. The failure message never
/// reveals whether the username exists.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let username = username::normalize(&input.username);

    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid username or password".into()))
        })?;

    let valid = verify_login(&input.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    tracing::info!(user_id = user.id, username = %user.username, "Tenant logged in");

    Ok(Json(auth_response(user, &state)?))
}

fn verify_login(password: &str, hash: &str) -> AppResult<bool> {
    crate::auth::password::verify_password(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))
}

/// GET /api/auth/me
///
/// Return the authenticated tenant's own record.
pub async fn me(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserResponse>> {
    let record = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    Ok(Json(record.into()))
}
