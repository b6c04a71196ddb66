//! Admin handlers for the authenticated tenant's settings documents.
//!
//! The store is an opaque `key -> JSON` map. Admin reads include
//! sensitive keys like `integrations`; only public reads filter them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_db::models::setting::Setting;
use folio_db::repositories::SettingRepo;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Upper bound matching the `key VARCHAR(100)` column.
const MAX_KEY_LEN: usize = 100;

/// Fold a list of setting rows into one `key -> value` object.
pub fn settings_object(settings: Vec<Setting>) -> Map<String, Value> {
    settings.into_iter().map(|s| (s.key, s.value)).collect()
}

fn validate_key(key: &str) -> AppResult<()> {
    if key.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Setting key must not be empty".into(),
        )));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Setting key must be at most {MAX_KEY_LEN} characters"
        ))));
    }
    Ok(())
}

/// GET /api/admin/settings
///
/// All of the tenant's settings as one object, sensitive keys included.
pub async fn get_all(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Map<String, Value>>> {
    let settings = SettingRepo::get_all(&state.pool, user.user_id, &[]).await?;
    Ok(Json(settings_object(settings)))
}

/// GET /api/admin/settings/{key}
pub async fn get_by_key(
    user: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<Value>> {
    let setting = SettingRepo::get(&state.pool, user.user_id, &key)
        .await?
        .ok_or(AppError::Core(CoreError::TenantNotFound("Setting")))?;

    Ok(Json(setting.value))
}

/// PUT /api/admin/settings/{key}
///
/// Wholesale replace: the body becomes the new document, no merging.
/// Unknown keys are accepted and stored untyped.
pub async fn upsert(
    user: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> AppResult<Json<Setting>> {
    validate_key(&key)?;

    let setting = SettingRepo::upsert(&state.pool, user.user_id, &key, &value).await?;

    tracing::info!(user_id = user.user_id, key = %key, "Setting updated");

    Ok(Json(setting))
}

/// DELETE /api/admin/settings/{key}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = SettingRepo::delete(&state.pool, user.user_id, &key).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::TenantNotFound("Setting")));
    }

    tracing::info!(user_id = user.user_id, key = %key, "Setting deleted");

    Ok(StatusCode::NO_CONTENT)
}
