//! Custom-domain handlers: claim/release a domain and report its
//! verification status.
//!
//! Setting a domain registers it with the routing provider before the
//! mapping is persisted; if the provider rejects the registration,
//! nothing changes. Deregistration of an old domain is best-effort:
//! a stale entry at the provider is harmless, a lost new one is not.

use axum::extract::State;
use axum::Json;
use folio_core::domain::{verify_records, DnsVerification, DomainStatus};
use folio_core::error::CoreError;
use folio_db::models::user::{User, UserResponse};
use folio_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Longest hostname allowed by DNS.
const MAX_DOMAIN_LEN: usize = 253;

#[derive(Debug, Deserialize)]
pub struct SetDomainRequest {
    /// New domain, or `null` to release the current one.
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DomainStatusResponse {
    pub domain: Option<String>,
    pub status: DomainStatus,
    /// Per-record-type detail; absent when no domain is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsVerification>,
}

/// Lowercase, strip the trailing dot, and check basic hostname shape.
pub fn normalize_domain(raw: &str) -> Result<String, CoreError> {
    let domain = raw.trim().trim_end_matches('.').to_ascii_lowercase();

    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return Err(CoreError::Validation("Invalid domain name".into()));
    }
    if !domain.contains('.') {
        return Err(CoreError::Validation(
            "Domain must include at least one dot".into(),
        ));
    }
    let valid_labels = domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if !valid_labels {
        return Err(CoreError::Validation("Invalid domain name".into()));
    }

    Ok(domain)
}

async fn current_user(state: &AppState, user: &AuthUser) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))
}

/// PUT /api/admin/domain
///
/// Claim a domain (body `{"domain": "folio.example.com"}`) or release
/// the current one (`{"domain": null}`). Re-claiming one's own current
/// domain is idempotent; a domain held by another tenant conflicts.
pub async fn set_domain(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SetDomainRequest>,
) -> AppResult<Json<UserResponse>> {
    let current = current_user(&state, &user).await?;

    let Some(raw) = input.domain else {
        if let Some(old) = current.custom_domain.as_deref() {
            if let Err(e) = state.registrar.deregister(old).await {
                tracing::warn!(domain = old, error = %e, "Deregistration failed; releasing mapping anyway");
            }
        }
        let updated = UserRepo::set_custom_domain(&state.pool, user.user_id, None)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: user.user_id,
            }))?;
        tracing::info!(user_id = user.user_id, "Custom domain released");
        return Ok(Json(updated.into()));
    };

    let domain = normalize_domain(&raw).map_err(AppError::Core)?;

    if let Some(owner) = UserRepo::find_by_domain(&state.pool, &domain).await? {
        if owner.id != user.user_id {
            return Err(AppError::Core(CoreError::Conflict(
                "Domain is already claimed by another portfolio".into(),
            )));
        }
    }

    // Provider first: a rejected registration must leave the mapping alone.
    state.registrar.register(&domain).await.map_err(AppError::Core)?;

    if let Some(old) = current.custom_domain.as_deref() {
        if old != domain {
            if let Err(e) = state.registrar.deregister(old).await {
                tracing::warn!(domain = old, error = %e, "Deregistration of previous domain failed");
            }
        }
    }

    let updated = UserRepo::set_custom_domain(&state.pool, user.user_id, Some(&domain))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    tracing::info!(user_id = user.user_id, domain = %domain, "Custom domain claimed");

    Ok(Json(updated.into()))
}

/// GET /api/admin/domain/status
///
/// Live verification of the tenant's domain: `not_set` without a domain,
/// `pending` until any expected DNS record is observed, then `reachable`
/// or `propagating` depending on an HTTP(S) probe.
pub async fn status(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DomainStatusResponse>> {
    let current = current_user(&state, &user).await?;

    let Some(domain) = current.custom_domain else {
        return Ok(Json(DomainStatusResponse {
            domain: None,
            status: DomainStatus::NotSet,
            dns: None,
        }));
    };

    let observed = state.dns.observe(&domain).await.map_err(AppError::Core)?;
    let verification = verify_records(&state.config.domain.expected, &observed);

    let status = if !verification.verified {
        DomainStatus::Pending
    } else if state.probe.is_reachable(&domain).await {
        DomainStatus::Reachable
    } else {
        DomainStatus::Propagating
    };

    Ok(Json(DomainStatusResponse {
        domain: Some(domain),
        status,
        dns: Some(verification),
    }))
}
