//! Client for the external domain-routing provider.
//!
//! The provider is told which custom domains should route to the
//! platform. Registration must succeed before a domain is persisted;
//! deregistration is best-effort (the caller decides how to handle
//! failures).

use std::time::Duration;

use folio_core::error::{CoreError, UpstreamService};
use serde_json::json;

use crate::config::DomainConfig;

/// Per-request timeout for provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the routing provider's domain API.
///
/// When no provider is configured (`REGISTRAR_API_URL` unset), every
/// call is a logged no-op so local development needs no external service.
pub struct RegistrarClient {
    http: reqwest::Client,
    base_url: Option<String>,
    token: Option<String>,
}

impl RegistrarClient {
    pub fn new(config: &DomainConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.registrar_api_url.clone(),
            token: config.registrar_token.clone(),
        }
    }

    /// Register a domain with the provider: `POST {base}/domains`.
    ///
    /// A 409 response means the domain is already registered with the
    /// provider, which is the desired end state, so it counts as success.
    pub async fn register(&self, domain: &str) -> Result<(), CoreError> {
        let Some(base) = &self.base_url else {
            tracing::debug!(domain, "No routing provider configured; skipping registration");
            return Ok(());
        };

        let mut request = self
            .http
            .post(format!("{base}/domains"))
            .json(&json!({ "domain": domain }))
            .timeout(REQUEST_TIMEOUT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::unreachable(UpstreamService::Registrar, e.to_string()))?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::CONFLICT {
            tracing::info!(domain, %status, "Domain registered with routing provider");
            Ok(())
        } else {
            Err(CoreError::rejected(
                UpstreamService::Registrar,
                format!("domain registration for '{domain}' failed with status {status}"),
            ))
        }
    }

    /// Remove a domain from the provider: `DELETE {base}/domains/{domain}`.
    ///
    /// A 404 response means the provider never had the domain; the end
    /// state matches, so it counts as success.
    pub async fn deregister(&self, domain: &str) -> Result<(), CoreError> {
        let Some(base) = &self.base_url else {
            tracing::debug!(domain, "No routing provider configured; skipping deregistration");
            return Ok(());
        };

        let mut request = self
            .http
            .delete(format!("{base}/domains/{domain}"))
            .timeout(REQUEST_TIMEOUT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::unreachable(UpstreamService::Registrar, e.to_string()))?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            tracing::info!(domain, %status, "Domain deregistered from routing provider");
            Ok(())
        } else {
            Err(CoreError::rejected(
                UpstreamService::Registrar,
                format!("domain deregistration for '{domain}' failed with status {status}"),
            ))
        }
    }
}
