use crate::types::DbId;

/// Which upstream collaborator failed, for [`CoreError::Upstream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamService {
    /// The external domain-routing provider (registrar API).
    Registrar,
    /// The DNS resolver used for custom-domain verification.
    Dns,
    /// The HTTP(S) reachability probe.
    Probe,
}

impl std::fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UpstreamService::Registrar => "registrar",
            UpstreamService::Dns => "dns",
            UpstreamService::Probe => "probe",
        };
        f.write_str(name)
    }
}

/// Distinguishes "could not reach the service" from "service refused us".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// Network failure, timeout, connection refused.
    Unreachable,
    /// The service answered with an error response.
    Rejected,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A tenant (or tenant-scoped row addressed by key) does not exist.
    /// Deliberately carries no detail: callers must not be able to tell
    /// "absent" apart from "owned by someone else".
    #[error("Not found: {0}")]
    TenantNotFound(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Upstream {service} failure: {message}")]
    Upstream {
        service: UpstreamService,
        kind: UpstreamKind,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build an [`CoreError::Upstream`] for a service that could not be reached.
    pub fn unreachable(service: UpstreamService, message: impl Into<String>) -> Self {
        CoreError::Upstream {
            service,
            kind: UpstreamKind::Unreachable,
            message: message.into(),
        }
    }

    /// Build an [`CoreError::Upstream`] for a service that answered with an error.
    pub fn rejected(service: UpstreamService, message: impl Into<String>) -> Self {
        CoreError::Upstream {
            service,
            kind: UpstreamKind::Rejected,
            message: message.into(),
        }
    }
}
