use folio_core::domain::DnsExpectations;

use crate::auth::jwt::JwtConfig;

/// How new tenants may register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationMode {
    /// Anyone may register.
    Open,
    /// Registration requires a valid, unused invite token.
    Invite,
    /// No registration at all.
    Closed,
}

impl RegistrationMode {
    /// Parse the `REGISTRATION_MODE` env value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Some(RegistrationMode::Open),
            "invite" => Some(RegistrationMode::Invite),
            "closed" => Some(RegistrationMode::Closed),
            _ => None,
        }
    }
}

/// Custom-domain configuration: the DNS targets tenants should point
/// their domains at, and the external routing provider to notify.
#[derive(Debug, Clone, Default)]
pub struct DomainConfig {
    /// DNS records the platform answers on. A tenant domain is verified
    /// when it matches any one of these.
    pub expected: DnsExpectations,
    /// Base URL of the external domain-routing provider. When unset,
    /// registration calls are skipped (local development).
    pub registrar_api_url: Option<String>,
    /// Bearer token for the routing provider.
    pub registrar_token: Option<String>,
    /// HTTP(S) reachability probe timeout in seconds (default: `5`).
    pub probe_timeout_secs: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Registration policy (default: `invite`).
    pub registration_mode: RegistrationMode,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Custom-domain verification and routing-provider configuration.
    pub domain: DomainConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `3000`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `REGISTRATION_MODE`         | `invite`                   |
    /// | `DOMAIN_EXPECTED_CNAME`     | --                         |
    /// | `DOMAIN_EXPECTED_A`         | -- (comma-separated)       |
    /// | `DOMAIN_EXPECTED_NS`        | -- (comma-separated)       |
    /// | `REGISTRAR_API_URL`         | --                         |
    /// | `REGISTRAR_API_TOKEN`       | --                         |
    /// | `DOMAIN_PROBE_TIMEOUT_SECS` | `5`                        |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values; misconfiguration should fail fast
    /// at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_csv(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let registration_mode = std::env::var("REGISTRATION_MODE")
            .map(|v| {
                RegistrationMode::parse(&v)
                    .expect("REGISTRATION_MODE must be one of: open, invite, closed")
            })
            .unwrap_or(RegistrationMode::Invite);

        let jwt = JwtConfig::from_env();
        let domain = DomainConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            registration_mode,
            jwt,
            domain,
        }
    }
}

impl DomainConfig {
    /// Load custom-domain configuration from environment variables.
    /// Everything is optional: with nothing set, verification can never
    /// succeed and registrar calls are skipped.
    pub fn from_env() -> Self {
        let expected = DnsExpectations {
            cname: std::env::var("DOMAIN_EXPECTED_CNAME").ok().filter(|s| !s.is_empty()),
            a_records: std::env::var("DOMAIN_EXPECTED_A")
                .map(|v| split_csv(&v))
                .unwrap_or_default(),
            nameservers: std::env::var("DOMAIN_EXPECTED_NS")
                .map(|v| split_csv(&v))
                .unwrap_or_default(),
        };

        let probe_timeout_secs: u64 = std::env::var("DOMAIN_PROBE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DOMAIN_PROBE_TIMEOUT_SECS must be a valid u64");

        Self {
            expected,
            registrar_api_url: std::env::var("REGISTRAR_API_URL").ok().filter(|s| !s.is_empty()),
            registrar_token: std::env::var("REGISTRAR_API_TOKEN").ok().filter(|s| !s.is_empty()),
            probe_timeout_secs,
        }
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
