use std::sync::Arc;

use crate::config::ServerConfig;
use crate::upstream::dns::DnsChecker;
use crate::upstream::probe::ReachabilityProbe;
use crate::upstream::registrar::RegistrarClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External domain-routing provider client.
    pub registrar: Arc<RegistrarClient>,
    /// DNS resolver for custom-domain verification.
    pub dns: Arc<DnsChecker>,
    /// HTTP(S) reachability probe for verified domains.
    pub probe: Arc<ReachabilityProbe>,
}

impl AppState {
    /// Assemble the state, constructing the upstream clients from the
    /// domain configuration. Used by both the binary and the test harness.
    pub fn build(pool: folio_db::DbPool, config: ServerConfig) -> Self {
        let registrar = Arc::new(RegistrarClient::new(&config.domain));
        let dns = Arc::new(DnsChecker::new());
        let probe = Arc::new(ReachabilityProbe::new(&config.domain));
        Self {
            pool,
            config: Arc::new(config),
            registrar,
            dns,
            probe,
        }
    }
}
