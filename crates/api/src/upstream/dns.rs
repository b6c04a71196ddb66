//! Live DNS lookups for custom-domain verification.
//!
//! Observes the CNAME, A, and NS records of a tenant's domain; the
//! disjunctive comparison against the platform's expected targets lives
//! in `folio_core::domain::verify_records`.

use folio_core::domain::ObservedRecords;
use folio_core::error::{CoreError, UpstreamService};
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;

/// DNS checker backed by the system resolver configuration.
pub struct DnsChecker {
    resolver: TokioAsyncResolver,
}

impl DnsChecker {
    /// Build a resolver from `/etc/resolv.conf`, falling back to a
    /// public default configuration when the system one is unreadable.
    pub fn new() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "System resolver config unreadable; using defaults");
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }

    /// Look up the CNAME, A, and NS records of `domain`.
    ///
    /// "No records of this type" is a normal observation (empty), not an
    /// error; only resolver failures (timeouts, SERVFAIL) surface as
    /// [`CoreError::Upstream`].
    pub async fn observe(&self, domain: &str) -> Result<ObservedRecords, CoreError> {
        let cname = match self.resolver.lookup(domain, RecordType::CNAME).await {
            Ok(lookup) => lookup
                .iter()
                .find_map(|rdata| rdata.as_cname().map(|name| name.0.to_utf8())),
            Err(e) if is_no_records(&e) => None,
            Err(e) => return Err(dns_error(e)),
        };

        let a_records = match self.resolver.ipv4_lookup(domain).await {
            Ok(lookup) => lookup.iter().map(|a| a.to_string()).collect(),
            Err(e) if is_no_records(&e) => Vec::new(),
            Err(e) => return Err(dns_error(e)),
        };

        let nameservers = match self.resolver.ns_lookup(domain).await {
            Ok(lookup) => lookup.iter().map(|ns| ns.0.to_utf8()).collect(),
            Err(e) if is_no_records(&e) => Vec::new(),
            Err(e) => return Err(dns_error(e)),
        };

        Ok(ObservedRecords {
            cname,
            a_records,
            nameservers,
        })
    }
}

impl Default for DnsChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_no_records(error: &ResolveError) -> bool {
    matches!(error.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

fn dns_error(error: ResolveError) -> CoreError {
    CoreError::unreachable(UpstreamService::Dns, error.to_string())
}
