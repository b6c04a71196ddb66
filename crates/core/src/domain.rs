//! Custom-domain verification model.
//!
//! A tenant's domain moves through `not_set -> pending -> verified`;
//! once DNS-verified, an HTTP(S) probe refines the status into
//! `reachable` or `propagating`. Verification is deliberately
//! disjunctive: a CNAME match, an A match, or an NS match is each
//! sufficient on its own, so proxy-CNAME, direct-A, and delegated-NS
//! setups all pass against the same platform targets.

use serde::Serialize;

/// Verification status reported by `GET /admin/domain/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    /// No custom domain configured for the tenant.
    NotSet,
    /// Domain set and registered upstream; expected DNS not yet observed.
    Pending,
    /// Expected DNS observed and the site answered an HTTP(S) probe.
    Reachable,
    /// Expected DNS observed but the probe failed; propagation is
    /// eventually consistent, so this is a normal transient state.
    Propagating,
}

/// Operator-configured DNS targets the platform answers on.
#[derive(Debug, Clone, Default)]
pub struct DnsExpectations {
    /// Expected CNAME target, e.g. `edge.folio.dev`.
    pub cname: Option<String>,
    /// Expected A-record addresses.
    pub a_records: Vec<String>,
    /// Expected delegated nameservers.
    pub nameservers: Vec<String>,
}

/// Records actually observed by a live lookup of the tenant's domain.
#[derive(Debug, Clone, Default)]
pub struct ObservedRecords {
    pub cname: Option<String>,
    pub a_records: Vec<String>,
    pub nameservers: Vec<String>,
}

/// Per-record-type outcome included in the status response.
#[derive(Debug, Clone, Serialize)]
pub struct RecordCheck {
    pub matched: bool,
    pub expected: Vec<String>,
    pub observed: Vec<String>,
}

/// Full DNS verification result: the three record checks and the
/// disjunctive verdict.
#[derive(Debug, Clone, Serialize)]
pub struct DnsVerification {
    pub verified: bool,
    pub cname: RecordCheck,
    pub a: RecordCheck,
    pub ns: RecordCheck,
}

/// Compare observed records against expectations.
///
/// Hostname comparisons are case-insensitive and ignore a trailing dot
/// (resolvers return fully-qualified names). A record type with no
/// configured expectation can never match on its own.
pub fn verify_records(expected: &DnsExpectations, observed: &ObservedRecords) -> DnsVerification {
    let cname_matched = match (&expected.cname, &observed.cname) {
        (Some(want), Some(got)) => host_eq(want, got),
        _ => false,
    };

    let a_matched = !expected.a_records.is_empty()
        && observed
            .a_records
            .iter()
            .any(|got| expected.a_records.iter().any(|want| want == got));

    let ns_matched = !expected.nameservers.is_empty()
        && observed
            .nameservers
            .iter()
            .any(|got| expected.nameservers.iter().any(|want| host_eq(want, got)));

    DnsVerification {
        verified: cname_matched || a_matched || ns_matched,
        cname: RecordCheck {
            matched: cname_matched,
            expected: expected.cname.iter().cloned().collect(),
            observed: observed.cname.iter().cloned().collect(),
        },
        a: RecordCheck {
            matched: a_matched,
            expected: expected.a_records.clone(),
            observed: observed.a_records.clone(),
        },
        ns: RecordCheck {
            matched: ns_matched,
            expected: expected.nameservers.clone(),
            observed: observed.nameservers.clone(),
        },
    }
}

/// Case-insensitive hostname equality, tolerant of a trailing dot.
fn host_eq(a: &str, b: &str) -> bool {
    a.trim_end_matches('.').eq_ignore_ascii_case(b.trim_end_matches('.'))
}
