//! Clients for external collaborators involved in custom domains:
//! the routing provider (registrar), the DNS resolver, and the
//! HTTP(S) reachability probe.

pub mod dns;
pub mod probe;
pub mod registrar;
