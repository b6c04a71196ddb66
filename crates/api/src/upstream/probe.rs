//! HTTP(S) reachability probe for DNS-verified domains.

use std::time::Duration;

use crate::config::DomainConfig;

/// Probes whether a custom domain actually answers HTTP(S) requests.
///
/// DNS propagation is eventually consistent: records can verify while
/// edges still 404 or refuse connections. The probe distinguishes
/// "reachable" from "still propagating".
pub struct ReachabilityProbe {
    http: reqwest::Client,
    timeout: Duration,
}

impl ReachabilityProbe {
    pub fn new(config: &DomainConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout: Duration::from_secs(config.probe_timeout_secs),
        }
    }

    /// Try HTTPS, then plain HTTP. A non-5xx response (even 404) proves
    /// the domain routes somewhere that answers; server errors mean the
    /// edge is still warming up and count as not-yet-reachable.
    pub async fn is_reachable(&self, domain: &str) -> bool {
        for scheme in ["https", "http"] {
            let url = format!("{scheme}://{domain}/");
            match self.http.get(&url).timeout(self.timeout).send().await {
                Ok(response) if response.status().is_server_error() => {
                    tracing::debug!(domain, %url, status = %response.status(), "Probe got a server error");
                }
                Ok(response) => {
                    tracing::debug!(domain, %url, status = %response.status(), "Probe answered");
                    return true;
                }
                Err(e) => {
                    tracing::debug!(domain, %url, error = %e, "Probe attempt failed");
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer every connection with a fixed status line. The HTTPS attempt
    /// fails its TLS handshake against this plain listener, so the probe
    /// falls through to HTTP and sees the response.
    async fn serve_status(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response =
                    format!("{status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("{}:{}", addr.ip(), addr.port())
    }

    fn test_probe() -> ReachabilityProbe {
        ReachabilityProbe::new(&DomainConfig {
            probe_timeout_secs: 5,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_server_error_is_not_reachable() {
        let host = serve_status("HTTP/1.1 500 Internal Server Error").await;
        assert!(!test_probe().is_reachable(&host).await);
    }

    #[tokio::test]
    async fn test_client_error_is_reachable() {
        let host = serve_status("HTTP/1.1 404 Not Found").await;
        assert!(test_probe().is_reachable(&host).await);
    }

    #[tokio::test]
    async fn test_no_listener_is_not_reachable() {
        // Reserved port nobody answers on.
        assert!(!test_probe().is_reachable("127.0.0.1:1").await);
    }
}
