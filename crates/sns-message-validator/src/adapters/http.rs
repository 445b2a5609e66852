//! # HTTP Certificate Fetcher
//!
//! `reqwest` implementation of the [`CertificateFetcher`] port.
//!
//! Redirects are not followed: the trust anchor was checked against the
//! requested URL, so a redirect elsewhere is reported as a non-2xx status.

use crate::config::{ConfigError, FetcherConfig};
use crate::ports::outbound::{CertificateFetcher, FetchError};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Fetches signing certificates over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpCertificateFetcher {
    client: Client,
}

impl HttpCertificateFetcher {
    /// Create a fetcher from validated configuration.
    pub fn new(config: &FetcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing client, keeping its transport settings.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CertificateFetcher for HttpCertificateFetcher {
    async fn fetch_certificate(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Signing certificate request failed");
                FetchError::Transport(e.to_string())
            })?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "Signing certificate response");

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Signing certificate not served");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its base URL.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/cert.pem")
    }

    // Same settings as `new`, minus any proxy picked up from the environment
    fn fetcher() -> HttpCertificateFetcher {
        let config = FetcherConfig::default();
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .redirect(Policy::none())
            .no_proxy()
            .build()
            .unwrap();
        HttpCertificateFetcher::with_client(client)
    }

    #[test]
    fn test_new_builds_client_from_default_config() {
        assert!(HttpCertificateFetcher::new(&FetcherConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_200() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\ncertificate",
        )
        .await;

        let body = fetcher()
            .fetch_certificate(&Url::parse(&url).unwrap())
            .await
            .unwrap();

        assert_eq!(body, b"certificate");
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_success_status() {
        let url =
            serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;

        let err = fetcher()
            .fetch_certificate(&Url::parse(&url).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn test_fetch_does_not_follow_redirects() {
        let url = serve_once(
            "HTTP/1.1 302 Found\r\nLocation: https://attacker.example.com/cert.pem\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = fetcher()
            .fetch_certificate(&Url::parse(&url).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 302 }));
    }

    #[tokio::test]
    async fn test_fetch_reports_transport_failure() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/cert.pem")).unwrap();
        let err = fetcher().fetch_certificate(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FetcherConfig {
            request_timeout: 0,
            ..Default::default()
        };

        assert!(HttpCertificateFetcher::new(&config).is_err());
    }
}
