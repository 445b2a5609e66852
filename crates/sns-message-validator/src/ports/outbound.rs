//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies this crate needs.

use crate::domain::errors::ValidationError;
use thiserror::Error;
use url::Url;

/// Error from fetching a signing certificate.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status
    #[error("Could not retrieve the certificate")]
    Status { status: u16 },

    /// The request could not be sent or no response arrived
    #[error("{0}")]
    Transport(String),

    /// The response body could not be read
    #[error("{0}")]
    Body(String),
}

impl From<FetchError> for ValidationError {
    fn from(err: FetchError) -> Self {
        ValidationError::invalid_cert(err.to_string())
    }
}

/// Source of signing certificates.
///
/// The URL has already passed the trust-anchor check. Implementations make
/// a single attempt per call: no retries and no caching. Any timeout or
/// cancellation belongs to the implementation's transport.
#[async_trait::async_trait]
pub trait CertificateFetcher: Send + Sync {
    /// GET `url` and return the full response body.
    ///
    /// # Errors
    /// * `FetchError::Status` - Non-2xx response
    /// * `FetchError::Transport` - Network failure
    /// * `FetchError::Body` - Body could not be read
    async fn fetch_certificate(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

#[async_trait::async_trait]
impl<'a, T: CertificateFetcher + ?Sized> CertificateFetcher for &'a T {
    async fn fetch_certificate(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        (**self).fetch_certificate(url).await
    }
}

#[async_trait::async_trait]
impl<T: CertificateFetcher + ?Sized> CertificateFetcher for std::sync::Arc<T> {
    async fn fetch_certificate(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        (**self).fetch_certificate(url).await
    }
}
