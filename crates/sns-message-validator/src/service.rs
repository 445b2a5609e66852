//! # SNS Validation Service
//!
//! Application service layer that implements the `MessageValidationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`MessageValidationApi`)
//! - Uses the outbound port (`CertificateFetcher`) to obtain signing certificates
//! - Delegates structural and cryptographic checks to the domain layer

use crate::domain::canonical::build_signable_bytes;
use crate::domain::entities::{Field, MessageFieldMap, MessageType};
use crate::domain::errors::ValidationError;
use crate::domain::signature::{decode_signature, SigningCertificate};
use crate::domain::structure::validate_structure;
use crate::domain::trust::check_certificate_url;
use crate::ports::inbound::MessageValidationApi;
use crate::ports::outbound::CertificateFetcher;
use tracing::{debug, warn};

/// Validator for one SNS message.
///
/// Borrows the field map for its whole life and never mutates it. The
/// certificate is fetched again on every signature check.
pub struct SnsValidator<'m, F: CertificateFetcher> {
    version: u32,
    message: &'m MessageFieldMap,
    fetcher: F,
}

impl<'m, F: CertificateFetcher> SnsValidator<'m, F> {
    /// Create a version 1 validator over `message`.
    ///
    /// # Arguments
    /// * `message` - The decoded message fields
    /// * `fetcher` - Source of signing certificates
    pub fn new_v1(message: &'m MessageFieldMap, fetcher: F) -> Self {
        Self {
            version: 1,
            message,
            fetcher,
        }
    }

    /// Validator version tag.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The message under validation.
    pub fn message(&self) -> &'m MessageFieldMap {
        self.message
    }

    fn field(&self, field: Field) -> &'m str {
        self.message.get(field).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl<'m, F: CertificateFetcher> MessageValidationApi for SnsValidator<'m, F> {
    fn validate_structure(&self) -> Result<MessageType, ValidationError> {
        validate_structure(self.message)
    }

    async fn verify_signature(&self) -> Result<(), ValidationError> {
        // 1. Trust anchor before any network access
        let cert_url = check_certificate_url(self.field(Field::SigningCertUrl))?;

        // 2. Fresh certificate, single attempt
        let pem = self.fetcher.fetch_certificate(&cert_url).await?;
        let certificate = SigningCertificate::from_pem(&pem)?;

        // 3. Signature over the canonical bytes
        let signature = decode_signature(self.field(Field::Signature))?;
        let signable = build_signable_bytes(self.message);

        certificate.verify_sha1_rsa(&signable, &signature)
    }

    async fn validate_message(&self) -> Result<(), ValidationError> {
        let result = match self.validate_structure() {
            Ok(message_type) => self.verify_signature().await.map(|()| message_type),
            Err(err) => Err(err),
        };

        match result {
            Ok(message_type) => {
                debug!(
                    message_id = self.field(Field::MessageId),
                    message_type = %message_type,
                    "SNS message accepted"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    message_id = self.field(Field::MessageId),
                    kind = %err.kind(),
                    reason = %err,
                    "SNS message rejected"
                );
                Err(err)
            }
        }
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
