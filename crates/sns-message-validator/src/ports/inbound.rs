//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this crate.

use crate::domain::entities::MessageType;
use crate::domain::errors::ValidationError;

/// SNS message validation API.
///
/// Implementations must be thread-safe (`Send + Sync`) and must not mutate
/// the message they validate, so one message may be validated repeatedly or
/// concurrently.
#[async_trait::async_trait]
pub trait MessageValidationApi: Send + Sync {
    /// Check required fields and message type.
    ///
    /// # Errors
    /// * `MissingKey` - A required field is missing or empty
    /// * `InvalidType` - `Type` is not a recognized message type
    fn validate_structure(&self) -> Result<MessageType, ValidationError>;

    /// Fetch the signing certificate and verify the message signature.
    ///
    /// # Errors
    /// * `InvalidCert` - Certificate URL untrusted, fetch failed, or certificate unparsable
    /// * `IncorrectSignature` - Signature undecodable or not matching
    async fn verify_signature(&self) -> Result<(), ValidationError>;

    /// Full pipeline: structure first, then signature. Returns the first error.
    async fn validate_message(&self) -> Result<(), ValidationError>;
}
