//! # Structural Validation
//!
//! Schema-level checks run before any network or cryptographic work:
//! 1. Every generally required field is present (first missing wins)
//! 2. `Type` is one of the three message types
//! 3. Confirmation messages also carry `SubscribeURL` and `Token`

use super::entities::{MessageFieldMap, MessageType, REQUIRED_KEYS};
use super::errors::ValidationError;

/// Validate the structure of a message and return its type.
pub fn validate_structure(fields: &MessageFieldMap) -> Result<MessageType, ValidationError> {
    if let Some(missing) = fields.first_missing(&REQUIRED_KEYS) {
        return Err(ValidationError::missing_key(missing));
    }

    let raw_type = fields.raw_type();
    let message_type =
        MessageType::parse(raw_type).ok_or_else(|| ValidationError::invalid_type(raw_type))?;

    // Notifications ignore SubscribeURL/Token entirely
    if let Some(missing) = fields.first_missing(message_type.extra_required_keys()) {
        return Err(ValidationError::missing_subscription_key(missing));
    }

    Ok(message_type)
}
