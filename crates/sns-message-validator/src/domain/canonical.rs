//! # Canonical Signable Bytes
//!
//! Rebuilds the exact byte string SNS signed. For each key of the type's
//! signing order that is present and non-empty, `key\nvalue\n` is appended.
//! Absent keys contribute nothing.

use super::entities::{MessageFieldMap, MessageType};

/// Typical signable length; avoids regrowth for ordinary messages.
const SIGNABLE_CAPACITY_HINT: usize = 1024;

/// Build the canonical signable bytes of a message.
///
/// Confirmation types use the subscription key order; any other `Type`
/// value, recognized or not, uses the notification order.
pub fn build_signable_bytes(fields: &MessageFieldMap) -> Vec<u8> {
    let message_type =
        MessageType::parse(fields.raw_type()).unwrap_or(MessageType::Notification);

    let mut signable = Vec::with_capacity(SIGNABLE_CAPACITY_HINT);
    for key in message_type.signable_keys() {
        if let Some(value) = fields.get(*key) {
            signable.extend_from_slice(key.as_str().as_bytes());
            signable.push(b'\n');
            signable.extend_from_slice(value.as_bytes());
            signable.push(b'\n');
        }
    }
    signable
}
