//! # Domain Entities
//!
//! The field vocabulary of an SNS message, the field map handed in by the
//! caller, and the message types with their per-type key lists.

use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Field Vocabulary
// =============================================================================

/// A field of an SNS message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Type,
    MessageId,
    Token,
    TopicArn,
    Message,
    Subject,
    SubscribeUrl,
    Timestamp,
    SignatureVersion,
    Signature,
    SigningCertUrl,
    UnsubscribeUrl,
}

impl Field {
    /// Every field, in wire-document order.
    pub const ALL: [Field; 12] = [
        Field::Type,
        Field::MessageId,
        Field::Token,
        Field::TopicArn,
        Field::Message,
        Field::Subject,
        Field::SubscribeUrl,
        Field::Timestamp,
        Field::SignatureVersion,
        Field::Signature,
        Field::SigningCertUrl,
        Field::UnsubscribeUrl,
    ];

    /// Key used in the field map and in the canonical signable bytes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Type => "Type",
            Field::MessageId => "MessageId",
            Field::Token => "Token",
            Field::TopicArn => "TopicArn",
            Field::Message => "Message",
            Field::Subject => "Subject",
            Field::SubscribeUrl => "SubscribeURL",
            Field::Timestamp => "Timestamp",
            Field::SignatureVersion => "SignatureVersion",
            Field::Signature => "Signature",
            Field::SigningCertUrl => "SigningCertURL",
            Field::UnsubscribeUrl => "UnsubscribeURL",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Field Map
// =============================================================================

/// Decoded SNS message as a mapping from field name to value.
///
/// A field whose value is the empty string is indistinguishable from a
/// missing field: [`MessageFieldMap::get`] returns `None` for both. The
/// signer applies the same rule when building the string it signs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageFieldMap {
    fields: HashMap<String, String>,
}

impl MessageFieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the previous raw value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a field, returning its raw value.
    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.fields.remove(field.as_str())
    }

    /// Value of a field if it is present and non-empty.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields
            .get(field.as_str())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Whether a field is present and non-empty.
    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// First field of `keys` that is missing or empty, scanning in order.
    pub fn first_missing(&self, keys: &[Field]) -> Option<Field> {
        keys.iter().copied().find(|key| !self.has(*key))
    }

    /// Raw value of the `Type` field, empty when absent.
    pub fn raw_type(&self) -> &str {
        self.fields
            .get(Field::Type.as_str())
            .map_or("", String::as_str)
    }

    /// Number of entries, including empty ones.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the map holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<HashMap<String, String>> for MessageFieldMap {
    fn from(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageFieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// Message Types
// =============================================================================

/// Fields required in every SNS message, in the order they are checked.
pub const REQUIRED_KEYS: [Field; 8] = [
    Field::Type,
    Field::MessageId,
    Field::TopicArn,
    Field::Message,
    Field::Timestamp,
    Field::Signature,
    Field::SignatureVersion,
    Field::SigningCertUrl,
];

/// Additional fields required in subscription and unsubscription confirmations.
pub const SUBSCRIPTION_KEYS: [Field; 2] = [Field::SubscribeUrl, Field::Token];

/// Canonical key order for confirmation messages.
///
/// `Subject` never appears in a confirmation; it is listed so a stray value
/// is still covered by the signature.
const SIGNABLE_KEYS_SUBSCRIPTION: [Field; 8] = [
    Field::Message,
    Field::MessageId,
    Field::Subject,
    Field::SubscribeUrl,
    Field::Timestamp,
    Field::Token,
    Field::TopicArn,
    Field::Type,
];

/// Canonical key order for notifications.
const SIGNABLE_KEYS_NOTIFICATION: [Field; 7] = [
    Field::Message,
    Field::MessageId,
    Field::Subject,
    Field::SubscribeUrl,
    Field::Timestamp,
    Field::TopicArn,
    Field::Type,
];

/// The three kinds of SNS message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    Notification,
    SubscriptionConfirmation,
    UnsubscribeConfirmation,
}

impl MessageType {
    /// Parse the literal `Type` value. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Notification" => Some(MessageType::Notification),
            "SubscriptionConfirmation" => Some(MessageType::SubscriptionConfirmation),
            "UnsubscribeConfirmation" => Some(MessageType::UnsubscribeConfirmation),
            _ => None,
        }
    }

    /// Wire name of the type.
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageType::Notification => "Notification",
            MessageType::SubscriptionConfirmation => "SubscriptionConfirmation",
            MessageType::UnsubscribeConfirmation => "UnsubscribeConfirmation",
        }
    }

    /// Whether this is one of the confirmation types.
    pub const fn is_subscription(self) -> bool {
        matches!(
            self,
            MessageType::SubscriptionConfirmation | MessageType::UnsubscribeConfirmation
        )
    }

    /// Fields this type requires on top of [`REQUIRED_KEYS`].
    pub const fn extra_required_keys(self) -> &'static [Field] {
        if self.is_subscription() {
            &SUBSCRIPTION_KEYS
        } else {
            &[]
        }
    }

    /// Keys of the canonical signable bytes, in signing order.
    pub const fn signable_keys(self) -> &'static [Field] {
        if self.is_subscription() {
            &SIGNABLE_KEYS_SUBSCRIPTION
        } else {
            &SIGNABLE_KEYS_NOTIFICATION
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
