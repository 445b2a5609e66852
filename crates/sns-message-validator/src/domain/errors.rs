//! # Validation Errors
//!
//! Every failure inside the validator is reported as a [`ValidationError`]
//! of one of four kinds. Callers decide what to do by matching on
//! [`ValidationError::kind`].

use super::entities::Field;
use std::fmt;
use thiserror::Error;

/// Stage at which validation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is missing or empty
    MissingKey,
    /// `Type` is not a recognized message type
    InvalidType,
    /// The signing certificate could not be obtained or parsed
    InvalidCert,
    /// The signature is undecodable or does not match
    IncorrectSignature,
}

impl ErrorKind {
    /// Stable name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingKey => "MissingKey",
            ErrorKind::InvalidType => "InvalidType",
            ErrorKind::InvalidCert => "InvalidCert",
            ErrorKind::IncorrectSignature => "IncorrectSignature",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected message: the failing stage plus a human-readable reason.
///
/// `Display` yields the message only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    kind: ErrorKind,
    message: String,
}

impl ValidationError {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A field required in every message is missing.
    pub fn missing_key(field: Field) -> Self {
        Self::new(
            ErrorKind::MissingKey,
            format!("\"{field}\" is required in SNS message"),
        )
    }

    /// A field required in confirmation messages is missing.
    pub fn missing_subscription_key(field: Field) -> Self {
        Self::new(
            ErrorKind::MissingKey,
            format!("\"{field}\" is required in Subscription message"),
        )
    }

    /// `Type` holds an unrecognized value.
    pub fn invalid_type(value: &str) -> Self {
        Self::new(
            ErrorKind::InvalidType,
            format!("Invalid message type \"{value}\""),
        )
    }

    pub fn invalid_cert(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCert, message)
    }

    pub fn incorrect_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncorrectSignature, message)
    }

    /// Stage that failed.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable reason.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}
