//! # SNS Message Validator
//!
//! Validates that an inbound Amazon SNS message is well-formed and was signed
//! by SNS itself, without the AWS SDK.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Field map, structural checks, canonical
//!   signable bytes, trust-anchor checks and RSA verification. No I/O.
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Adapters Layer** (`adapters/`): `reqwest` implementation of the
//!   certificate fetcher port
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Pipeline
//!
//! 1. Structural validation (required fields, message type, subscription fields)
//! 2. Signing certificate URL must be `https` on an `sns.<region>.amazonaws.com` host
//! 3. Certificate is fetched fresh for every call
//! 4. `Signature` is checked with RSA PKCS#1 v1.5 / SHA-1 over the canonical bytes
//!
//! Each stage short-circuits; the first error is returned.
//!
//! ## Security Notes
//!
//! - Certificates are never cached and never fetched from a host outside the
//!   SNS allow-pattern.
//! - Revocation (CRL/OCSP) is not checked.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod message;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::http::HttpCertificateFetcher;
pub use config::{ConfigError, FetcherConfig};
pub use domain::canonical::build_signable_bytes;
pub use domain::entities::{Field, MessageFieldMap, MessageType};
pub use domain::errors::{ErrorKind, ValidationError};
pub use message::{DecodeError, SnsMessage};
pub use ports::inbound::MessageValidationApi;
pub use ports::outbound::{CertificateFetcher, FetchError};
pub use service::SnsValidator;
