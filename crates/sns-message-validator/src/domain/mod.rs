//! # Domain Layer
//!
//! Pure validation logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod canonical;
pub mod entities;
pub mod errors;
pub mod signature;
pub mod structure;
pub mod trust;
