//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic business-rule failure.
///
/// Only rules the domain itself can break live here: malformed input,
/// arithmetic invariants, unparseable identifiers. Storage and
/// authentication failures have their own error types in their own crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected by a validation rule (empty invoice, negative price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A computed value broke an invariant (e.g. money arithmetic overflow).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier string did not parse as a UUID.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
