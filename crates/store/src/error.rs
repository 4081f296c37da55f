use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error, independent of the backing implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Unique-email constraint violation.
    #[error("email already exists")]
    DuplicateEmail,

    /// The targeted record is absent (or outside the caller's scope, which
    /// must answer identically).
    #[error("record not found")]
    NotFound,

    /// Backend failure (connection loss, poisoned lock, ...).
    #[error("store backend failure: {0}")]
    Backend(String),
}
