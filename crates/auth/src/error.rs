use thiserror::Error;

/// Errors raised by the authentication/authorization boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("password does not meet the policy: {0}")]
    WeakPassword(&'static str),

    #[error("crypto failure: {0}")]
    Crypto(String),
}
