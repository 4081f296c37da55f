//! Consistent error responses.
//!
//! Every error renders `{ "error": CODE, "message": ... }` with a stable
//! machine-readable code. Authentication and credential failures are
//! deliberately uniform so neither accounts nor other tenants' records can
//! be enumerated.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use kawari_auth::AuthError;
use kawari_core::DomainError;
use kawari_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Unknown email and wrong password answer identically.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already exists")]
    EmailExists,

    #[error("invalid id: {0}")]
    InvalidId(String),

    /// An admin may not delete its own account.
    #[error("cannot delete own account")]
    SelfDelete,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("internal error")]
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::WeakPassword(_) => (StatusCode::BAD_REQUEST, "WEAK_PASSWORD"),
            ApiError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            ApiError::EmailExists => (StatusCode::BAD_REQUEST, "EMAIL_EXISTS"),
            ApiError::InvalidId(_) => (StatusCode::BAD_REQUEST, "INVALID_ID"),
            ApiError::SelfDelete => (StatusCode::BAD_REQUEST, "FORBIDDEN"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Internal details are logged, never returned.
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => ApiError::EmailExists,
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::WeakPassword(reason) => ApiError::WeakPassword(reason.to_string()),
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => ApiError::Unauthorized,
            AuthError::UnknownRole(r) => ApiError::Internal(format!("unknown role: {r}")),
            AuthError::Crypto(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) | DomainError::InvariantViolation(msg) => {
                ApiError::Validation(msg)
            }
            DomainError::InvalidId(msg) => ApiError::InvalidId(msg),
        }
    }
}
