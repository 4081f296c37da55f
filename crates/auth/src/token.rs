//! JWT issuance and verification for the two token classes.
//!
//! Access tokens are short-lived bearer credentials; refresh tokens are
//! longer-lived and persisted (as a digest) so they can be revoked. The two
//! classes sign with independent secrets.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use kawari_core::UserId;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::identity::Identity;
use crate::roles::Role;

/// Claims embedded in every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: user id.
    pub sub: UserId,
    pub email: String,
    pub role: Role,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Claims embedded in every refresh token.
///
/// Deliberately minimal: role and company linkage are re-read from the
/// store on refresh, never trusted from a long-lived token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: UserId,
    /// Fresh random session identifier, unique per issuance.
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and verifies both token classes.
///
/// Constructed once at startup from [`AuthConfig`]; key misconfiguration is
/// a startup failure, never a per-request error.
pub struct TokenService {
    access: Keys,
    refresh: Keys,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access: Keys::from_secret(config.access_secret.as_bytes()),
            refresh: Keys::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: Duration::seconds(config.access_ttl_secs),
            refresh_ttl: Duration::seconds(config.refresh_ttl_secs),
        }
    }

    pub fn issue_access_token(&self, identity: &Identity) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: identity.user_id,
            email: identity.email.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.access.encoding)
            .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
    }

    /// Mint a refresh token. The caller must persist its digest before the
    /// token is handed to the client, so revocation is always possible.
    pub fn issue_refresh_token(
        &self,
        user_id: UserId,
    ) -> Result<(String, chrono::DateTime<Utc>), AuthError> {
        let now = Utc::now();
        let expires_at = now + self.refresh_ttl;
        let claims = RefreshClaims {
            sub: user_id,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.refresh.encoding)
                .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))?;

        Ok((token, expires_at))
    }

    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode(token, &self.access.decoding)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        decode(token, &self.refresh.decoding)
    }
}

fn decode<C: serde::de::DeserializeOwned>(
    token: &str,
    key: &DecodingKey,
) -> Result<C, AuthError> {
    jsonwebtoken::decode::<C>(token, key, &Validation::new(Algorithm::HS256))
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// SHA-256 hash of a raw token, hex-encoded.
///
/// This is the value persisted as `RefreshTokenRecord.token_hash`; the raw
/// token itself is never stored.
pub fn sha256_hex(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}
