//! Session issuance and the refresh cookie.
//!
//! The refresh token only ever travels in an http-only cookie scoped to the
//! auth routes; the response body carries the access token alone.

use axum_extra::extract::cookie::{Cookie, SameSite};

use kawari_auth::{AuthConfig, Identity, SameSitePolicy, sha256_hex};
use kawari_core::RecordId;
use kawari_domain::RefreshTokenRecord;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub const REFRESH_COOKIE: &str = "refresh_token";
const REFRESH_COOKIE_PATH: &str = "/api/auth";

pub struct SessionTokens {
    pub access: String,
    pub refresh: String,
    /// Id of the persisted refresh record; rotation links the predecessor
    /// to it via `replaced_by`.
    pub refresh_record_id: RecordId,
}

/// Mint an access+refresh pair for the identity.
///
/// The refresh record is persisted before the tokens are returned, so the
/// token can always be revoked later.
pub fn issue_session(services: &AppServices, identity: &Identity) -> Result<SessionTokens, ApiError> {
    let access = services.tokens.issue_access_token(identity)?;
    let (refresh, expires_at) = services.tokens.issue_refresh_token(identity.user_id)?;

    let record = RefreshTokenRecord::new(identity.user_id, sha256_hex(&refresh), expires_at);
    let refresh_record_id = record.id;
    services.refresh_tokens.insert(record)?;

    Ok(SessionTokens {
        access,
        refresh,
        refresh_record_id,
    })
}

pub fn refresh_cookie(config: &AuthConfig, value: String) -> Cookie<'static> {
    let mut builder = Cookie::build((REFRESH_COOKIE, value))
        .http_only(true)
        .path(REFRESH_COOKIE_PATH)
        .secure(config.cookie_secure)
        .same_site(match config.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        });

    if let Some(secs) = config.cookie_max_age_secs {
        builder = builder.max_age(time::Duration::seconds(secs));
    }

    builder.build()
}

/// Cookie that clears the refresh token (same name/path, empty, expired).
pub fn clear_refresh_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, ""))
        .http_only(true)
        .path(REFRESH_COOKIE_PATH)
        .max_age(time::Duration::ZERO)
        .build()
}
