use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use kawari_auth::{Identity, password, sha256_hex};
use kawari_domain::{User, UserPublic, normalize_email};

use crate::app::dto::{LoginRequest, RegisterRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::app::session::{self, REFRESH_COOKIE, clear_refresh_cookie, refresh_cookie};
use crate::middleware;

pub fn public_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
}

/// Argon2 is CPU-bound; keep it off the async worker threads.
pub(crate) async fn hash_password_blocking(plain: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| ApiError::Internal(format!("hash task failed: {e}")))?
        .map_err(ApiError::from)
}

async fn verify_password_blocking(plain: String, hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || password::verify_password(&plain, &hash))
        .await
        .map_err(|e| ApiError::Internal(format!("verify task failed: {e}")))?
        .map_err(ApiError::from)
}

fn identity_of(user: &User) -> Identity {
    Identity {
        user_id: user.id,
        email: user.email.clone(),
        role: user.role,
        company_id: user.company_id,
    }
}

/// `POST /api/auth/register`: create a self-rooted admin.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("name is required".into()));
    }

    let company_name = body
        .company_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("companyName is required".into()))?
        .to_string();

    let email = normalize_email(&body.email);
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("email is invalid".into()));
    }

    password::validate_strength(&body.password)?;
    let hash = hash_password_blocking(body.password).await?;

    let user = User::new_admin(name, company_name, email, hash);
    services.users.insert(user.clone())?;

    let tokens = session::issue_session(&services, &identity_of(&user))?;
    let jar = jar.add(refresh_cookie(&services.config, tokens.refresh));

    tracing::info!(user_id = %user.id, "admin registered");

    Ok((
        StatusCode::CREATED,
        jar,
        Json(serde_json::json!({
            "user": UserPublic::from(user),
            "token": tokens.access,
        })),
    ))
}

/// `POST /api/auth/login`.
///
/// Unknown email and wrong password return the same error, uniformly.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = normalize_email(&body.email);

    let user = services
        .users
        .find_by_email(&email)?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password_blocking(body.password, user.password_hash.clone()).await? {
        return Err(ApiError::InvalidCredentials);
    }

    middleware::ensure_company_not_suspended(&services, &user)?;

    let tokens = session::issue_session(&services, &identity_of(&user))?;
    let jar = jar.add(refresh_cookie(&services.config, tokens.refresh));

    Ok((
        StatusCode::OK,
        jar,
        Json(serde_json::json!({
            "user": UserPublic::from(user),
            "token": tokens.access,
        })),
    ))
}

/// `POST /api/auth/refresh`: rotate the refresh token.
///
/// Mint-and-persist the successor first, then revoke the consumed token and
/// link it forward. A crash in between strands the session (self-DoS), never
/// leaves two active tokens.
pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let raw = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    let claims = services
        .tokens
        .verify_refresh_token(&raw)
        .map_err(|_| ApiError::Unauthorized)?;

    let record = services
        .refresh_tokens
        .find_by_hash(&sha256_hex(&raw))?
        .ok_or(ApiError::Unauthorized)?;

    if !record.is_active(Utc::now()) {
        if record.revoked {
            // Replay of a consumed token: likely theft. Whole-chain
            // invalidation is a recorded follow-up; today only this token
            // stays dead.
            tracing::warn!(user_id = %record.user_id, "revoked refresh token replayed");
        }
        return Err(ApiError::Unauthorized);
    }

    let user = services
        .users
        .get(claims.sub)?
        .filter(|u| u.id == record.user_id)
        .ok_or(ApiError::Unauthorized)?;

    middleware::ensure_company_not_suspended(&services, &user)?;

    let tokens = session::issue_session(&services, &identity_of(&user))?;
    services
        .refresh_tokens
        .revoke(record.id, Some(tokens.refresh_record_id))?;

    let jar = jar.add(refresh_cookie(&services.config, tokens.refresh));

    Ok((StatusCode::OK, jar, Json(serde_json::json!({ "token": tokens.access }))))
}

/// `POST /api/auth/logout`: revoke the presented refresh token, clear the
/// cookie. Idempotent.
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        if let Some(record) = services.refresh_tokens.find_by_hash(&sha256_hex(cookie.value()))? {
            services.refresh_tokens.revoke(record.id, None)?;
        }
    }

    let jar = jar.add(clear_refresh_cookie());
    Ok((jar, StatusCode::NO_CONTENT))
}

/// `GET /api/auth/me`: the authenticated identity's public user.
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let user = services
        .users
        .get(identity.user_id)?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(serde_json::json!({ "user": UserPublic::from(user) })))
}
