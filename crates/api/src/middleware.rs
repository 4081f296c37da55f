//! Authentication gate, suspension enforcement, and role gates.
//!
//! The gate runs per request: bearer extraction → token verification → user
//! load → suspension check → identity attached to request extensions. Role
//! gates layer after it and only inspect the attached identity.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use kawari_auth::{Identity, Role};
use kawari_core::UserId;
use kawari_domain::User;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub async fn auth_middleware(
    State(services): State<Arc<AppServices>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    // Expired, forged, and dangling-user tokens all answer identically.
    let claims = services
        .tokens
        .verify_access_token(token)
        .map_err(|_| ApiError::Unauthorized)?;

    let user = services
        .users
        .get(claims.sub)?
        .ok_or(ApiError::Unauthorized)?;

    ensure_company_not_suspended(&services, &user)?;

    req.extensions_mut().insert(Identity {
        user_id: user.id,
        email: user.email,
        role: user.role,
        company_id: user.company_id,
    });

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized)?;

    let header = header.to_str().map_err(|_| ApiError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?
        .trim();

    if token.is_empty() {
        return Err(ApiError::Unauthorized);
    }

    Ok(token)
}

/// Re-checked from the store on every request, never cached in the token,
/// so a super-admin suspension bites on the very next request. Login and
/// refresh run the same check, keeping a suspended company from minting
/// fresh tokens.
pub(crate) fn ensure_company_not_suspended(
    services: &AppServices,
    user: &User,
) -> Result<(), ApiError> {
    let root_user = match user.role {
        Role::SuperAdmin => return Ok(()),
        Role::Admin => user.clone(),
        Role::Seller => {
            let root = user.company_root().ok_or(ApiError::Unauthorized)?;
            services
                .users
                .get(UserId::from_uuid(*root.as_uuid()))?
                .ok_or(ApiError::Unauthorized)?
        }
    };

    if root_user.suspended {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

fn require_role(req: &Request, allowed: &[Role]) -> Result<(), ApiError> {
    let identity = req
        .extensions()
        .get::<Identity>()
        .ok_or(ApiError::Unauthorized)?;

    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        // Authenticated but not permitted: distinct from the 401 case.
        Err(ApiError::Forbidden)
    }
}

pub async fn admin_only(req: Request, next: Next) -> Result<Response, ApiError> {
    require_role(&req, &[Role::Admin])?;
    Ok(next.run(req).await)
}

pub async fn seller_only(req: Request, next: Next) -> Result<Response, ApiError> {
    require_role(&req, &[Role::Seller])?;
    Ok(next.run(req).await)
}

pub async fn admin_or_seller(req: Request, next: Next) -> Result<Response, ApiError> {
    require_role(&req, &[Role::Admin, Role::Seller])?;
    Ok(next.run(req).await)
}

pub async fn super_admin_only(req: Request, next: Next) -> Result<Response, ApiError> {
    require_role(&req, &[Role::SuperAdmin])?;
    Ok(next.run(req).await)
}
