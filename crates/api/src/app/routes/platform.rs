//! Super-admin platform surface: company directory, suspension switch,
//! platform counters. No tenant business records are reachable from here.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use kawari_auth::Role;
use kawari_core::UserId;
use kawari_domain::{User, UserPublic};

use crate::app::dto::PlatformStatsResponse;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/companies", get(list_companies))
        .route("/companies/:id/suspend", post(suspend_company))
        .route("/companies/:id/unsuspend", post(unsuspend_company))
        .route("/stats", get(platform_stats))
}

/// `GET /api/platform/companies`: every company, represented by its admin.
pub async fn list_companies(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let items: Vec<UserPublic> = services
        .users
        .list_admins()?
        .into_iter()
        .map(UserPublic::from)
        .collect();

    Ok(Json(serde_json::json!({ "items": items })))
}

/// Load the admin behind a `/companies/:id` path segment.
fn company_admin(services: &AppServices, id: &str) -> Result<User, ApiError> {
    let admin_id: UserId = id.parse()?;

    services
        .users
        .get(admin_id)?
        .filter(|u| u.role == Role::Admin)
        .ok_or(ApiError::NotFound)
}

fn set_suspended(
    services: &AppServices,
    id: &str,
    suspended: bool,
) -> Result<UserPublic, ApiError> {
    let mut admin = company_admin(services, id)?;

    // Idempotent: repeating the call leaves the flag as-is.
    admin.suspended = suspended;
    admin.updated_at = Utc::now();
    services.users.update(admin.clone())?;

    tracing::info!(company_id = %admin.id, suspended, "company suspension changed");

    Ok(UserPublic::from(admin))
}

pub async fn suspend_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = set_suspended(&services, &id, true)?;
    Ok(Json(serde_json::json!({ "company": admin })))
}

pub async fn unsuspend_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = set_suspended(&services, &id, false)?;
    Ok(Json(serde_json::json!({ "company": admin })))
}

/// `GET /api/platform/stats`.
pub async fn platform_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let admins = services.users.list_admins()?;
    let suspended = admins.iter().filter(|a| a.suspended).count();

    Ok(Json(PlatformStatsResponse {
        companies: admins.len(),
        suspended_companies: suspended,
        sellers: services.users.count_by_role(Role::Seller)?,
    }))
}
