//! Seller management, admin-only, scoped to the admin's own company.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use kawari_auth::{Identity, Role, password};
use kawari_core::UserId;
use kawari_domain::{User, UserPublic, normalize_email};

use crate::app::dto::{CreateSellerRequest, UpdateSellerRequest};
use crate::app::errors::ApiError;
use crate::app::routes::auth::hash_password_blocking;
use crate::app::services::AppServices;
use crate::middleware;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sellers).post(create_seller))
        .route("/:id", axum::routing::patch(update_seller).delete(delete_seller))
        .layer(axum::middleware::from_fn(middleware::admin_only))
}

pub async fn list_sellers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let root = identity.company_root().ok_or(ApiError::Forbidden)?;
    let items: Vec<UserPublic> = services
        .users
        .list_sellers(root)?
        .into_iter()
        .map(UserPublic::from)
        .collect();

    Ok(Json(serde_json::json!({ "items": items })))
}

pub async fn create_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateSellerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let root = identity.company_root().ok_or(ApiError::Forbidden)?;

    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("name is required".into()));
    }
    let email = normalize_email(&body.email);
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("email is invalid".into()));
    }

    password::validate_strength(&body.password)?;
    let hash = hash_password_blocking(body.password).await?;

    // companyId always comes from the admin's own root, never the body.
    let seller = User::new_seller(name, email, hash, root);
    services.users.insert(seller.clone())?;

    tracing::info!(seller_id = %seller.id, company_id = %root, "seller created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "user": UserPublic::from(seller) })),
    ))
}

/// Load a seller by path id, company-scoped: a seller of another company
/// answers exactly like a missing one.
fn seller_in_company(
    services: &AppServices,
    identity: &Identity,
    id: &str,
) -> Result<User, ApiError> {
    let seller_id: UserId = id.parse()?;
    let root = identity.company_root().ok_or(ApiError::Forbidden)?;

    services
        .users
        .get(seller_id)?
        .filter(|u| u.role == Role::Seller && u.company_id == Some(root))
        .ok_or(ApiError::NotFound)
}

pub async fn update_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateSellerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut seller = seller_in_company(&services, &identity, &id)?;

    if let Some(name) = body.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::Validation("name must not be empty".into()));
        }
        seller.name = name;
    }
    if let Some(email) = body.email {
        let email = normalize_email(&email);
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::Validation("email is invalid".into()));
        }
        seller.email = email;
    }
    if let Some(pw) = body.password {
        password::validate_strength(&pw)?;
        seller.password_hash = hash_password_blocking(pw).await?;
    }
    seller.updated_at = Utc::now();

    services.users.update(seller.clone())?;

    Ok(Json(serde_json::json!({ "user": UserPublic::from(seller) })))
}

pub async fn delete_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let target: UserId = id.parse()?;
    if target == identity.user_id {
        return Err(ApiError::SelfDelete);
    }

    let seller = seller_in_company(&services, &identity, &id)?;
    services.users.delete(seller.id)?;

    tracing::info!(seller_id = %seller.id, "seller deleted");

    Ok(Json(serde_json::json!({ "deleted": true, "id": seller.id })))
}
