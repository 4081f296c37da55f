use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use kawari_auth::{Identity, Scope};
use kawari_core::RecordId;
use kawari_domain::Customer;

use crate::app::dto::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer)
                .patch(update_customer)
                .delete(delete_customer),
        )
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = Scope::for_identity(&identity);
    let items = services.customers.list(&scope)?;
    Ok(Json(serde_json::json!({ "items": items })))
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("name is required".into()));
    }

    // Ownership is stamped from the identity, never from the body.
    let company = identity.company_root().ok_or(ApiError::Forbidden)?;
    let customer = Customer::new(company, identity.user_id, name, body.email, body.phone);
    services.customers.insert(customer.clone())?;

    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    let customer = services
        .customers
        .get(&scope, id)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(customer))
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    let mut customer = services
        .customers
        .get(&scope, id)?
        .ok_or(ApiError::NotFound)?;

    if let Some(name) = body.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::Validation("name must not be empty".into()));
        }
        customer.name = name;
    }
    if let Some(email) = body.email {
        customer.email = email;
    }
    if let Some(phone) = body.phone {
        customer.phone = phone;
    }
    customer.updated_at = Utc::now();

    services.customers.update(&scope, customer.clone())?;

    Ok(Json(customer))
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    services.customers.delete(&scope, id)?;

    Ok(Json(serde_json::json!({ "deleted": true, "id": id })))
}
