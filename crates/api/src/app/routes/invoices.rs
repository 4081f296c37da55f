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
use kawari_domain::Invoice;

use crate::app::dto::{CreateInvoiceRequest, UpdateInvoiceRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route(
            "/:id",
            get(get_invoice).patch(update_invoice).delete(delete_invoice),
        )
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = Scope::for_identity(&identity);
    let items = services.invoices.list(&scope)?;
    Ok(Json(serde_json::json!({ "items": items })))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let company = identity.company_root().ok_or(ApiError::Forbidden)?;

    // A referenced customer must be visible in the caller's scope.
    if let Some(customer_id) = body.customer_id {
        let scope = Scope::for_identity(&identity);
        services
            .customers
            .get(&scope, customer_id)?
            .ok_or_else(|| ApiError::Validation("customerId does not exist".into()))?;
    }

    let invoice = Invoice::new(company, identity.user_id, body.customer_id, body.items)?;
    services.invoices.insert(invoice.clone())?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    let invoice = services
        .invoices
        .get(&scope, id)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(invoice))
}

pub async fn update_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateInvoiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    let mut invoice = services
        .invoices
        .get(&scope, id)?
        .ok_or(ApiError::NotFound)?;

    if let Some(items) = body.items {
        // Replacing the lines recomputes the total under the same rules as
        // creation.
        invoice.total = Invoice::total_of(&items)?;
        invoice.items = items;
    }
    if let Some(status) = body.status {
        invoice.status = status;
    }
    invoice.updated_at = Utc::now();

    services.invoices.update(&scope, invoice.clone())?;

    Ok(Json(invoice))
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    services.invoices.delete(&scope, id)?;

    Ok(Json(serde_json::json!({ "deleted": true, "id": id })))
}
