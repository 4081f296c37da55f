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
use kawari_core::{RecordId, UserId};
use kawari_domain::{Notification, Transaction, TransactionKind};

use crate::app::dto::{CreateTransactionRequest, UpdateTransactionRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route(
            "/:id",
            get(get_transaction)
                .patch(update_transaction)
                .delete(delete_transaction),
        )
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = Scope::for_identity(&identity);
    let items = services.transactions.list(&scope)?;
    Ok(Json(serde_json::json!({ "items": items })))
}

pub async fn create_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.amount < 0 {
        return Err(ApiError::Validation("amount must not be negative".into()));
    }

    let company = identity.company_root().ok_or(ApiError::Forbidden)?;
    let txn = Transaction::new(
        company,
        identity.user_id,
        body.kind,
        body.amount,
        body.description,
        body.occurred_at,
    );
    services.transactions.insert(txn.clone())?;

    // Best-effort secondary write: the company admin gets a notification,
    // but the transaction stands even if this fails.
    let admin = UserId::from_uuid(*company.as_uuid());
    let note = Notification::new(
        company,
        admin,
        format!(
            "{} recorded a {}",
            identity.email,
            match txn.kind {
                TransactionKind::Sale => "sale",
                TransactionKind::Expense => "expense",
            }
        ),
    );
    if let Err(e) = services.notifications.insert(note) {
        tracing::warn!(error = ?e, transaction_id = %txn.id, "notification write failed");
    }

    Ok((StatusCode::CREATED, Json(txn)))
}

pub async fn get_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    let txn = services
        .transactions
        .get(&scope, id)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(txn))
}

pub async fn update_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    let mut txn = services
        .transactions
        .get(&scope, id)?
        .ok_or(ApiError::NotFound)?;

    if let Some(kind) = body.kind {
        txn.kind = kind;
    }
    if let Some(amount) = body.amount {
        if amount < 0 {
            return Err(ApiError::Validation("amount must not be negative".into()));
        }
        txn.amount = amount;
    }
    if let Some(description) = body.description {
        txn.description = description;
    }
    if let Some(occurred_at) = body.occurred_at {
        txn.occurred_at = occurred_at;
    }
    txn.updated_at = Utc::now();

    services.transactions.update(&scope, txn.clone())?;

    Ok(Json(txn))
}

pub async fn delete_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    services.transactions.delete(&scope, id)?;

    Ok(Json(serde_json::json!({ "deleted": true, "id": id })))
}
