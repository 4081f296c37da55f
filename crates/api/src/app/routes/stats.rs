use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use kawari_auth::{Identity, Scope};
use kawari_domain::TransactionKind;

use crate::app::dto::StatsResponse;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// `GET /api/stats`: totals over the transactions the caller can see, so an
/// admin gets company-wide numbers and a seller only their own.
pub async fn company_stats(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = Scope::for_identity(&identity);

    let mut total_sales: i64 = 0;
    let mut total_expenses: i64 = 0;
    for txn in services.transactions.list(&scope)? {
        match txn.kind {
            TransactionKind::Sale => total_sales = total_sales.saturating_add(txn.amount),
            TransactionKind::Expense => total_expenses = total_expenses.saturating_add(txn.amount),
        }
    }

    Ok(Json(StatsResponse {
        total_sales,
        total_expenses,
        balance: total_sales.saturating_sub(total_expenses),
    }))
}
