//! Request DTOs and JSON mapping helpers.
//!
//! The wire format is camelCase. Create/update bodies never carry ownership
//! fields: `companyId`/`userId` on tenant records are stamped server-side
//! from the authenticated identity, and anything a client sends for them is
//! ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use kawari_core::RecordId;
use kawari_domain::{InvoiceItem, InvoiceStatus, TransactionKind};

// -------------------------
// Auth
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub company_name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSellerRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSellerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// -------------------------
// Tenant resources
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Distinguishes an absent PATCH field (keep) from an explicit `null`
/// (clear): absent stays `None`, `null` becomes `Some(None)`.
fn patch_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "patch_field")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_field")]
    pub phone: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    pub kind: Option<TransactionKind>,
    pub amount: Option<i64>,
    #[serde(default, deserialize_with = "patch_field")]
    pub description: Option<Option<String>>,
    pub occurred_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub customer_id: Option<RecordId>,
    pub items: Vec<InvoiceItem>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub status: Option<InvoiceStatus>,
    pub items: Option<Vec<InvoiceItem>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub message: String,
}

// -------------------------
// Responses
// -------------------------

/// Company bookkeeping totals over the caller's visible transactions.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_sales: i64,
    pub total_expenses: i64,
    pub balance: i64,
}

/// Platform-wide counters for the super-admin view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatsResponse {
    pub companies: usize,
    pub suspended_companies: usize,
    pub sellers: usize,
}
