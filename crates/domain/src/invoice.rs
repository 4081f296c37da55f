use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kawari_core::{DomainError, DomainResult, RecordId, TenantId, UserId};

use crate::record::TenantRecord;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
}

/// One invoice line. `unit_price` is in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: i64,
    pub unit_price: i64,
}

impl InvoiceItem {
    fn line_total(&self) -> DomainResult<i64> {
        self.quantity
            .checked_mul(self.unit_price)
            .ok_or_else(|| DomainError::invariant("invoice line amount overflow"))
    }
}

/// An invoice issued to a customer, with denormalized line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: RecordId,
    pub company_id: TenantId,
    pub user_id: UserId,
    pub customer_id: Option<RecordId>,
    pub items: Vec<InvoiceItem>,
    pub total: i64,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Build an invoice, validating the line items.
    pub fn new(
        company_id: TenantId,
        user_id: UserId,
        customer_id: Option<RecordId>,
        items: Vec<InvoiceItem>,
    ) -> DomainResult<Self> {
        let total = Self::total_of(&items)?;
        let now = Utc::now();
        Ok(Self {
            id: RecordId::new(),
            company_id,
            user_id,
            customer_id,
            items,
            total,
            status: InvoiceStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sum of line totals; rejects empty invoices and non-positive lines.
    pub fn total_of(items: &[InvoiceItem]) -> DomainResult<i64> {
        if items.is_empty() {
            return Err(DomainError::validation("invoice requires at least one item"));
        }

        let mut total: i64 = 0;
        for item in items {
            if item.quantity <= 0 {
                return Err(DomainError::validation("item quantity must be positive"));
            }
            if item.unit_price < 0 {
                return Err(DomainError::validation("item unit price must not be negative"));
            }
            total = total
                .checked_add(item.line_total()?)
                .ok_or_else(|| DomainError::invariant("invoice total overflow"))?;
        }
        Ok(total)
    }
}

impl TenantRecord for Invoice {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn company_id(&self) -> TenantId {
        self.company_id
    }

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}
