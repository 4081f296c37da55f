use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kawari_core::{RecordId, TenantId, UserId};

use crate::record::TenantRecord;

/// Direction of a bookkeeping entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Sale,
    Expense,
}

/// A recorded sale or expense.
///
/// Amounts are in the smallest currency unit and always non-negative; the
/// kind carries the direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    pub company_id: TenantId,
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        company_id: TenantId,
        user_id: UserId,
        kind: TransactionKind,
        amount: i64,
        description: Option<String>,
        occurred_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            company_id,
            user_id,
            kind,
            amount,
            description,
            occurred_at: occurred_at.unwrap_or(now),
            created_at: now,
            updated_at: now,
        }
    }
}

impl TenantRecord for Transaction {
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
