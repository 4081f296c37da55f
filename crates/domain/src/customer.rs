use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kawari_core::{RecordId, TenantId, UserId};

use crate::record::TenantRecord;

/// A customer of the company, created by a seller or the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: RecordId,
    pub company_id: TenantId,
    pub user_id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        company_id: TenantId,
        user_id: UserId,
        name: String,
        email: Option<String>,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            company_id,
            user_id,
            name,
            email,
            phone,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TenantRecord for Customer {
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
