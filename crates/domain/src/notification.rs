use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kawari_core::{RecordId, TenantId, UserId};

use crate::record::TenantRecord;

/// An in-app notification.
///
/// Notifications are best-effort side effects of primary writes; losing one
/// is tolerable, losing the primary record is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: RecordId,
    pub company_id: TenantId,
    /// The recipient; owns the notification for scoping purposes.
    pub user_id: UserId,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(company_id: TenantId, user_id: UserId, message: String) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            company_id,
            user_id,
            message,
            read: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TenantRecord for Notification {
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
