use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kawari_core::{RecordId, UserId};

/// One outstanding session-renewal credential.
///
/// Only the SHA-256 digest of the signed token is stored. Rotation revokes
/// the predecessor and links it to its successor; records are kept as an
/// audit trail rather than deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    /// Id of the record minted by the rotation that consumed this token.
    pub replaced_by: Option<RecordId>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn new(user_id: UserId, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            user_id,
            token_hash,
            expires_at,
            revoked: false,
            replaced_by: None,
            created_at: Utc::now(),
        }
    }

    /// Usable for rotation: neither revoked nor past expiry.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn freshly_minted_record_is_active() {
        let rec = RefreshTokenRecord::new(UserId::new(), "digest".into(), Utc::now() + Duration::days(30));
        assert!(rec.is_active(Utc::now()));
    }

    #[test]
    fn revoked_or_expired_records_are_inactive() {
        let now = Utc::now();
        let mut rec = RefreshTokenRecord::new(UserId::new(), "digest".into(), now + Duration::days(30));
        rec.revoked = true;
        assert!(!rec.is_active(now));

        let stale = RefreshTokenRecord::new(UserId::new(), "digest".into(), now - Duration::seconds(1));
        assert!(!stale.is_active(now));
    }
}
