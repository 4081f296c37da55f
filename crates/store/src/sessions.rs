//! Credential store: refresh-token records.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use kawari_core::RecordId;
use kawari_domain::RefreshTokenRecord;

use crate::error::{StoreError, StoreResult};

/// Refresh-token persistence contract.
///
/// Records are append-and-revoke: never deleted, so the rotation chain
/// doubles as an audit trail.
pub trait RefreshTokenStore: Send + Sync {
    fn insert(&self, record: RefreshTokenRecord) -> StoreResult<()>;

    fn find_by_hash(&self, token_hash: &str) -> StoreResult<Option<RefreshTokenRecord>>;

    /// Mark a record revoked, optionally linking the successor minted by
    /// the rotation that consumed it.
    fn revoke(&self, id: RecordId, replaced_by: Option<RecordId>) -> StoreResult<()>;
}

impl<S> RefreshTokenStore for Arc<S>
where
    S: RefreshTokenStore + ?Sized,
{
    fn insert(&self, record: RefreshTokenRecord) -> StoreResult<()> {
        (**self).insert(record)
    }

    fn find_by_hash(&self, token_hash: &str) -> StoreResult<Option<RefreshTokenRecord>> {
        (**self).find_by_hash(token_hash)
    }

    fn revoke(&self, id: RecordId, replaced_by: Option<RecordId>) -> StoreResult<()> {
        (**self).revoke(id, replaced_by)
    }
}

/// In-memory refresh-token store for dev/tests.
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenStore {
    inner: RwLock<HashMap<RecordId, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(_: impl std::fmt::Debug) -> StoreError {
    StoreError::Backend("refresh-token store lock poisoned".into())
}

impl RefreshTokenStore for InMemoryRefreshTokenStore {
    fn insert(&self, record: RefreshTokenRecord) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(record.id, record);
        Ok(())
    }

    fn find_by_hash(&self, token_hash: &str) -> StoreResult<Option<RefreshTokenRecord>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().find(|r| r.token_hash == token_hash).cloned())
    }

    fn revoke(&self, id: RecordId, replaced_by: Option<RecordId>) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.revoked = true;
        if replaced_by.is_some() {
            record.replaced_by = replaced_by;
        }
        Ok(())
    }
}
