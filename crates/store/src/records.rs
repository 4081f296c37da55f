//! Tenant-scoped record stores.
//!
//! Every read and write is filtered by the caller's [`Scope`]; a record
//! outside the scope is reported exactly like a missing one, so another
//! tenant's ids cannot be probed.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use kawari_auth::Scope;
use kawari_core::RecordId;
use kawari_domain::TenantRecord;

use crate::error::{StoreError, StoreResult};

/// Persistence contract for one tenant-scoped collection.
pub trait TenantRecordStore<T: TenantRecord>: Send + Sync {
    /// Insert a freshly stamped record. The ownership pair on the record is
    /// the handler's responsibility (derived from the identity, never from
    /// client input).
    fn insert(&self, record: T) -> StoreResult<()>;

    fn get(&self, scope: &Scope, id: RecordId) -> StoreResult<Option<T>>;

    fn list(&self, scope: &Scope) -> StoreResult<Vec<T>>;

    /// Replace a record that exists and is visible under the scope.
    fn update(&self, scope: &Scope, record: T) -> StoreResult<()>;

    fn delete(&self, scope: &Scope, id: RecordId) -> StoreResult<()>;
}

impl<T, S> TenantRecordStore<T> for Arc<S>
where
    T: TenantRecord,
    S: TenantRecordStore<T> + ?Sized,
{
    fn insert(&self, record: T) -> StoreResult<()> {
        (**self).insert(record)
    }

    fn get(&self, scope: &Scope, id: RecordId) -> StoreResult<Option<T>> {
        (**self).get(scope, id)
    }

    fn list(&self, scope: &Scope) -> StoreResult<Vec<T>> {
        (**self).list(scope)
    }

    fn update(&self, scope: &Scope, record: T) -> StoreResult<()> {
        (**self).update(scope, record)
    }

    fn delete(&self, scope: &Scope, id: RecordId) -> StoreResult<()> {
        (**self).delete(scope, id)
    }
}

/// In-memory tenant-record store for dev/tests.
#[derive(Debug)]
pub struct InMemoryRecordStore<T> {
    inner: RwLock<HashMap<RecordId, T>>,
}

impl<T> InMemoryRecordStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(_: impl std::fmt::Debug) -> StoreError {
    StoreError::Backend("record store lock poisoned".into())
}

fn in_scope<T: TenantRecord>(scope: &Scope, record: &T) -> bool {
    scope.permits(record.company_id(), record.owner_id())
}

impl<T> TenantRecordStore<T> for InMemoryRecordStore<T>
where
    T: TenantRecord + Clone + Send + Sync + 'static,
{
    fn insert(&self, record: T) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(record.record_id(), record);
        Ok(())
    }

    fn get(&self, scope: &Scope, id: RecordId) -> StoreResult<Option<T>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&id).filter(|r| in_scope(scope, *r)).cloned())
    }

    fn list(&self, scope: &Scope) -> StoreResult<Vec<T>> {
        let map = self.inner.read().map_err(poisoned)?;
        let mut records: Vec<T> = map
            .values()
            .filter(|r| in_scope(scope, *r))
            .cloned()
            .collect();
        // UUIDv7 ids are time-ordered, so this is creation order.
        records.sort_by_key(|r| r.record_id());
        Ok(records)
    }

    fn update(&self, scope: &Scope, record: T) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        match map.get(&record.record_id()) {
            Some(existing) if in_scope(scope, existing) => {
                map.insert(record.record_id(), record);
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    fn delete(&self, scope: &Scope, id: RecordId) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        match map.get(&id) {
            Some(existing) if in_scope(scope, existing) => {
                map.remove(&id);
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }
}
