//! Credential store: user persistence.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use kawari_auth::Role;
use kawari_core::{TenantId, UserId};
use kawari_domain::User;

use crate::error::{StoreError, StoreResult};

/// User persistence contract.
///
/// Emails are expected pre-normalized (trimmed, lowercased); the store only
/// enforces their uniqueness.
pub trait UserStore: Send + Sync {
    /// Insert a new user; fails with [`StoreError::DuplicateEmail`] if the
    /// email is taken.
    fn insert(&self, user: User) -> StoreResult<()>;

    fn get(&self, id: UserId) -> StoreResult<Option<User>>;

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Replace an existing user row; fails with [`StoreError::NotFound`] if
    /// absent and [`StoreError::DuplicateEmail`] if the new email is taken
    /// by someone else.
    fn update(&self, user: User) -> StoreResult<()>;

    /// Hard-delete; only sellers are ever deleted.
    fn delete(&self, id: UserId) -> StoreResult<()>;

    /// All sellers rooted at the given company.
    fn list_sellers(&self, company_id: TenantId) -> StoreResult<Vec<User>>;

    /// All admin accounts, platform-wide (super-admin views).
    fn list_admins(&self) -> StoreResult<Vec<User>>;

    fn count_by_role(&self, role: Role) -> StoreResult<usize>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn insert(&self, user: User) -> StoreResult<()> {
        (**self).insert(user)
    }

    fn get(&self, id: UserId) -> StoreResult<Option<User>> {
        (**self).get(id)
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        (**self).find_by_email(email)
    }

    fn update(&self, user: User) -> StoreResult<()> {
        (**self).update(user)
    }

    fn delete(&self, id: UserId) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn list_sellers(&self, company_id: TenantId) -> StoreResult<Vec<User>> {
        (**self).list_sellers(company_id)
    }

    fn list_admins(&self) -> StoreResult<Vec<User>> {
        (**self).list_admins()
    }

    fn count_by_role(&self, role: Role) -> StoreResult<usize> {
        (**self).count_by_role(role)
    }
}

/// In-memory user store for dev/tests.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(_: impl std::fmt::Debug) -> StoreError {
    StoreError::Backend("user store lock poisoned".into())
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, user: User) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        if map.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        map.insert(user.id, user);
        Ok(())
    }

    fn get(&self, id: UserId) -> StoreResult<Option<User>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().find(|u| u.email == email).cloned())
    }

    fn update(&self, user: User) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        if !map.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }
        if map
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::DuplicateEmail);
        }
        map.insert(user.id, user);
        Ok(())
    }

    fn delete(&self, id: UserId) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn list_sellers(&self, company_id: TenantId) -> StoreResult<Vec<User>> {
        let map = self.inner.read().map_err(poisoned)?;
        let mut sellers: Vec<User> = map
            .values()
            .filter(|u| u.role == Role::Seller && u.company_id == Some(company_id))
            .cloned()
            .collect();
        sellers.sort_by_key(|u| u.id);
        Ok(sellers)
    }

    fn list_admins(&self) -> StoreResult<Vec<User>> {
        let map = self.inner.read().map_err(poisoned)?;
        let mut admins: Vec<User> = map
            .values()
            .filter(|u| u.role == Role::Admin)
            .cloned()
            .collect();
        admins.sort_by_key(|u| u.id);
        Ok(admins)
    }

    fn count_by_role(&self, role: Role) -> StoreResult<usize> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().filter(|u| u.role == role).count())
    }
}
