use serde::{Deserialize, Serialize};

use kawari_core::{TenantId, UserId};

use crate::roles::Role;

/// Authenticated identity attached to a request after the authentication
/// gate has verified the access token and loaded the user.
///
/// `company_id` is `None` for super-admins (they have no tenant) and for
/// admins whose row predates the self-rooting backfill; [`Identity::company_root`]
/// resolves both cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub company_id: Option<TenantId>,
}

impl Identity {
    /// Resolve the tenant root this identity belongs to.
    ///
    /// Admins are their own company root, so a missing `company_id` falls
    /// back to the admin's own id. Super-admins have no tenant.
    pub fn company_root(&self) -> Option<TenantId> {
        match self.role {
            Role::SuperAdmin => None,
            Role::Admin => Some(self.company_id.unwrap_or_else(|| self.user_id.into())),
            Role::Seller => self.company_id,
        }
    }
}
