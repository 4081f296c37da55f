//! Authorization scope resolution.
//!
//! The one genuine algorithm in the system: mapping an authenticated
//! identity to the filter that bounds every read and write against the
//! tenant-scoped stores.

use kawari_core::{TenantId, UserId};

use crate::identity::Identity;
use crate::roles::Role;

/// The visibility bound derived from an identity.
///
/// - `Platform`: super-admin; administers companies and platform aggregates
///   but never tenant business records (those routes are gated off, and the
///   stores treat `Platform` as matching nothing).
/// - `Company`: admin; every record under the company root, whichever seller
///   created it.
/// - `Owner`: seller; only the records the seller itself created, even
///   within the same company.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scope {
    Platform,
    Company(TenantId),
    Owner(UserId),
}

impl Scope {
    /// Resolve the scope for an authenticated identity.
    ///
    /// Exhaustive over [`Role`]; adding a role without deciding its scope is
    /// a compile error.
    pub fn for_identity(identity: &Identity) -> Self {
        match identity.role {
            Role::SuperAdmin => Scope::Platform,
            Role::Admin => Scope::Company(
                identity
                    .company_root()
                    .unwrap_or_else(|| identity.user_id.into()),
            ),
            Role::Seller => Scope::Owner(identity.user_id),
        }
    }

    /// Whether a tenant record with the given ownership pair is visible
    /// (and mutable) under this scope.
    ///
    /// Used uniformly for list, get-by-id, update and delete, so an
    /// out-of-scope record is indistinguishable from a missing one.
    pub fn permits(&self, company_id: TenantId, owner_id: UserId) -> bool {
        match self {
            Scope::Platform => false,
            Scope::Company(root) => company_id == *root,
            Scope::Owner(user) => owner_id == *user,
        }
    }
}
