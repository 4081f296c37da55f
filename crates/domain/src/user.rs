use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kawari_auth::Role;
use kawari_core::{TenantId, UserId};

/// A platform identity.
///
/// Admins are their own company root (`company_id` equals their own id);
/// sellers reference their admin's id. The `suspended` flag is meaningful
/// only on admins and blocks the whole company while set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub company_name: Option<String>,
    /// Unique, stored trimmed and lowercased.
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub company_id: Option<TenantId>,
    pub suspended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a self-rooted admin (registration).
    pub fn new_admin(name: String, company_name: String, email: String, password_hash: String) -> Self {
        let id = UserId::new();
        let now = Utc::now();
        Self {
            id,
            name,
            company_name: Some(company_name),
            email,
            password_hash,
            role: Role::Admin,
            company_id: Some(id.into()),
            suspended: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a seller under an admin's company root.
    pub fn new_seller(name: String, email: String, password_hash: String, company_id: TenantId) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name,
            company_name: None,
            email,
            password_hash,
            role: Role::Seller,
            company_id: Some(company_id),
            suspended: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a platform super-admin (bootstrap only).
    pub fn new_super_admin(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name,
            company_name: None,
            email,
            password_hash,
            role: Role::SuperAdmin,
            company_id: None,
            suspended: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The tenant root this user belongs to (`None` for super-admins).
    pub fn company_root(&self) -> Option<TenantId> {
        match self.role {
            Role::SuperAdmin => None,
            Role::Admin => Some(self.company_id.unwrap_or_else(|| self.id.into())),
            Role::Seller => self.company_id,
        }
    }
}

/// Client-visible projection of a [`User`]; never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: UserId,
    pub name: String,
    pub company_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub company_id: Option<TenantId>,
    pub suspended: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            company_name: u.company_name,
            email: u.email,
            role: u.role,
            company_id: u.company_id,
            suspended: u.suspended,
            created_at: u.created_at,
        }
    }
}

/// Canonical form for stored and looked-up email addresses.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
