use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Platform role.
///
/// A closed enum rather than a free-form string: every policy decision is an
/// exhaustive match, so a misspelled role can neither grant nor deny access.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator; administers companies, never their business records.
    SuperAdmin,
    /// Company root; owns the tenant and manages its sellers.
    Admin,
    /// Company member; owns only the records it creates.
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Seller => "seller",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "seller" => Ok(Role::Seller),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}
