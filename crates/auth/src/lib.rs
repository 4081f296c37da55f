//! `kawari-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! to mint/verify tokens, hash passwords, and resolve an authenticated
//! identity into the scope that bounds its data access. Loading users and
//! enforcing the scope against a store happen elsewhere.

pub mod config;
pub mod error;
pub mod identity;
pub mod password;
pub mod roles;
pub mod scope;
pub mod token;

pub use config::{AuthConfig, SameSitePolicy};
pub use error::AuthError;
pub use identity::Identity;
pub use roles::Role;
pub use scope::Scope;
pub use token::{AccessClaims, RefreshClaims, TokenService, sha256_hex};
