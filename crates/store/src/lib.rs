//! `kawari-store` — storage-agnostic persistence boundary.
//!
//! The authentication gate and the resource handlers depend only on the
//! traits here, never on a concrete store's query dialect; the deployment
//! picks an implementation at startup and injects it explicitly. This crate
//! ships the in-memory reference implementation used by dev and tests.

pub mod error;
pub mod records;
pub mod sessions;
pub mod users;

pub use error::{StoreError, StoreResult};
pub use records::{InMemoryRecordStore, TenantRecordStore};
pub use sessions::{InMemoryRefreshTokenStore, RefreshTokenStore};
pub use users::{InMemoryUserStore, UserStore};
