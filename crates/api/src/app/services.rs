//! Infrastructure wiring: stores + token service, constructed once at
//! startup and injected into handlers (no global client singletons).

use std::sync::Arc;

use kawari_auth::{AuthConfig, Role, TokenService, password};
use kawari_domain::{Customer, Invoice, Notification, Transaction, User, normalize_email};
use kawari_store::{
    InMemoryRecordStore, InMemoryRefreshTokenStore, InMemoryUserStore, RefreshTokenStore,
    TenantRecordStore, UserStore,
};

use crate::app::errors::ApiError;

/// Everything a request handler needs, behind storage-agnostic traits.
pub struct AppServices {
    pub config: AuthConfig,
    pub tokens: TokenService,
    pub users: Arc<dyn UserStore>,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    pub customers: Arc<dyn TenantRecordStore<Customer>>,
    pub transactions: Arc<dyn TenantRecordStore<Transaction>>,
    pub invoices: Arc<dyn TenantRecordStore<Invoice>>,
    pub notifications: Arc<dyn TenantRecordStore<Notification>>,
}

/// Build the service graph with the in-memory store implementation.
///
/// A different deployment swaps the store construction here; nothing
/// downstream knows the difference.
pub fn build_services(config: AuthConfig) -> AppServices {
    let services = AppServices {
        tokens: TokenService::new(&config),
        config,
        users: Arc::new(InMemoryUserStore::new()),
        refresh_tokens: Arc::new(InMemoryRefreshTokenStore::new()),
        customers: Arc::new(InMemoryRecordStore::new()),
        transactions: Arc::new(InMemoryRecordStore::new()),
        invoices: Arc::new(InMemoryRecordStore::new()),
        notifications: Arc::new(InMemoryRecordStore::new()),
    };

    if let Err(e) = bootstrap_super_admin(&services) {
        tracing::error!(error = ?e, "super-admin bootstrap failed");
    }

    services
}

/// Create the platform super-admin from `SUPERADMIN_EMAIL` /
/// `SUPERADMIN_PASSWORD` if none exists yet.
fn bootstrap_super_admin(services: &AppServices) -> Result<(), ApiError> {
    let (Ok(email), Ok(pw)) = (
        std::env::var("SUPERADMIN_EMAIL"),
        std::env::var("SUPERADMIN_PASSWORD"),
    ) else {
        return Ok(());
    };

    if services.users.count_by_role(Role::SuperAdmin)? > 0 {
        return Ok(());
    }

    let hash = password::hash_password(&pw)?;
    let user = User::new_super_admin("Platform Operator".to_string(), normalize_email(&email), hash);
    services.users.insert(user)?;
    tracing::info!("bootstrapped platform super-admin");
    Ok(())
}
