//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store/token wiring behind storage-agnostic traits
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs, `session.rs`: token pair + refresh cookie
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use kawari_auth::AuthConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod session;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AuthConfig) -> Router {
    build_app_with(Arc::new(services::build_services(config)))
}

/// Build the router over an existing service graph. The black-box tests use
/// this to seed stores directly before serving.
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    let auth_gate = axum::middleware::from_fn_with_state(
        services.clone(),
        middleware::auth_middleware,
    );

    // /api/auth: register/login/refresh/logout are public; me + seller
    // management require the gate (sellers additionally admin-only).
    let auth_routes = routes::auth::public_router().merge(
        Router::new()
            .route("/me", get(routes::auth::me))
            .nest("/sellers", routes::sellers::router())
            .layer(auth_gate.clone()),
    );

    // Tenant business records: admins and sellers only; super-admins are
    // gated off these routes entirely.
    let tenant_routes = Router::new()
        .nest("/customers", routes::customers::router())
        .nest("/transactions", routes::transactions::router())
        .nest("/invoices", routes::invoices::router())
        .nest("/notifications", routes::notifications::router())
        .route("/stats", get(routes::stats::company_stats))
        .layer(
            ServiceBuilder::new()
                .layer(auth_gate.clone())
                .layer(axum::middleware::from_fn(middleware::admin_or_seller)),
        );

    let platform_routes = routes::platform::router().layer(
        ServiceBuilder::new()
            .layer(auth_gate.clone())
            .layer(axum::middleware::from_fn(middleware::super_admin_only)),
    );

    let whoami = Router::new()
        .route("/whoami", get(routes::system::whoami))
        .layer(auth_gate);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", auth_routes)
                .nest("/platform", platform_routes)
                .merge(tenant_routes)
                .merge(whoami),
        )
        .layer(Extension(services))
}
