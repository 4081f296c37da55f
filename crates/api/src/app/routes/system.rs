use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use kawari_auth::Identity;

/// Liveness probe; no auth, no body.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// `GET /api/whoami`: echo the resolved identity (debugging aid for token
/// and scope issues).
pub async fn whoami(Extension(identity): Extension<Identity>) -> impl IntoResponse {
    Json(serde_json::json!({
        "userId": identity.user_id,
        "email": identity.email,
        "role": identity.role,
        "companyId": identity.company_id,
    }))
}
