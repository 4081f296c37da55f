use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use kawari_auth::{Identity, Scope};
use kawari_core::RecordId;
use kawari_domain::Notification;

use crate::app::dto::CreateNotificationRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_notifications).post(create_notification))
        .route("/:id", get(get_notification).delete(delete_notification))
        .route("/:id/read", post(mark_read))
}

pub async fn list_notifications(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = Scope::for_identity(&identity);
    let items = services.notifications.list(&scope)?;
    Ok(Json(serde_json::json!({ "items": items })))
}

pub async fn create_notification(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = body.message.trim().to_string();
    if message.is_empty() {
        return Err(ApiError::Validation("message is required".into()));
    }

    let company = identity.company_root().ok_or(ApiError::Forbidden)?;
    let note = Notification::new(company, identity.user_id, message);
    services.notifications.insert(note.clone())?;

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_notification(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    let note = services
        .notifications
        .get(&scope, id)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(note))
}

pub async fn mark_read(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    let mut note = services
        .notifications
        .get(&scope, id)?
        .ok_or(ApiError::NotFound)?;

    note.read = true;
    note.updated_at = Utc::now();
    services.notifications.update(&scope, note.clone())?;

    Ok(Json(note))
}

pub async fn delete_notification(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let scope = Scope::for_identity(&identity);

    services.notifications.delete(&scope, id)?;

    Ok(Json(serde_json::json!({ "deleted": true, "id": id })))
}
