use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::SecondsFormat;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::AdminNotification;
use crate::services::notification;
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    message: String,
    details: Option<serde_json::Value>,
    is_read: bool,
    created_at: String,
}

impl From<AdminNotification> for NotificationResponse {
    fn from(n: AdminNotification) -> Self {
        NotificationResponse {
            id: n.id,
            kind: n.kind,
            message: n.message,
            details: n.details,
            is_read: n.is_read,
            created_at: n.created_at.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

// POST /api/notify-admin
pub async fn notify_admin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<NotificationResponse>), AppError> {
    let notification = {
        let db = state.db.lock().unwrap();
        notification::create(&db, payload)?
    };

    Ok((StatusCode::CREATED, Json(notification.into())))
}

// GET /api/notify-admin/notifications
pub async fn get_notifications(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let notifications = {
        let db = state.db.lock().unwrap();
        notification::list_all(&db)?
    };

    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

// PUT /api/notify-admin/notifications/:id
pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<NotificationResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let notification = {
        let db = state.db.lock().unwrap();
        notification::mark_read(&db, &id)?
    };

    Ok(Json(notification.into()))
}
