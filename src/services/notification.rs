use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::AdminNotification;

pub fn derive_message(kind: &str, user_name: &str, plan: Option<&str>) -> String {
    match kind {
        "premium_plan" => {
            let plan = plan.unwrap_or_default();
            format!("{user_name} has subscribed to the {plan} premium plan.")
        }
        _ => format!("New notification from {user_name}."),
    }
}

// The whole payload is kept as `details` so the admin view can show
// whatever context the client sent along.
pub fn create(
    conn: &Connection,
    payload: serde_json::Value,
) -> Result<AdminNotification, AppError> {
    let kind = payload
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string();
    if kind.is_empty() {
        return Err(AppError::Validation("type is required".to_string()));
    }

    let user_name = payload
        .get("userName")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string();
    if user_name.is_empty() {
        return Err(AppError::Validation("userName is required".to_string()));
    }

    let plan = payload
        .get("plan")
        .and_then(|v| v.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());
    if kind == "premium_plan" && plan.is_none() {
        return Err(AppError::Validation(
            "plan is required for premium_plan notifications".to_string(),
        ));
    }

    let notification = AdminNotification {
        id: Uuid::new_v4().to_string(),
        message: derive_message(&kind, &user_name, plan),
        kind,
        details: Some(payload),
        is_read: false,
        created_at: Utc::now().naive_utc(),
    };

    queries::create_notification(conn, &notification)?;
    Ok(notification)
}

pub fn list_all(conn: &Connection) -> Result<Vec<AdminNotification>, AppError> {
    Ok(queries::get_all_notifications(conn)?)
}

pub fn mark_read(conn: &Connection, id: &str) -> Result<AdminNotification, AppError> {
    let updated = queries::mark_notification_read(conn, id)?;
    if !updated {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }

    queries::get_notification_by_id(conn, id)?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
}
