use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminNotification {
    pub id: String,
    pub kind: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

// Older per-user notification shape. Nothing writes these anymore; the type
// stays so previously exported records still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,
    pub plan: Option<String>,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
}
