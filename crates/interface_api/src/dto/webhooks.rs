//! Webhook DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::PropertyMap;

/// A single HubSpot change notification
///
/// The schema is open: the fields HubSpot documents are typed (and all
/// tolerated as absent), everything else lands in `extra`. Numeric-or-string
/// members like `objectId` stay raw JSON values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(default)]
    pub event_id: Option<i64>,
    #[serde(default)]
    pub subscription_id: Option<i64>,
    #[serde(default)]
    pub portal_id: Option<i64>,
    #[serde(default)]
    pub app_id: Option<i64>,
    #[serde(default)]
    pub occurred_at: Option<Value>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub subscription_type: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub object_id: Option<Value>,
    #[serde(default)]
    pub change_source: Option<String>,
    #[serde(default)]
    pub change_flag: Option<String>,
    #[serde(default)]
    pub attempt_number: Option<i64>,
    #[serde(flatten)]
    pub extra: PropertyMap,
}

/// Acknowledgment returned to HubSpot after a webhook delivery
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub message: String,
}

impl WebhookAck {
    /// Acknowledges receipt of `count` events
    pub fn received(count: usize) -> Self {
        Self {
            status: "success",
            message: format!("Received {count} events"),
        }
    }
}
