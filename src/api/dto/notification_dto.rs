//! Notification endpoint DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::persistence::models::NotificationRow;

/// Query parameters for the notification listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct NotificationListParams {
    /// Only return notifications created after this instant.
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
}

/// Response body for `GET /api/v1/notifications/{user_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    /// Always `true`.
    pub success: bool,
    /// Newest-first notifications, capped at 50.
    pub notifications: Vec<NotificationRow>,
}

/// Response body for `PUT /api/v1/notifications/{user_id}/read`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MarkReadResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Number of notifications flipped to read.
    pub updated_count: u64,
}

/// Request body for `POST /api/v1/notifications`.
///
/// Accepts both snake-case and the camel-case keys older clients send.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ManualNotificationRequest {
    /// Recipient.
    #[serde(default, alias = "userId")]
    pub user_id: i64,
    /// Order the notification refers to.
    #[serde(default, alias = "orderId")]
    pub order_id: i64,
    /// Status text to record.
    #[serde(default)]
    pub status: String,
    /// Message body; blank falls back to a fixed default.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Response body for `POST /api/v1/notifications`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManualNotificationResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// New notification id.
    pub notification_id: i64,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn manual_request_accepts_camel_case_keys() {
        let json = r#"{"userId": 7, "orderId": 11, "status": "shipped"}"#;
        let Ok(req) = serde_json::from_str::<ManualNotificationRequest>(json) else {
            panic!("deserialization failed");
        };
        assert_eq!(req.user_id, 7);
        assert_eq!(req.order_id, 11);
        assert_eq!(req.status, "shipped");
    }

    #[test]
    fn list_params_default_to_no_cutoff() {
        let Ok(params) = serde_json::from_str::<NotificationListParams>("{}") else {
            panic!("deserialization failed");
        };
        assert!(params.since.is_none());
    }
}
