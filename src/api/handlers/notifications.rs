//! Notification handlers: listing, mark-all-read, and manual creation.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{
    ManualNotificationRequest, ManualNotificationResponse, MarkReadResponse,
    NotificationListParams, NotificationListResponse,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, StoreError};

/// `GET /notifications/{user_id}` — List a user's notifications.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/{user_id}",
    tag = "Notifications",
    summary = "List a user's notifications",
    description = "Newest first, capped at 50, optionally filtered to rows created after the `since` cutoff.",
    params(
        ("user_id" = i64, Path, description = "Recipient"),
        NotificationListParams,
    ),
    responses(
        (status = 200, description = "Notification list", body = NotificationListResponse),
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<NotificationListParams>,
) -> Result<impl IntoResponse, StoreError> {
    let notifications = state.notifications.list(user_id, params.since).await?;
    Ok(Json(NotificationListResponse {
        success: true,
        notifications,
    }))
}

/// `PUT /notifications/{user_id}/read` — Mark all notifications read.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on update failure.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/{user_id}/read",
    tag = "Notifications",
    summary = "Mark all of a user's notifications as read",
    params(
        ("user_id" = i64, Path, description = "Recipient"),
    ),
    responses(
        (status = 200, description = "Unread notifications flipped", body = MarkReadResponse),
    )
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StoreError> {
    let updated_count = state.notifications.mark_all_read(user_id).await?;
    Ok(Json(MarkReadResponse {
        success: true,
        message: format!("Marked {updated_count} notifications as read"),
        updated_count,
    }))
}

/// `POST /notifications` — Insert a notification directly.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on insert failure.
#[utoipa::path(
    post,
    path = "/api/v1/notifications",
    tag = "Notifications",
    summary = "Create a notification manually",
    description = "Back-office utility: inserts a notification row as given, without resolving the order's owner.",
    request_body = ManualNotificationRequest,
    responses(
        (status = 200, description = "Notification created", body = ManualNotificationResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(req): Json<ManualNotificationRequest>,
) -> Result<impl IntoResponse, StoreError> {
    let notification_id = state
        .notifications
        .notify_manual(req.user_id, req.order_id, &req.status, req.notes.as_deref())
        .await?;
    Ok(Json(ManualNotificationResponse {
        success: true,
        message: "Notification created".to_string(),
        notification_id,
    }))
}

/// Notification routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", post(create_notification))
        .route("/notifications/{user_id}", get(list_notifications))
        .route("/notifications/{user_id}/read", put(mark_all_read))
}
