//! Storefront error types with HTTP status code mapping.
//!
//! [`StoreError`] is the central error type for the backend. Each variant
//! maps to a specific HTTP status code and a structured JSON error
//! response carrying a `success: false` flag.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "success": false,
///   "error": "Insufficient stock for product_id 7"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` on error responses.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
    /// Optional diagnostic detail (storage errors only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// Validation errors are rejected before any write; storage errors during
/// a multi-step operation force a full transaction rollback. Best-effort
/// side effects (coin award, notification emission, reward consumption)
/// never surface through this type — their failures are logged instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Request validation failed before any write.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unsupported order status string.
    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    /// Order with the given ID was not found.
    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    /// The user owns no pet to attach a reward coupon to.
    #[error("No pet found for user {0}")]
    PetNotFound(i64),

    /// A state precondition was violated, or a concurrent transition won
    /// the race between the guarded read and the constrained write.
    #[error("{0}")]
    Conflict(String),

    /// Requested quantity exceeds the product's available stock.
    #[error("Insufficient stock for product_id {0}")]
    InsufficientStock(i64),

    /// Coin balance is lower than the requested spend.
    #[error("Insufficient coins.")]
    InsufficientCoins,

    /// Persistence layer failure.
    #[error("storage error: {0}")]
    Database(String),
}

impl StoreError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidStatus(_)
            | Self::InsufficientStock(_)
            | Self::InsufficientCoins => StatusCode::BAD_REQUEST,
            Self::OrderNotFound(_) | Self::PetNotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Database(detail) => ErrorResponse {
                success: false,
                error: "storage error".to_string(),
                details: Some(detail),
            },
            other => ErrorResponse {
                success: false,
                error: other.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = StoreError::InvalidRequest("Missing user_id or items".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            StoreError::OrderNotFound(42).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            StoreError::PetNotFound(7).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = StoreError::Conflict("Only pending orders can be cancelled".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Only pending orders can be cancelled");
    }

    #[test]
    fn shortfall_message_carries_product_id() {
        let err = StoreError::InsufficientStock(13);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Insufficient stock for product_id 13");
    }

    #[test]
    fn database_maps_to_500() {
        let err = StoreError::Database("connection reset".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_omits_empty_details() {
        let body = ErrorResponse {
            success: false,
            error: "Insufficient coins.".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&body).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, r#"{"success":false,"error":"Insufficient coins."}"#);
    }
}
