//! Shared DTO types used across multiple endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Generic success envelope with a human-readable message.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Always `true` on success responses.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
}

impl MessageResponse {
    /// Builds a success response with the given message.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
