//! Order endpoint DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::LineItem;
use crate::persistence::models::{AdminOrderSummary, CustomerOrderSummary, SellerOrderRow};

/// One requested order line as submitted by checkout.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderItemDto {
    /// Product being ordered.
    pub product_id: i64,
    /// Units requested.
    pub quantity: i32,
    /// Unit price the cart displayed; snapshotted onto the line.
    pub price: Decimal,
}

impl From<OrderItemDto> for LineItem {
    fn from(dto: OrderItemDto) -> Self {
        Self {
            product_id: dto.product_id,
            quantity: dto.quantity,
            price: dto.price,
        }
    }
}

/// Request body for `POST /api/v1/orders`.
///
/// Missing `user_id`/`items` deserialize to their defaults and are
/// rejected by validation with a 400, not by the JSON layer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Ordering user.
    #[serde(default)]
    pub user_id: i64,
    /// Requested lines.
    #[serde(default)]
    pub items: Vec<OrderItemDto>,
    /// Percentage discount to apply.
    #[serde(default)]
    pub discount_percent: Decimal,
    /// Absolute discount recorded on the header.
    #[serde(default)]
    pub discount_amount: Decimal,
    /// Discount code, if one was applied.
    #[serde(default)]
    pub discount_code: Option<String>,
    /// Reward coupon to consume, if one was applied.
    #[serde(default)]
    pub reward_id: Option<i64>,
    /// Payment method; anything unrecognized downgrades to `"cod"`.
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Response body for `POST /api/v1/orders`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    /// Always `true`.
    pub success: bool,
    /// New order id.
    pub order_id: i64,
    /// Same id under the camel-case key older clients read.
    #[serde(rename = "orderId")]
    pub order_id_camel: i64,
    /// Payment method actually recorded.
    pub payment_method: String,
}

/// Request body for `POST /api/v1/orders/cancel`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelOrderRequest {
    /// Order to cancel.
    #[serde(default)]
    pub order_id: i64,
    /// Required cancellation reason; blank after trimming is rejected.
    #[serde(default)]
    pub reason: String,
}

/// Request body for `PUT /api/v1/orders/status`.
///
/// Accepts both `order_id` and the camel-case `orderId` key older
/// clients send.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Order to transition.
    #[serde(default, alias = "orderId")]
    pub order_id: i64,
    /// Target status; must be one of the four lifecycle states.
    #[serde(default)]
    pub status: String,
}

/// Request body for `PUT /api/v1/orders/{order_id}/seller-status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SellerStatusRequest {
    /// Target status; must be one of the four lifecycle states.
    #[serde(default)]
    pub status: String,
    /// Optional note forwarded to the customer notification.
    #[serde(default)]
    pub notes: Option<String>,
    /// Whether to emit a customer notification. Defaults to `true`.
    #[serde(default = "default_notify")]
    pub notify_customer: bool,
}

fn default_notify() -> bool {
    true
}

/// Response body for `GET /api/v1/orders/customer/{user_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerOrdersResponse {
    /// Per-order summaries, newest first.
    pub data: Vec<CustomerOrderSummary>,
}

/// Response body for `GET /api/v1/orders`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminOrdersResponse {
    /// Per-order summaries, newest first.
    pub data: Vec<AdminOrderSummary>,
}

/// Response body for `GET /api/v1/orders/seller/{seller_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SellerOrdersResponse {
    /// Always `true`.
    pub success: bool,
    /// One row per order line, newest placement first.
    pub orders: Vec<SellerOrderRow>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_optional_fields() {
        let json = r#"{"user_id": 3, "items": [{"product_id": 1, "quantity": 2, "price": "100"}]}"#;
        let Ok(req) = serde_json::from_str::<CreateOrderRequest>(json) else {
            panic!("deserialization failed");
        };
        assert_eq!(req.user_id, 3);
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.discount_percent, Decimal::ZERO);
        assert!(req.reward_id.is_none());
        assert!(req.payment_method.is_none());
    }

    #[test]
    fn create_request_tolerates_missing_user_and_items() {
        let Ok(req) = serde_json::from_str::<CreateOrderRequest>("{}") else {
            panic!("deserialization failed");
        };
        assert_eq!(req.user_id, 0);
        assert!(req.items.is_empty());
    }

    #[test]
    fn create_response_serializes_both_order_id_keys() {
        let response = CreateOrderResponse {
            success: true,
            order_id: 42,
            order_id_camel: 42,
            payment_method: "gcash".to_string(),
        };
        let Ok(json) = serde_json::to_value(&response) else {
            panic!("serialization failed");
        };
        assert_eq!(json.get("order_id"), Some(&serde_json::json!(42)));
        assert_eq!(json.get("orderId"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn status_request_accepts_camel_case_order_id() {
        let Ok(req) =
            serde_json::from_str::<UpdateStatusRequest>(r#"{"orderId": 9, "status": "received"}"#)
        else {
            panic!("deserialization failed");
        };
        assert_eq!(req.order_id, 9);
        assert_eq!(req.status, "received");
    }

    #[test]
    fn seller_status_notify_defaults_true() {
        let Ok(req) = serde_json::from_str::<SellerStatusRequest>(r#"{"status": "shipped"}"#)
        else {
            panic!("deserialization failed");
        };
        assert!(req.notify_customer);
        assert!(req.notes.is_none());
    }
}
