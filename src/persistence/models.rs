//! Database row models.
//!
//! Read-query rows are serialized straight into API responses, so the
//! display-oriented columns (status, payment method) stay as text here
//! rather than domain enums.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// One line of an order reduced to what stock compensation needs.
#[derive(Debug, Clone, FromRow)]
pub struct OrderLineQty {
    /// Product the line references.
    pub product_id: i64,
    /// Units reserved by the line.
    pub quantity: i32,
}

/// An unused discount coupon row from `rewards`.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct RewardRow {
    /// Coupon identity.
    pub reward_id: i64,
    /// Reward category (`"discount"`).
    pub reward_type: String,
    /// Percent-off value as stored (e.g. `"10%"`).
    pub value: String,
    /// Consumption flag; always `false` in unused-coupon listings.
    pub is_used: bool,
}

/// A row from `notifications`.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct NotificationRow {
    /// Row identity.
    pub notification_id: i64,
    /// Order the notification refers to.
    pub order_id: i64,
    /// Recipient.
    pub user_id: i64,
    /// Order status at the time of send.
    pub status: String,
    /// Message body.
    pub notes: String,
    /// Read flag, flipped by mark-all-read.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Customer-facing per-order summary with aggregated line items.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct CustomerOrderSummary {
    /// Order identity.
    pub order_id: i64,
    /// Placement timestamp.
    pub date_placed: DateTime<Utc>,
    /// Current lifecycle state.
    pub status: String,
    /// Payment method recorded at creation.
    pub payment_method: String,
    /// Percentage discount applied at creation.
    pub discount_percent: Decimal,
    /// Absolute discount recorded at creation.
    pub discount_amount: Decimal,
    /// Discount code, if one was supplied.
    pub discount_code: Option<String>,
    /// `"<name> x<qty>"` pairs joined with commas.
    pub items: String,
    /// Raw `Σ(price × quantity)` before discount.
    pub total_price: Decimal,
    /// Committed total after discount.
    pub total_amount: Decimal,
}

/// Administrative per-order summary across all customers.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct AdminOrderSummary {
    /// Order identity.
    pub order_id: i64,
    /// Owning customer's username; `null` when the user row is gone.
    pub customer_name: Option<String>,
    /// Placement timestamp.
    pub date_placed: DateTime<Utc>,
    /// Current lifecycle state.
    pub status: String,
    /// Payment method recorded at creation.
    pub payment_method: String,
    /// Committed total after discount.
    pub total_amount: Decimal,
    /// Product names joined with commas.
    pub items: Option<String>,
}

/// One order line joined with order, product, and customer columns for
/// the seller dashboard.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct SellerOrderRow {
    /// Order identity.
    pub order_id: i64,
    /// Owning customer.
    pub user_id: i64,
    /// Current lifecycle state.
    pub status: String,
    /// Placement timestamp.
    pub date_placed: DateTime<Utc>,
    /// Shipping timestamp, stamped on the seller `shipped` transition.
    pub date_shipped: Option<DateTime<Utc>>,
    /// Payment method recorded at creation.
    pub payment_method: String,
    /// Percentage discount applied at creation.
    pub discount_percent: Decimal,
    /// Absolute discount recorded at creation.
    pub discount_amount: Decimal,
    /// Discount code, if one was supplied.
    pub discount_code: Option<String>,
    /// Reward coupon consumed by the order, if any.
    pub reward_id: Option<i64>,
    /// Reason captured when the customer cancelled.
    pub cancellation_reason: Option<String>,
    /// Cancellation timestamp.
    pub cancellation_date: Option<DateTime<Utc>>,
    /// Line identity.
    pub order_item_id: i64,
    /// Units ordered on this line.
    pub quantity: i32,
    /// Unit price captured at order time.
    pub price: Decimal,
    /// Product name.
    pub name: String,
    /// Product identity.
    pub product_id: i64,
    /// Customer username.
    pub username: String,
    /// Customer email.
    pub email: String,
}
