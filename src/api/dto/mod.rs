//! Request and response DTOs for the REST API.

pub mod common_dto;
pub mod notification_dto;
pub mod order_dto;
pub mod reward_dto;

pub use common_dto::MessageResponse;
pub use notification_dto::{
    ManualNotificationRequest, ManualNotificationResponse, MarkReadResponse,
    NotificationListParams, NotificationListResponse,
};
pub use order_dto::{
    AdminOrdersResponse, CancelOrderRequest, CreateOrderRequest, CreateOrderResponse,
    CustomerOrdersResponse, OrderItemDto, SellerOrdersResponse, SellerStatusRequest,
    UpdateStatusRequest,
};
pub use reward_dto::{
    CoinBalanceDto, DiscountListResponse, RewardBalanceResponse, TradeDiscountRequest,
};
