//! Order lifecycle handlers: create, cancel, status updates, and the
//! dashboard listings.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{
    AdminOrdersResponse, CancelOrderRequest, CreateOrderRequest, CreateOrderResponse,
    CustomerOrdersResponse, MessageResponse, SellerOrdersResponse, SellerStatusRequest,
    UpdateStatusRequest,
};
use crate::app_state::AppState;
use crate::domain::{LineItem, OrderStatus};
use crate::error::{ErrorResponse, StoreError};
use crate::service::order_service::NewOrder;

/// `POST /orders` — Create an order.
///
/// # Errors
///
/// Returns [`StoreError`] on validation failure, insufficient stock, or
/// storage failure; any error rolls the whole creation back.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "Orders",
    summary = "Create an order",
    description = "Validates stock across all items, persists the order header and lines, applies the percentage discount, and reserves inventory — atomically. A supplied reward coupon is consumed after commit as a best-effort side effect.",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = CreateOrderResponse),
        (status = 400, description = "Validation failure or insufficient stock", body = ErrorResponse),
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, StoreError> {
    let new_order = NewOrder {
        user_id: req.user_id,
        items: req.items.into_iter().map(LineItem::from).collect(),
        discount_percent: req.discount_percent,
        discount_amount: req.discount_amount,
        discount_code: req.discount_code,
        reward_id: req.reward_id,
        payment_method: req.payment_method,
    };

    let placed = state.orders.create_order(new_order).await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: placed.order_id,
        order_id_camel: placed.order_id,
        payment_method: placed.payment_method.to_string(),
    }))
}

/// `POST /orders/cancel` — Cancel a pending order.
///
/// # Errors
///
/// Returns [`StoreError`] on a blank reason, unknown order, non-pending
/// order, or storage failure.
#[utoipa::path(
    post,
    path = "/api/v1/orders/cancel",
    tag = "Orders",
    summary = "Cancel a pending order",
    description = "Releases inventory for every line and marks the order cancelled with the given reason, atomically. Only pending orders can be cancelled; the check holds a row lock against concurrent transitions.",
    request_body = CancelOrderRequest,
    responses(
        (status = 200, description = "Order cancelled", body = MessageResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order is not pending", body = ErrorResponse),
    )
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    Json(req): Json<CancelOrderRequest>,
) -> Result<impl IntoResponse, StoreError> {
    state.orders.cancel_order(req.order_id, &req.reason).await?;
    Ok(Json(MessageResponse::ok(
        "Order cancelled, stock rolled back and cancellation reason saved",
    )))
}

/// `PUT /orders/status` — Administrative status update.
///
/// # Errors
///
/// Returns [`StoreError`] on an invalid status, unknown order, or
/// storage failure.
#[utoipa::path(
    put,
    path = "/api/v1/orders/status",
    tag = "Orders",
    summary = "Update an order's status (administrative)",
    description = "Writes the new status unconditionally. Transitioning to cancelled releases inventory in the same transaction; transitioning to received awards coins post-commit.",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Invalid status value", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    )
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, StoreError> {
    let status: OrderStatus = req.status.parse()?;
    state.orders.update_order_status(req.order_id, status).await?;
    Ok(Json(MessageResponse::ok("Status updated successfully")))
}

/// `PUT /orders/{order_id}/seller-status` — Seller status update.
///
/// # Errors
///
/// Returns [`StoreError`] on an invalid status, unknown order, or
/// storage failure.
#[utoipa::path(
    put,
    path = "/api/v1/orders/{order_id}/seller-status",
    tag = "Orders",
    summary = "Update an order's status (seller)",
    description = "Writes the new status, stamping date_shipped on the shipped transition. Optionally notifies the customer and awards coins on received — both post-commit, best-effort.",
    params(
        ("order_id" = i64, Path, description = "Order to transition"),
    ),
    request_body = SellerStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Invalid status value", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    )
)]
pub async fn update_order_status_seller(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(req): Json<SellerStatusRequest>,
) -> Result<impl IntoResponse, StoreError> {
    let status: OrderStatus = req.status.parse()?;
    state
        .orders
        .update_order_status_seller(order_id, status, req.notes.as_deref(), req.notify_customer)
        .await?;
    Ok(Json(MessageResponse::ok(
        "Order status updated successfully",
    )))
}

/// `GET /orders` — All orders, for the admin dashboard.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "Orders",
    summary = "List all orders",
    description = "Per-order summaries across all customers with aggregated item names, newest placement first.",
    responses(
        (status = 200, description = "Order list", body = AdminOrdersResponse),
    )
)]
pub async fn all_orders(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StoreError> {
    let data = state.orders.all_orders().await?;
    Ok(Json(AdminOrdersResponse { data }))
}

/// `GET /orders/customer/{user_id}` — One customer's orders.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/v1/orders/customer/{user_id}",
    tag = "Orders",
    summary = "List a customer's orders",
    description = "Per-order summaries for one customer with aggregated line items, newest placement first.",
    params(
        ("user_id" = i64, Path, description = "Customer"),
    ),
    responses(
        (status = 200, description = "Order list", body = CustomerOrdersResponse),
    )
)]
pub async fn customer_orders(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StoreError> {
    let data = state.orders.customer_orders(user_id).await?;
    Ok(Json(CustomerOrdersResponse { data }))
}

/// `GET /orders/seller/{seller_id}` — Orders touching a seller's
/// products.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/v1/orders/seller/{seller_id}",
    tag = "Orders",
    summary = "List a seller's orders",
    description = "One row per order line for every order containing the seller's products, joined with product and customer columns, newest placement first.",
    params(
        ("seller_id" = i64, Path, description = "Seller"),
    ),
    responses(
        (status = 200, description = "Order line list", body = SellerOrdersResponse),
    )
)]
pub async fn seller_orders(
    State(state): State<AppState>,
    Path(seller_id): Path<i64>,
) -> Result<impl IntoResponse, StoreError> {
    let orders = state.orders.seller_orders(seller_id).await?;
    Ok(Json(SellerOrdersResponse {
        success: true,
        orders,
    }))
}

/// Order lifecycle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order).get(all_orders))
        .route("/orders/cancel", post(cancel_order))
        .route("/orders/status", put(update_order_status))
        .route(
            "/orders/{order_id}/seller-status",
            put(update_order_status_seller),
        )
        .route("/orders/customer/{user_id}", get(customer_orders))
        .route("/orders/seller/{seller_id}", get(seller_orders))
}
