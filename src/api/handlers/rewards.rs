//! Reward handlers: coin balance, coupon listing, and coupon trading.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CoinBalanceDto, DiscountListResponse, MessageResponse, RewardBalanceResponse,
    TradeDiscountRequest,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, StoreError};

/// `GET /rewards/{user_id}` — Coin balance.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/v1/rewards/{user_id}",
    tag = "Rewards",
    summary = "Get a user's coin balance",
    description = "Sums the user's signed coin ledger entries; zero for a user with no history.",
    params(
        ("user_id" = i64, Path, description = "User"),
    ),
    responses(
        (status = 200, description = "Coin balance", body = RewardBalanceResponse),
    )
)]
pub async fn coin_balance(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StoreError> {
    let total_coins = state.rewards.coin_balance(user_id).await?;
    Ok(Json(RewardBalanceResponse {
        success: true,
        data: CoinBalanceDto { total_coins },
    }))
}

/// `GET /rewards/{user_id}/discounts` — Unconsumed discount coupons.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/v1/rewards/{user_id}/discounts",
    tag = "Rewards",
    summary = "List a user's unused discount coupons",
    params(
        ("user_id" = i64, Path, description = "User"),
    ),
    responses(
        (status = 200, description = "Coupon list", body = DiscountListResponse),
    )
)]
pub async fn unused_discounts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StoreError> {
    let discounts = state.rewards.unused_discounts(user_id).await?;
    Ok(Json(DiscountListResponse {
        success: true,
        discounts,
    }))
}

/// `POST /rewards/trade` — Trade coins for a discount coupon.
///
/// # Errors
///
/// Returns [`StoreError`] on missing fields, insufficient coins, a user
/// with no pet, or storage failure.
#[utoipa::path(
    post,
    path = "/api/v1/rewards/trade",
    tag = "Rewards",
    summary = "Trade coins for a discount coupon",
    description = "Verifies the balance covers the cost, spends the coins, and mints a percent-off coupon bound to one of the user's pets — atomically.",
    request_body = TradeDiscountRequest,
    responses(
        (status = 200, description = "Coupon minted", body = MessageResponse),
        (status = 400, description = "Missing data or insufficient coins", body = ErrorResponse),
        (status = 404, description = "No pet found for user", body = ErrorResponse),
    )
)]
pub async fn trade_discount(
    State(state): State<AppState>,
    Json(req): Json<TradeDiscountRequest>,
) -> Result<impl IntoResponse, StoreError> {
    state
        .rewards
        .trade_discount(req.user_id, req.percent, req.cost)
        .await?;
    Ok(Json(MessageResponse::ok(format!(
        "You received a {}% OFF coupon!",
        req.percent
    ))))
}

/// Reward routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rewards/{user_id}", get(coin_balance))
        .route("/rewards/{user_id}/discounts", get(unused_discounts))
        .route("/rewards/trade", post(trade_discount))
}
