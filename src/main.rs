//! storefront-gateway server entry point.
//!
//! Starts the Axum HTTP server over the PostgreSQL-backed services.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use storefront_gateway::api;
use storefront_gateway::app_state::AppState;
use storefront_gateway::config::GatewayConfig;
use storefront_gateway::service::{NotificationService, OrderService, RewardService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config =
        GatewayConfig::from_env().map_err(|err| anyhow::anyhow!("invalid configuration: {err}"))?;
    tracing::info!(addr = %config.listen_addr, "starting storefront-gateway");

    // Connect to PostgreSQL
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await
        .context("connecting to PostgreSQL")?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("running migrations")?;
    }

    // Build service layer
    let rewards = Arc::new(RewardService::new(pool.clone()));
    let notifications = Arc::new(NotificationService::new(pool.clone()));
    let orders = Arc::new(OrderService::new(
        pool,
        Arc::clone(&rewards),
        Arc::clone(&notifications),
    ));

    // Build application state
    let app_state = AppState {
        orders,
        rewards,
        notifications,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
