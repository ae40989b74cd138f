// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API Server
//!
//! Authenticated proxy between the workout app and its Supabase backend.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_api::{config::Config, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = Config::from_env()?;

    // Initialize structured JSON logging
    init_logging(config.debug);

    tracing::info!(
        port = config.port,
        supabase_url = %config.supabase_url,
        service_role_configured = config.service_role_configured(),
        "Starting Workout API"
    );
    if !config.service_role_configured() {
        tracing::warn!("SUPABASE_SERVICE_ROLE not set - workout operations will fail");
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone())?);

    // Build router
    let app = workout_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Initialize structured JSON logging.
fn init_logging(debug: bool) {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let crate_level = if debug {
        "workout_api=debug"
    } else {
        "workout_api=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(crate_level.parse().expect("static directive"))
                .add_directive("info".parse().expect("static directive")),
        )
        .with(format)
        .init();
}
