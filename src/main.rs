// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training Schedule Editor API Server
//!
//! Serves the month schedule editor used by the training dashboard and
//! applies its changes to the schedule backend.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use training_schedule::{
    config::Config,
    services::{EditorRegistry, ScheduleClient, ScheduleService},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting training schedule editor");

    let client = ScheduleClient::new(&config)?;
    tracing::info!(base_url = %client.base_url(), "Schedule backend client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        schedule: ScheduleService::new(Arc::new(client)),
        editors: EditorRegistry::new(),
    });

    // Build router
    let app = training_schedule::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("training_schedule=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
