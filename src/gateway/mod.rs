pub mod handlers;
pub mod state;
pub mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::GatewayConfig;
use crate::service::Service;
use state::AppState;

/// Build the HTTP router over a shared service
pub fn router(service: Arc<Service>) -> Router {
    let state = Arc::new(AppState::new(service));

    Router::new()
        .route(
            "/accounts",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route("/accounts/{id}", get(handlers::get_account))
        .route(
            "/transfers",
            get(handlers::list_transfers).post(handlers::create_transfer),
        )
        .with_state(state)
}

/// Start HTTP Gateway server and serve until Ctrl-C
pub async fn run_server(config: &GatewayConfig, service: Arc<Service>) -> anyhow::Result<()> {
    let app = router(service);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {} (port already in use?)", addr))?;

    info!("Gateway listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
