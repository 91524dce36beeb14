//! One-page web form for merging starter packs.
//!
//! Credentials arrive with each submission and are dropped when the request ends.

pub mod flash;
pub mod handlers;
pub mod page;

use crate::config::web::WebConfig;
use crate::utils::error::{MergeError, Result};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub struct AppState {
    pub config: WebConfig,
}

pub fn router(config: WebConfig) -> Router {
    let state = Arc::new(AppState { config });
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .with_state(state)
}

pub async fn serve(config: WebConfig) -> Result<()> {
    let bind = config.bind;
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("🌐 Listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(MergeError::Io)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
