mod cors;
mod error;
mod handler;
mod state;
mod upload;

pub use error::GatewayError;
pub use state::AppState;

use crate::config::Config;
use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, Router};
use tokio::net::TcpListener;

/// Every path and method lands on the same handler; it does its own
/// method dispatch so unknown methods get the JSON 405 body.
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.config.server.max_upload_bytes;

    let router = Router::new()
        .fallback(handler::handle)
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    cors::apply(router).with_state(state)
}

pub async fn serve(config: Config) -> Result<()> {
    let bind_address = config.server.bind_address.to_owned();
    let app = router(AppState::new(config));

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Cannot bind to {}", bind_address))?;

    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Cannot listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }

    log::info!("Shutting down");
}
