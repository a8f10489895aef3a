mod config;
mod gateway;
mod github;
mod http;
mod logger;

use anyhow::{Context, Result};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().await.context("Cannot load configuration")?;
    logger::init(&config.log_level)?;

    log::info!(
        "Starting, committing uploads to {}/{}:{} on {}",
        config.repository.owner,
        config.repository.repo,
        config.repository.path,
        config.repository.branch
    );

    gateway::serve(config).await.context("Gateway stopped")
}
