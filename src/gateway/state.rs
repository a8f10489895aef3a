use crate::{config::Config, github::GithubClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub github: GithubClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            github: GithubClient::new(&config.github),
            config: Arc::new(config),
        }
    }
}
