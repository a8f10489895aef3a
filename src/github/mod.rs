mod committer;
mod error;
pub mod github_client;
mod handler;

pub use committer::Committer;
pub use error::Error;
pub use github_client::GithubClient;
pub use handler::BuilderExecutor;
