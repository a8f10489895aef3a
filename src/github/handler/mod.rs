mod builder;
pub mod contents_handler;
pub mod repository_handler;

pub use builder::{upsert_file_builder::UpsertFileBuilder, BuilderExecutor};
