use super::UpsertFileBuilder;
use crate::{
    github::{Error, GithubClient},
    http::request::UpsertFileRequest,
};

/// Operations on a single file of a repository.
pub struct ContentsHandler<'a> {
    client: &'a GithubClient,
    owner: String,
    repo: String,
    path: String,
}

impl<'a> ContentsHandler<'a> {
    pub fn new(
        client: &'a GithubClient,
        owner: impl Into<String>,
        repo: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        ContentsHandler {
            client,
            owner: owner.into(),
            repo: repo.into(),
            path: path.into(),
        }
    }

    pub async fn sha(&self, branch: &str) -> Result<Option<String>, Error> {
        self.client
            .get_file_sha(&self.owner, &self.repo, &self.path, branch)
            .await
    }

    pub fn upsert(self, branch: impl Into<String>) -> UpsertFileBuilder<'a> {
        UpsertFileBuilder::new(self, branch)
    }

    pub(super) fn path(&self) -> &str {
        &self.path
    }

    pub(super) async fn put(&self, request: &UpsertFileRequest) -> Result<String, Error> {
        self.client
            .upsert_file(&self.owner, &self.repo, &self.path, request)
            .await
    }
}
