use super::contents_handler::ContentsHandler;
use crate::github::GithubClient;

pub struct RepositoryHandler<'a> {
    client: &'a GithubClient,
    owner: String,
    repo: String,
}

impl<'a> RepositoryHandler<'a> {
    pub fn new(client: &'a GithubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepositoryHandler {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn contents(&self, path: impl Into<String>) -> ContentsHandler<'a> {
        ContentsHandler::new(self.client, &self.owner, &self.repo, path)
    }
}
