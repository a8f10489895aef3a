use super::BuilderExecutor;
use crate::{
    github::{handler::contents_handler::ContentsHandler, Committer, Error},
    http::request::UpsertFileRequest,
};
use base64::{prelude::BASE64_STANDARD, Engine};

const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Creates or updates one file on one branch.
///
/// Every attempt reads the current sha right before writing, so the PUT
/// never carries a marker older than that read. A 409 answer means someone
/// else committed in between; the read-write pair is then repeated until
/// `max_attempts` is spent.
pub struct UpsertFileBuilder<'a> {
    contents: ContentsHandler<'a>,
    branch: String,
    message: String,
    content: Vec<u8>,
    committer: Committer,
    max_attempts: u32,
}

impl<'a> UpsertFileBuilder<'a> {
    pub fn new(contents: ContentsHandler<'a>, branch: impl Into<String>) -> Self {
        UpsertFileBuilder {
            contents,
            branch: branch.into(),
            message: String::new(),
            content: vec![],
            committer: Committer::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.content = content.into();
        self
    }

    pub fn committer(mut self, committer: Committer) -> Self {
        self.committer = committer;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

impl BuilderExecutor for UpsertFileBuilder<'_> {
    type Output = String;

    async fn execute(self) -> Result<Self::Output, Error> {
        let content = BASE64_STANDARD.encode(&self.content);
        let mut attempt = 1;

        loop {
            let sha = self.contents.sha(&self.branch).await?;

            let request = UpsertFileRequest::new(
                &self.message,
                &self.branch,
                content.to_owned(),
                sha,
                self.committer.to_owned().into(),
            );

            match self.contents.put(&request).await {
                Err(err) if err.is_conflict() && attempt < self.max_attempts => {
                    log::warn!(
                        "sha of {} changed before commit (attempt {}/{}), retrying",
                        self.contents.path(),
                        attempt,
                        self.max_attempts
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
