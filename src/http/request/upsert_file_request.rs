use super::committer_request::CommitterRequest;
use serde::{Deserialize, Serialize};

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
///
/// `sha` is left out entirely when the file does not exist yet; GitHub
/// treats that as a create.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertFileRequest {
    pub message: String,
    pub branch: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    pub committer: CommitterRequest,
}

impl UpsertFileRequest {
    pub fn new(
        message: impl Into<String>,
        branch: impl Into<String>,
        content: impl Into<String>,
        sha: Option<String>,
        committer: CommitterRequest,
    ) -> Self {
        Self {
            message: message.into(),
            branch: branch.into(),
            content: content.into(),
            sha,
            committer,
        }
    }
}
