use super::{handler::repository_handler::RepositoryHandler, Error};
use crate::{
    config::GithubConfig,
    http::{
        client::{Client, ClientRequestBuilder},
        request::{SerializeRequest, UpsertFileRequest},
        response::{AsyncFrom, FileShaResponse, Json, Raw, Response},
    },
};

const NOT_FOUND: u16 = 404;

/// Thin client over the GitHub contents API, authenticated with a single
/// access token.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Self {
        GithubClient {
            client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            token: config.token.to_owned(),
        }
    }

    pub fn repo(&self, owner: impl Into<String>, name: impl Into<String>) -> RepositoryHandler<'_> {
        RepositoryHandler::new(self, owner, name)
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            encode_path(path)
        )
    }

    /// Returns `None` when the file does not exist on `branch`.
    pub(super) async fn get_file_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<String>, Error> {
        let uri = self.contents_url(owner, repo, path);
        log::debug!("looking up sha for {} on {}", path, branch);

        let response = self
            .client
            .get(uri)
            .github_headers(&self.token)
            .query("ref", branch)
            .send()
            .await
            .map_err(|cause| Error::ShaLookupError { cause })?;

        let response = Response::<Json, FileShaResponse>::async_from(response).await;

        if response.err().and_then(|err| err.status()) == Some(NOT_FOUND) {
            log::debug!("{} does not exist yet", path);
            return Ok(None);
        }

        let file = response
            .collect()
            .map_err(|cause| Error::ShaLookupError { cause })?;

        Ok(file.sha)
    }

    /// Returns the raw JSON body GitHub answered with.
    pub(super) async fn upsert_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        request: &UpsertFileRequest,
    ) -> Result<String, Error> {
        let uri = self.contents_url(owner, repo, path);

        let body = request
            .into_request()
            .map_err(|cause| Error::SerializeRequestError { cause })?;

        if request.sha.is_some() {
            log::debug!("updating {}", path);
        } else {
            log::debug!("creating {}", path);
        }

        let response = self
            .client
            .put(uri)
            .github_headers(&self.token)
            .json_body(body)
            .send()
            .await
            .map_err(|cause| Error::CommitError { cause })?;

        match Response::<Raw, String>::async_from(response).await {
            Response::Success(inner) => {
                log::debug!("{} committed with status {}", path, inner.status);
                Ok(inner.payload)
            }
            Response::Error(cause) => Err(Error::CommitError { cause }),
        }
    }
}

/// Percent-encodes each segment and keeps `/` so nested paths stay nested.
fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
