use super::{
    client::Client,
    request::{HttpRequest, Method},
    Error,
};

pub const GITHUB_API_VERSION: &str = "2022-11-28";
pub const GATEWAY_USER_AGENT: &str = "commit-gateway";

pub trait RequestType {}
pub struct Get;
pub struct Put;

impl RequestType for Get {}
impl RequestType for Put {}

pub struct RequestBuilder<T: RequestType> {
    _marker: std::marker::PhantomData<T>,
    client: Client,
    pub request: HttpRequest,
}

impl<T> RequestBuilder<T>
where
    T: RequestType,
{
    pub(super) fn new(client: Client, method: Method, url: impl Into<String>) -> Self {
        RequestBuilder {
            _marker: std::marker::PhantomData,
            client,
            request: HttpRequest::new(method, url),
        }
    }

    pub async fn send(self) -> Result<reqwest::Response, Error> {
        self.client.send(self.request).await
    }

    pub fn github_headers(mut self, token: &str) -> Self {
        self.request
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header("User-Agent", GATEWAY_USER_AGENT);

        self
    }
}

impl RequestBuilder<Get> {
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query(key, value);
        self
    }
}

impl RequestBuilder<Put> {
    pub fn json_body(mut self, body: String) -> Self {
        self.request
            .header("Content-Type", "application/json")
            .body(body);
        self
    }
}
