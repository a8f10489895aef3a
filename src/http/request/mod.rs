mod committer_request;
mod upsert_file_request;

pub use committer_request::CommitterRequest;
pub use upsert_file_request::UpsertFileRequest;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

/// A fully described outbound call, turned into a `reqwest` request by
/// [`super::client::Client::send`].
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        HttpRequest {
            method,
            url: url.into(),
            query: vec![],
            headers: vec![],
            body: None,
        }
    }

    pub fn header(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn bearer_auth(&mut self, token: &str) -> &mut Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    pub fn query(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(&mut self, body: String) -> &mut Self {
        self.body = Some(body);
        self
    }
}

pub trait SerializeRequest {
    fn into_request(&self) -> serde_json::Result<String>
    where
        Self: Serialize + Sized,
    {
        serde_json::to_string(self)
    }
}

impl SerializeRequest for UpsertFileRequest {}
