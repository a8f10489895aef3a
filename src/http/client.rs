use super::{
    request::{HttpRequest, Method},
    request_builder::{Get, Put, RequestBuilder},
    Error,
};

#[derive(Clone, Debug, Default)]
pub struct Client(reqwest::Client);

impl Client {
    pub fn new() -> Client {
        Client(reqwest::Client::new())
    }

    pub async fn send(&self, request: HttpRequest) -> Result<reqwest::Response, Error> {
        let mut builder = self.0.request(request.method.into(), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let request = builder
            .build()
            .map_err(|cause| Error::SendRequestError { cause })?;

        self.0
            .execute(request)
            .await
            .map_err(|cause| Error::SendRequestError { cause })
    }
}

pub trait ClientRequestBuilder {
    fn get(&self, url: impl Into<String>) -> RequestBuilder<Get>;
    fn put(&self, url: impl Into<String>) -> RequestBuilder<Put>;
}

impl ClientRequestBuilder for Client {
    fn get(&self, url: impl Into<String>) -> RequestBuilder<Get> {
        RequestBuilder::new(self.clone(), Method::Get, url)
    }

    fn put(&self, url: impl Into<String>) -> RequestBuilder<Put> {
        RequestBuilder::new(self.clone(), Method::Put, url)
    }
}
