use super::GatewayError;
use crate::github::Committer;
use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};

const FILE_FIELD: &str = "file";
const MESSAGE_FIELD: &str = "message";
const AUTHOR_NAME_FIELD: &str = "authorName";
const AUTHOR_EMAIL_FIELD: &str = "authorEmail";

/// File content plus the commit metadata that goes with it.
#[derive(Debug)]
pub struct Upload {
    pub content: Bytes,
    pub message: String,
    pub committer: Committer,
}

impl Upload {
    /// Multipart bodies must carry a `file` part; anything else is taken as
    /// the raw file content with default metadata.
    pub async fn extract(request: Request, path: &str) -> Result<Upload, GatewayError> {
        let upload = if is_multipart(request.headers()) {
            Upload::from_multipart(request, path).await?
        } else {
            Upload::from_raw(request, path).await?
        };

        if upload.content.is_empty() {
            return Err(GatewayError::EmptyPayload);
        }

        Ok(upload)
    }

    async fn from_raw(request: Request, path: &str) -> Result<Upload, GatewayError> {
        let content = Bytes::from_request(request, &())
            .await
            .map_err(|rejection| body_error(rejection.status(), rejection.body_text()))?;

        Ok(Upload {
            content,
            message: default_message(path),
            committer: Committer::default(),
        })
    }

    async fn from_multipart(request: Request, path: &str) -> Result<Upload, GatewayError> {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|rejection| body_error(rejection.status(), rejection.body_text()))?;

        let mut file = None;
        let mut message = None;
        let mut author_name = None;
        let mut author_email = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| body_error(err.status(), err.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_owned();

            let slot = match name.as_str() {
                FILE_FIELD if file.is_none() && field.file_name().is_some() => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|err| body_error(err.status(), err.body_text()))?;
                    file = Some(bytes);
                    continue;
                }
                MESSAGE_FIELD => &mut message,
                AUTHOR_NAME_FIELD => &mut author_name,
                AUTHOR_EMAIL_FIELD => &mut author_email,
                _ => continue,
            };

            if slot.is_none() {
                let text = field
                    .text()
                    .await
                    .map_err(|err| body_error(err.status(), err.body_text()))?;
                *slot = Some(text);
            }
        }

        let content = file.ok_or(GatewayError::MissingFile)?;
        let defaults = Committer::default();

        Ok(Upload {
            content,
            message: non_empty(message).unwrap_or_else(|| default_message(path)),
            committer: Committer::new(
                non_empty(author_name).unwrap_or(defaults.name),
                non_empty(author_email).unwrap_or(defaults.email),
            ),
        })
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().contains("multipart/form-data"))
        .unwrap_or(false)
}

fn default_message(path: &str) -> String {
    format!("update {}", path)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn body_error(status: StatusCode, text: String) -> GatewayError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge
    } else {
        GatewayError::InvalidBody(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    const BOUNDARY: &str = "X-BOUNDARY";

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request {
        let mut body = String::new();
        for (name, file_name, value) in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        axum::http::Request::builder()
            .method("POST")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn should_use_defaults_for_raw_body() {
        let request = axum::http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(Body::from("hello"))
            .unwrap();

        let upload = Upload::extract(request, "data.xlsx").await.unwrap();

        assert_eq!(upload.content, Bytes::from("hello"));
        assert_eq!(upload.message, "update data.xlsx");
        assert_eq!(upload.committer, Committer::default());
    }

    #[tokio::test]
    async fn should_reject_empty_raw_body() {
        let request = axum::http::Request::builder()
            .method("POST")
            .body(Body::empty())
            .unwrap();

        let err = Upload::extract(request, "data.xlsx").await.unwrap_err();

        assert!(matches!(err, GatewayError::EmptyPayload));
    }

    #[tokio::test]
    async fn should_read_file_and_metadata_from_form() {
        let request = multipart_request(&[
            ("file", Some("data.xlsx"), "hello"),
            ("message", None, "weekly export"),
            ("authorName", None, "Jane Doe"),
            ("authorEmail", None, "jane@example.com"),
        ]);

        let upload = Upload::extract(request, "data.xlsx").await.unwrap();

        assert_eq!(upload.content, Bytes::from("hello"));
        assert_eq!(upload.message, "weekly export");
        assert_eq!(upload.committer, Committer::new("Jane Doe", "jane@example.com"));
    }

    #[tokio::test]
    async fn should_fall_back_to_defaults_for_empty_fields() {
        let request = multipart_request(&[
            ("message", None, ""),
            ("file", Some("data.xlsx"), "hello"),
            ("authorName", None, ""),
        ]);

        let upload = Upload::extract(request, "data.xlsx").await.unwrap();

        assert_eq!(upload.message, "update data.xlsx");
        assert_eq!(upload.committer, Committer::default());
    }

    #[tokio::test]
    async fn should_reject_form_without_file_part() {
        let request = multipart_request(&[("file", None, "not a file"), ("message", None, "hi")]);

        let err = Upload::extract(request, "data.xlsx").await.unwrap_err();

        assert!(matches!(err, GatewayError::MissingFile));
    }

    #[tokio::test]
    async fn should_reject_empty_file_part() {
        let request = multipart_request(&[("file", Some("data.xlsx"), "")]);

        let err = Upload::extract(request, "data.xlsx").await.unwrap_err();

        assert!(matches!(err, GatewayError::EmptyPayload));
    }
}
