use crate::github;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Every way a request can end other than a successful commit. The display
/// text is the `error` field of the JSON body.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Use POST")]
    MethodNotAllowed,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Missing file")]
    MissingFile,
    #[error("Empty payload")]
    EmptyPayload,
    #[error("Payload too large")]
    PayloadTooLarge,
    #[error("Invalid request body")]
    InvalidBody(String),
    #[error("GitHub lookup failed")]
    LookupFailed(String),
    #[error("GitHub commit failed")]
    CommitFailed(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::MissingFile
            | GatewayError::EmptyPayload
            | GatewayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::LookupFailed(_) | GatewayError::CommitFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            GatewayError::InvalidBody(detail)
            | GatewayError::LookupFailed(detail)
            | GatewayError::CommitFailed(detail) => Some(detail),
            _ => None,
        }
    }
}

impl From<github::Error> for GatewayError {
    fn from(err: github::Error) -> Self {
        match err {
            github::Error::ShaLookupError { .. } => GatewayError::LookupFailed(err.detail()),
            github::Error::CommitError { .. } | github::Error::SerializeRequestError { .. } => {
                GatewayError::CommitFailed(err.detail())
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            log::error!("{}: {}", self, self.detail().unwrap_or_default());
        } else {
            log::warn!("rejected request with {}: {}", status, self);
        }

        let body = ErrorBody {
            error: self.to_string(),
            detail: self.detail(),
        };

        (status, Json(body)).into_response()
    }
}
