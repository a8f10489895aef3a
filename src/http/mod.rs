pub mod client;
pub mod request;
pub mod request_builder;
pub mod response;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request failed with status {status}")]
    StatusError { status: u16, message: String },
    #[error("Failed to send request")]
    SendRequestError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to read response text")]
    ReadResponseTextError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to parse response")]
    ParseResponseError {
        #[source]
        cause: serde_json::Error,
    },
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::StatusError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text handed back to gateway callers: the upstream body for status
    /// errors, the error chain otherwise.
    pub fn detail(&self) -> String {
        match self {
            Error::StatusError { message, .. } => message.to_owned(),
            Error::SendRequestError { cause } | Error::ReadResponseTextError { cause } => {
                format!("{}: {}", self, cause)
            }
            Error::ParseResponseError { cause } => format!("{}: {}", self, cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn should_expose_status_and_upstream_text() {
        let error = Error::StatusError {
            status: 422,
            message: "{\"message\":\"Invalid request\"}".to_owned(),
        };

        assert_eq!(error.status(), Some(422));
        assert_eq!(error.detail(), "{\"message\":\"Invalid request\"}");
    }

    #[test]
    fn should_prefix_parse_errors_in_detail() {
        let cause = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = Error::ParseResponseError { cause };

        assert_eq!(error.status(), None);
        assert!(error.detail().starts_with("Failed to parse response: "));
    }
}
