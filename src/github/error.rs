use crate::http;
use thiserror::Error;

const CONFLICT: u16 = 409;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to look up the file sha")]
    ShaLookupError {
        #[source]
        cause: http::Error,
    },
    #[error("Failed to commit the file")]
    CommitError {
        #[source]
        cause: http::Error,
    },
    #[error("Failed to serialize the commit request")]
    SerializeRequestError {
        #[source]
        cause: serde_json::Error,
    },
}

impl Error {
    /// GitHub answers a PUT carrying an outdated sha with 409.
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::CommitError { cause } => cause.status() == Some(CONFLICT),
            _ => false,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Error::ShaLookupError { cause } | Error::CommitError { cause } => cause.detail(),
            Error::SerializeRequestError { cause } => format!("{}: {}", self, cause),
        }
    }
}
