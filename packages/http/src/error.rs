use std::time::Duration;

use crate::mode::Mode;

/// Errors raised while building or sending an HTTP request.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid API URL: {message}")]
    InvalidUrl { message: String },

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("Connection failed: {message}")]
    Connection { message: String },

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Outcome of a failed query, as shown to the user.
///
/// A rejected query always renders as the fixed per-mode message so that no
/// partial response data ever reaches the terminal.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The API answered with a non-2xx status.
    #[error("{}", .0.rejection_message())]
    Rejected(Mode),

    /// The request never produced a response (connect failure, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be built (bad header value and the like).
    #[error("Request error: {0}")]
    Request(String),

    /// A 2xx response whose body is not JSON.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<Error> for QueryError {
    fn from(error: Error) -> Self {
        match error {
            Error::Http(ref e) if e.is_builder() => QueryError::Request(error.to_string()),
            Error::Http(_) | Error::Connection { .. } | Error::Timeout(_) => {
                QueryError::Network(error.to_string())
            }
            other => QueryError::Request(other.to_string()),
        }
    }
}
