//! Error types for Kitsu API operations.

use thiserror::Error;

/// Errors that can occur during Kitsu API operations.
#[derive(Debug, Error)]
pub enum KitsuError {
    /// Configuration value is missing or invalid.
    #[error("Kitsu configuration error: {0}")]
    Config(String),

    /// A caller-supplied argument could not be used to build a request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The API rejected the request as malformed (HTTP 400).
    #[error("Bad request: {detail}")]
    BadRequest {
        title: Option<String>,
        detail: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {detail}")]
    NotFound {
        title: Option<String>,
        detail: String,
    },

    /// Any other non-2xx response.
    #[error("Kitsu API error (HTTP {status}): {detail}")]
    Api {
        status: u16,
        detail: String,
        body: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request to Kitsu timed out")]
    Timeout,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[source] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// A `related` or `next` link in a response points at another host.
    #[error("Refusing to follow link to another host: {link}")]
    ForeignLink { link: String },

    /// The client session was closed before the request was made.
    #[error("Client session is closed")]
    Closed,
}

impl From<reqwest::Error> for KitsuError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            KitsuError::Timeout
        } else {
            KitsuError::HttpError(err)
        }
    }
}

impl KitsuError {
    /// HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            KitsuError::BadRequest { .. } => Some(400),
            KitsuError::NotFound { .. } => Some(404),
            KitsuError::Api { status, .. } => Some(*status),
            KitsuError::HttpError(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The API-provided error detail, if the error came from an API response.
    pub fn detail(&self) -> Option<&str> {
        match self {
            KitsuError::BadRequest { detail, .. }
            | KitsuError::NotFound { detail, .. }
            | KitsuError::Api { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Whether this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KitsuError::NotFound { .. })
    }
}

/// Result type alias for Kitsu operations.
pub type Result<T> = core::result::Result<T, KitsuError>;
