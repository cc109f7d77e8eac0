//! Error types for IntelOwl API operations.
//!
//! Failures fall into two kinds that callers branch on:
//!
//! - [`TransportError`] - no interpretable response exists (network failure,
//!   cancellation, deadline, unreadable or undecodable body).
//! - [`ClientError`] - the server answered with a status code outside the
//!   operation's success set.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Errors that can occur during IntelOwl API operations.
#[derive(Debug, Error)]
pub enum IntelOwlError {
    /// No usable response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered outside the expected status codes.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The request body could not be serialized. No request was sent.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Configuration is missing or incomplete.
    #[error("IntelOwl configuration required: {0}")]
    ConfigMissing(String),

    /// The operation is not available for the given arguments.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl IntelOwlError {
    /// Returns true for failures where no server response was interpreted.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true when the server rejected the request.
    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    /// The HTTP status code, if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(err) => Some(err.status_code),
            _ => None,
        }
    }

    /// Borrow the inner [`ClientError`], if any.
    pub fn as_client(&self) -> Option<&ClientError> {
        match self {
            Self::Client(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure before or while obtaining a response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP transport error (connect, DNS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The caller's context was cancelled while the request was in flight.
    #[error("request cancelled")]
    Cancelled,

    /// The caller's context deadline passed while the request was in flight.
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// A success response could not be decoded into the expected type.
    #[error("Failed to parse response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl TransportError {
    /// Returns true if the request was aborted by the caller's context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// Returns true if the underlying HTTP client timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout(),
            Self::DeadlineExceeded => true,
            _ => false,
        }
    }
}

/// The server answered, but not with one of the expected status codes.
///
/// `message` holds the response body verbatim; use [`ClientError::payload`]
/// to inspect it as JSON. Equality compares status code and message only.
#[derive(Debug, Clone, Error)]
#[error("IntelOwl API error (status {status_code}): {message}")]
pub struct ClientError {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Raw response body.
    pub message: String,
    /// Metadata of the response that produced this error.
    pub response: Option<ResponseMeta>,
}

impl ClientError {
    /// Create an error with no response metadata attached.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            response: None,
        }
    }

    /// The status code as a typed [`StatusCode`].
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns true for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status_code == StatusCode::NOT_FOUND.as_u16()
    }

    /// Returns true for a 5xx response.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Best-effort decode of the body as JSON.
    ///
    /// Returns `None` for plain-text bodies.
    pub fn payload(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.message).ok()
    }

    /// The `detail` field of a `{"detail": "..."}` body.
    pub fn detail(&self) -> Option<String> {
        self.payload()?
            .get("detail")
            .and_then(|d| d.as_str())
            .map(str::to_string)
    }
}

impl PartialEq for ClientError {
    fn eq(&self, other: &Self) -> bool {
        self.status_code == other.status_code && self.message == other.message
    }
}

impl Eq for ClientError {}

/// Response metadata kept on a [`ClientError`] for advanced inspection.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// Status code of the response.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL of the response.
    pub url: Url,
}

/// Result type alias for IntelOwl operations.
pub type Result<T> = core::result::Result<T, IntelOwlError>;
