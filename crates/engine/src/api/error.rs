//! The normalized error surfaced by every API operation.

use serde::Deserialize;
use thiserror::Error;

/// Uniform error shape for failed API operations.
///
/// Network failures, timeouts, and non-2xx responses are all folded into
/// this one shape so layers above the client never inspect transport
/// details. `status` is present only when the service actually answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable failure description.
    pub message: String,
    /// HTTP status code, when the failure came from a response.
    pub status: Option<u16>,
}

/// Error body shape the reference service uses for rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// A failure with no HTTP response (connection error, timeout).
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// A non-2xx response, with the message pulled from the body when the
    /// service provided one.
    #[must_use]
    pub fn rejection(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body).map_or_else(
            |_| format!("HTTP {status}: {}", body.chars().take(200).collect::<String>()),
            |parsed| parsed.message,
        );
        Self {
            message,
            status: Some(status),
        }
    }

    /// A 2xx response whose body could not be decoded.
    ///
    /// Not a transport failure, so never retried.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            message: format!("decode error: {}", message.into()),
            status: None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}
