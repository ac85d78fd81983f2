//! Error types for Hangar API operations.

use thiserror::Error;

/// Errors that can occur during Hangar API operations.
///
/// Every variant raised by a request names the operation that failed, so
/// callers can branch on the kind of failure without matching on message
/// text.
#[derive(Debug, Error)]
pub enum HangarError {
    /// A required argument was empty or out of range. Raised before any
    /// network access.
    #[error("{operation}: {message}")]
    InvalidArgument {
        operation: &'static str,
        message: String,
    },

    /// The request did not complete within the transport timeout.
    #[error("{operation}: request timed out")]
    Timeout { operation: &'static str },

    /// HTTP transport error (DNS, connect, TLS, interrupted body).
    #[error("{operation}: HTTP request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status.
    #[error("{operation}: API request failed with status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("{operation}: failed to decode response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The named version is not among the scanned versions of the project.
    #[error("version {version} not found")]
    VersionNotFound { version: String },

    /// The version exists but has no usable URL for the platform.
    #[error("no download URL found for version {version} on platform {platform}")]
    NoDownloadUrl { version: String, platform: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration could not be loaded or is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl HangarError {
    pub(crate) fn invalid(operation: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            message: message.into(),
        }
    }

    pub(crate) fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { operation }
        } else {
            Self::Transport { operation, source }
        }
    }

    /// HTTP status code of a [`HangarError::Status`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the request was aborted by the transport timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The operation that produced this error, if it came from a request.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { operation, .. }
            | Self::Timeout { operation }
            | Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Human-readable message from a JSON error body.
    ///
    /// Hangar error bodies carry either a `message` or an `error` field.
    /// Returns `None` when this is not a status error or the body is not
    /// JSON.
    pub fn api_message(&self) -> Option<String> {
        let Self::Status { body, .. } = self else {
            return None;
        };

        let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
        json.get("message")
            .or_else(|| json.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
    }
}

/// Result type alias for Hangar operations.
pub type Result<T> = core::result::Result<T, HangarError>;
