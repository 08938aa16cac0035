//! Classified failures for gateway operations.
//!
//! Every failure falls into one of three kinds (see [`ErrorKind`]), uniform
//! across backends. The backend's own diagnostic text is kept whenever the
//! response carried one.

use reqwest::StatusCode;
use thiserror::Error;

/// The three-way failure taxonomy shared by all backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credential missing, invalid, expired, or rejected by the backend.
    NoToken,
    /// The backend rejected the shape or content of the request.
    BadRequest,
    /// Anything else: transport failure, unparsable body, unexpected status.
    Other,
}

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("credentials rejected: {message}")]
    NoToken {
        message: String,
        status: Option<StatusCode>,
    },

    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        status: Option<StatusCode>,
    },

    #[error("backend error ({status}): {message}")]
    Backend { status: StatusCode, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl TranslationError {
    pub(crate) fn no_token(message: impl Into<String>) -> Self {
        Self::NoToken {
            message: message.into(),
            status: None,
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            status: None,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Classifies a failed response by HTTP status alone.
    ///
    /// Backends refine this with whatever their error bodies say.
    pub(crate) fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("no error message")
                .to_string()
        } else {
            message
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::NoToken {
                message,
                status: Some(status),
            },
            StatusCode::BAD_REQUEST
            | StatusCode::PAYLOAD_TOO_LARGE
            | StatusCode::URI_TOO_LONG
            | StatusCode::UNPROCESSABLE_ENTITY => Self::BadRequest {
                message,
                status: Some(status),
            },
            _ => Self::Backend { status, message },
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoToken { .. } => ErrorKind::NoToken,
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::Backend { .. }
            | Self::Malformed(_)
            | Self::Network(_)
            | Self::Json(_)
            | Self::InvalidEndpoint { .. } => ErrorKind::Other,
        }
    }

    /// The diagnostic text reported by the backend, if the failure came from one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NoToken { message, .. }
            | Self::BadRequest { message, .. }
            | Self::Backend { message, .. } => Some(message.as_str()),
            Self::Malformed(_)
            | Self::Network(_)
            | Self::Json(_)
            | Self::InvalidEndpoint { .. } => None,
        }
    }

    /// HTTP status of the response that produced this error, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::NoToken { status, .. } | Self::BadRequest { status, .. } => *status,
            Self::Backend { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            Self::Malformed(_) | Self::Json(_) | Self::InvalidEndpoint { .. } => None,
        }
    }
}

/// Shorthand used throughout the translation module.
pub type Result<T, E = TranslationError> = std::result::Result<T, E>;
