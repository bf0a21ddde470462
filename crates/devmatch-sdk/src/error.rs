//! Errors from the DevMatch SDK.

use devmatch_core::ValidationErrors;
use thiserror::Error;

/// Coarse classification used to pick what the user is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend answered with a stub; show a "coming soon" notice.
    NotImplemented,
    /// Client-side input was rejected before anything was sent.
    ValidationFailed,
    /// Transport, HTTP status, decoding or local I/O failure.
    NetworkError,
}

/// Errors from the DevMatch SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the identity cache failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server returned an error status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The endpoint exists but the backend has not implemented it yet.
    #[error("{endpoint} is not implemented by the server yet")]
    NotImplemented { endpoint: String },

    /// Form validation failed; every violated rule is listed.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// A single malformed argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The operation needs a signed-in user and none is known.
    #[error("login required")]
    Unauthenticated,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::Validation(_) | Self::InvalidInput(_) | Self::Unauthenticated => {
                ErrorKind::ValidationFailed
            }
            Self::Http(_) | Self::Json(_) | Self::Io(_) | Self::Server { .. } => {
                ErrorKind::NetworkError
            }
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        self.kind() == ErrorKind::NotImplemented
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn not_implemented(endpoint: impl Into<String>) -> Self {
        Self::NotImplemented {
            endpoint: endpoint.into(),
        }
    }
}
