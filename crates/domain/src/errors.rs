//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Shiftline
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ShiftlineError {
    /// Malformed activity record, or an interval that cannot be closed
    /// (`end <= start`).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage read/write failure at the ledger boundary.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Remote error ({kind}): {message}")]
    Remote { kind: RemoteFailureKind, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShiftlineError {
    /// Build a remote failure of the given category.
    pub fn remote(kind: RemoteFailureKind, message: impl Into<String>) -> Self {
        Self::Remote { kind, message: message.into() }
    }

    /// Category of a remote failure, `None` for every other variant.
    pub fn remote_kind(&self) -> Option<RemoteFailureKind> {
        match self {
            Self::Remote { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Stable label suitable for logging fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Persistence(_) => "persistence",
            Self::Remote { .. } => "remote",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// User-facing categories for failures reaching the report backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFailureKind {
    /// Could not reach the backend at all.
    Connectivity,
    Timeout,
    /// 5xx responses.
    Server,
    NotFound,
    /// The backend answered with `success: false`.
    Rejected,
    /// The payload could not be decoded.
    InvalidResponse,
}

impl RemoteFailureKind {
    /// Message shown next to the retry control.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Connectivity => "Unable to reach the server. Check your network connection.",
            Self::Timeout => "The server took too long to respond. Please try again.",
            Self::Server => "The server encountered an error. Please try again later.",
            Self::NotFound => "The requested session data was not found.",
            Self::Rejected => "The server could not provide the requested data.",
            Self::InvalidResponse => "The server returned data in an unexpected format.",
        }
    }
}

crate::impl_domain_enum_conversions!(RemoteFailureKind {
    Connectivity => "connectivity",
    Timeout => "timeout",
    Server => "server",
    NotFound => "not_found",
    Rejected => "rejected",
    InvalidResponse => "invalid_response",
});

/// Result type alias for Shiftline operations
pub type Result<T> = std::result::Result<T, ShiftlineError>;
