//! Conversions from external infrastructure errors into domain errors.

use r2d2::Error as PoolError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use shiftline_domain::{RemoteFailureKind, ShiftlineError};
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ShiftlineError);

impl From<InfraError> for ShiftlineError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ShiftlineError> for InfraError {
    fn from(value: ShiftlineError) -> Self {
        InfraError(value)
    }
}

trait IntoShiftlineError {
    fn into_shiftline(self) -> ShiftlineError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → ShiftlineError */
/* -------------------------------------------------------------------------- */

impl IntoShiftlineError for SqlError {
    fn into_shiftline(self) -> ShiftlineError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => ShiftlineError::Persistence("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        ShiftlineError::Persistence("database is locked".into())
                    }
                    ErrorCode::ReadOnly => {
                        ShiftlineError::Persistence("database is read-only".into())
                    }
                    ErrorCode::DiskFull => ShiftlineError::Persistence("disk is full".into()),
                    ErrorCode::CannotOpen => {
                        ShiftlineError::Persistence(format!("unable to open database: {message}"))
                    }
                    _ => ShiftlineError::Persistence(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                ShiftlineError::Persistence(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                ShiftlineError::Persistence(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => ShiftlineError::Persistence(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => ShiftlineError::Persistence(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_shiftline())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → ShiftlineError */
/* -------------------------------------------------------------------------- */

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(ShiftlineError::Persistence(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → ShiftlineError */
/* -------------------------------------------------------------------------- */

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(ShiftlineError::Internal(format!("blocking task failed: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ShiftlineError */
/* -------------------------------------------------------------------------- */

impl IntoShiftlineError for HttpError {
    fn into_shiftline(self) -> ShiftlineError {
        if self.is_timeout() {
            return ShiftlineError::remote(RemoteFailureKind::Timeout, "HTTP request timed out");
        }

        if self.is_connect() {
            return ShiftlineError::remote(
                RemoteFailureKind::Connectivity,
                "HTTP connection failure",
            );
        }

        if self.is_decode() {
            return ShiftlineError::remote(
                RemoteFailureKind::InvalidResponse,
                format!("failed to decode response: {self}"),
            );
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return ShiftlineError::remote(kind_for_status(code), message);
        }

        ShiftlineError::remote(RemoteFailureKind::Connectivity, self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_shiftline())
    }
}

/// Failure category for a non-success HTTP status.
pub(crate) fn kind_for_status(code: u16) -> RemoteFailureKind {
    match code {
        404 => RemoteFailureKind::NotFound,
        408 | 504 => RemoteFailureKind::Timeout,
        500..=599 => RemoteFailureKind::Server,
        400..=499 => RemoteFailureKind::Rejected,
        _ => RemoteFailureKind::InvalidResponse,
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
