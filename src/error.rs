//! Error types for taskpulse
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad configuration, unknown project)
//! - 3: Upstream records unavailable (export missing or unreadable)
//! - 4: Operation failed (serialization, output)
//!
//! The metrics engine itself never fails; only configuration, arguments and
//! the record source boundary produce errors.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the taskpulse CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const SOURCE_UNAVAILABLE: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskpulse operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("No record export configured (pass --data or set source.data)")]
    NoDataSource,

    // Upstream failures (exit code 3)
    #[error("Record source failed for {path}: {reason}")]
    Source { path: PathBuf, reason: String },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::ProjectNotFound(_)
            | Error::NoDataSource
            | Error::TomlParse(_) => exit_codes::USER_ERROR,

            // Upstream
            Error::Source { .. } => exit_codes::SOURCE_UNAVAILABLE,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for machine-readable error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidConfig(message) | Error::InvalidArgument(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            Error::ProjectNotFound(query) => Some(serde_json::json!({ "query": query })),
            Error::Source { path, reason } => Some(serde_json::json!({
                "path": path.to_string_lossy(),
                "reason": reason,
            })),
            _ => None,
        }
    }
}

/// Result type alias for taskpulse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
