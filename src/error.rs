//! Error types for tasktrack
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (missing document, unknown task id, bad config)
//! - 4: Operation failed (malformed document, integrity violation, git error)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tt CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ParseError,
    IntegrityViolation,
    InvalidInput,
    Failure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::IntegrityViolation => "integrity_violation",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Failure => "operation_failed",
        }
    }
}

/// Main error type for tasktrack operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Project document not found: {0}")]
    DocumentNotFound(PathBuf),

    #[error("{0} is not a valid ID")]
    TaskNotFound(u64),

    #[error("Repository not found from {0}")]
    RepoNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // Operation failures (exit code 4)
    #[error("Malformed project document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::DocumentNotFound(_)
            | Error::TaskNotFound(_)
            | Error::RepoNotFound(_)
            | Error::InvalidConfig(_)
            | Error::TomlParse(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::Parse { .. }
            | Error::IntegrityViolation(_)
            | Error::Git(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::Prompt(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DocumentNotFound(_) | Error::TaskNotFound(_) | Error::RepoNotFound(_) => {
                ErrorKind::NotFound
            }
            Error::Parse { .. } => ErrorKind::ParseError,
            Error::IntegrityViolation(_) => ErrorKind::IntegrityViolation,
            Error::InvalidConfig(_) | Error::TomlParse(_) => ErrorKind::InvalidInput,
            Error::Git(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::Prompt(_)
            | Error::OperationFailed(_) => ErrorKind::Failure,
        }
    }

    /// Structured context for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::DocumentNotFound(path) | Error::RepoNotFound(path) => {
                Some(serde_json::json!({ "path": path.to_string_lossy() }))
            }
            Error::TaskNotFound(id) => Some(serde_json::json!({ "task_id": id })),
            Error::Parse { path, source } => Some(serde_json::json!({
                "path": path.to_string_lossy(),
                "line": source.line(),
                "column": source.column(),
            })),
            Error::InvalidConfig(message) | Error::IntegrityViolation(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            _ => None,
        }
    }
}

/// Result type alias for tasktrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            kind: err.kind().as_str(),
            details: err.details(),
        }
    }
}
