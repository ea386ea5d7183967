//! Error types shared across avimosh crates.

use std::path::PathBuf;

/// Top-level error type for avimosh operations.
#[derive(Debug, thiserror::Error)]
pub enum MoshError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parameter out of range for mode '{mode}': {message}")]
    ParameterOutOfRange { mode: String, message: String },

    #[error("Frame at offset {offset} is truncated: expected {expected} bytes, copied {copied}")]
    Truncated {
        offset: u64,
        expected: u64,
        copied: u64,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using MoshError.
pub type MoshResult<T> = Result<T, MoshError>;

impl MoshError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn parameter(mode: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ParameterOutOfRange {
            mode: mode.into(),
            message: msg.into(),
        }
    }

    /// Whether this error stems from user input rather than the filesystem.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::FileNotFound { .. } | Self::ParameterOutOfRange { .. }
        )
    }
}
