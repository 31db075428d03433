//! Unified error types for the engagement engine with fail-open philosophy.
//!
//! Collaborator read failures never cross the engine's public interface.
//! Counts fail open to zero, batch results fail to an empty map, and
//! achievement predicates fail closed to `false`. [`FailOpen`] is the single
//! place where an error is logged and swapped for its safe default.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for engagement operations.
#[derive(Error, Debug)]
pub enum EngagementError {
    /// I/O errors from the file-backed stores.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Transient failure reported by a content or profile store.
    #[error("store error: {message}")]
    Store { message: String },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Caller supplied an argument the engine cannot work with.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

/// A specialized Result type for engagement operations.
pub type Result<T> = std::result::Result<T, EngagementError>;

impl EngagementError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether this error came from reading a collaborator store.
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. } | Self::Store { .. } | Self::Serde { .. }
        )
    }
}

impl From<io::Error> for EngagementError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for EngagementError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Log the error and return a safe default. Callers pick the default:
/// `fail_open_default` for counts and maps, `fail_open_with(.., false)` for
/// predicates that must never over-grant.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the engagement CLI.
pub mod exit_codes {
    /// Command completed.
    pub const SUCCESS: u8 = 0;

    /// Command could not produce output (bad arguments, unreadable config).
    pub const FAILURE: u8 = 1;
}
