//! Unified error types for linkgate with fail-open philosophy.
//!
//! Nothing in linkgate is allowed to turn an infrastructure problem into an
//! eager launch. When loading config, reading input or talking to a
//! collaborator fails, we log a warning and fall back to the conservative
//! answer: present Link as one option instead of launching it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for linkgate operations.
#[derive(Error, Debug)]
pub enum LinkGateError {
    /// I/O errors from config or input files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML (de)serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Malformed command input.
    #[error("invalid input: {message}")]
    Input { message: String },

    /// A collaborator (account status, attestation, feature gate) failed.
    #[error("collaborator error: {message}")]
    Collaborator { message: String },
}

/// A specialized Result type for linkgate operations.
pub type Result<T> = std::result::Result<T, LinkGateError>;

impl LinkGateError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
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

    /// Create an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create a collaborator error.
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator {
            message: message.into(),
        }
    }
}

impl From<io::Error> for LinkGateError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for LinkGateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Log the error and carry on with a safe value. For eager-launch decisions
/// the safe value is one that never launches.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
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

/// Exit codes for the linkgate CLI.
pub mod exit_codes {
    /// Command completed.
    pub const SUCCESS: i32 = 0;

    /// Command failed (bad input, unreadable config).
    pub const ERROR: i32 = 1;

    /// Panic caught by the global handler.
    pub const CRASH: i32 = 3;
}
