//! Error types for leakseek.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while talking to the search API.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("access denied (HTTP 403), check your API key")]
    AccessDenied,

    #[error("unauthorized (HTTP 401), check your API key")]
    Unauthorized,

    #[error("request failed with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl SearchError {
    /// Whether this error means the API key was rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AccessDenied | Self::Unauthorized)
    }
}

/// Result type alias for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors in settings or command-line configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot use wildcard and regex search at the same time")]
    ConflictingSearchModes,

    #[error("invalid setting: {0}")]
    InvalidValue(String),

    #[error("could not determine the configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors writing the results file.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Top-level error for command execution.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
