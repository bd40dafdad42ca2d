// src/error.rs
//! Error types, one enum per concern.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the file and directory helpers.
#[derive(Debug, Error)]
pub enum FsError {
    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,

    #[error("{0} does not exist")]
    NotFound(PathBuf),

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// The directory still has entries and only empty directories may be removed.
    #[error("Directory {0} is not empty")]
    DirectoryNotEmpty(PathBuf),

    #[error("{0} has no parent directory")]
    NoParent(PathBuf),

    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid permission string {0:?}")]
    InvalidPermissions(String),

    #[error("Cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsError::Io { path: path.into(), source }
    }
}

/// Errors raised by [`Map`](crate::Map) operations that do not report
/// failure through their return value.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Key {0} was not found")]
    KeyNotFound(String),

    #[error("Key {0} is already present")]
    DuplicateKey(String),

    /// A key/value pair did not match the entry currently stored for the key.
    #[error("No entry matching key {0} and the given value")]
    EntryMismatch(String),

    #[error("Failed to serialize map entry: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while detecting the current platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Platform detection is not supported here: {0}")]
    Unsupported(String),

    #[error("Required tool {0} was not found")]
    ToolNotFound(String),

    #[error("Command {command} failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
