//! Unified error type for the greenskeeper workspace.
//!
//! Every variant names the path or pid it failed on. Nothing is retried;
//! the first error aborts the operation and is handed back to the launcher.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum GreenskeeperError {
    /// The source file of a copy could not be stat'd.
    #[error("source file not found at {path}: {source}")]
    SourceNotFound {
        /// Source path that could not be inspected.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Streaming bytes from source to staging file failed.
    #[error("copy failed at {path}: {source}")]
    CopyIo {
        /// Path being read or written when the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Changing permission bits failed.
    #[error("failed to change mode of {path}: {source}")]
    PermissionChange {
        /// Path whose mode could not be changed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Changing ownership failed.
    #[error("failed to change ownership of {path}: {source}")]
    OwnershipChange {
        /// Path whose owner could not be changed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Creating a directory tree failed.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Clearing the destination or renaming the staging file onto it failed.
    #[error("failed to publish {path}: {source}")]
    Publish {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The pidfile names a process that is still alive.
    #[error("garden is already running (pid: {pid})")]
    ProcessStillRunning {
        /// Pid as recorded in the pidfile.
        pid: String,
    },

    /// Reading or removing the pidfile failed.
    #[error("pidfile error at {path}: {source}")]
    PidfileIo {
        /// Pidfile path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The launcher configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigIo {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The launcher configuration file is not valid.
    #[error("invalid configuration {path}: {source}")]
    ConfigParse {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GreenskeeperError>;
