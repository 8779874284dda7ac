//! Error types shared by the organization pipeline.
//!
//! Every variant of [`OrganizeError`] is fatal: it aborts the run and leaves
//! whatever was already moved or extracted in place. The two recoverable
//! archive failures live in [`crate::archive::ExtractError`] instead and never
//! reach this type.

use crate::config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an organization run.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The root path is missing or is not a directory.
    #[error("invalid root directory {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// Failed to create a category folder or an extraction target.
    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to move a file to its destination.
    #[error("failed to move {} to {}: {source}", from.display(), to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to delete a file or directory the pipeline meant to delete.
    #[error("failed to remove {}: {source}", path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to list a directory.
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An archive could not be unpacked for a reason other than a bad format
    /// or a vanished source (permission denied, disk full, ...).
    #[error("failed to extract {}: {source}", archive.display())]
    ExtractionFailed {
        archive: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory traversal failed during the scan.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration could not be loaded or compiled.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;
