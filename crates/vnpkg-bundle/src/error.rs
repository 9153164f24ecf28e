//! Error types for packaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging a plugin.
#[derive(Debug, Error)]
pub enum PackError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal error.
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The descriptor file does not exist.
    #[error("package.json not found in {}", .0.display())]
    DescriptorNotFound(PathBuf),

    /// The descriptor exists but is not a usable JSON object.
    #[error("Invalid package.json: {0}")]
    InvalidDescriptor(String),

    /// One or more required descriptor fields are absent or empty.
    #[error(
        "Invalid package.json: missing required fields (id, name, version, main): {}",
        .0.join(", ")
    )]
    MissingFields(Vec<&'static str>),

    /// The entry file named by `main` does not exist.
    #[error("Main file not found: {0}")]
    MainNotFound(String),

    /// Include pattern uses syntax the matcher does not support.
    #[error("Invalid include pattern: {0}")]
    InvalidPattern(String),

    /// Writing the archive failed.
    #[error("Failed to create package {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}
