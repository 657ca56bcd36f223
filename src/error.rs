//! Error types for the zwave-cc-gen crate.
//!
//! Only run-level failures are errors. A malformed command-class or command
//! node is dropped during ingestion and never surfaces here.

use std::path::PathBuf;

/// Errors that can occur while loading a catalog or generating sources.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read a file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input document is not well-formed markup.
    #[error("malformed XML in {path}: {message}")]
    Xml { path: PathBuf, message: String },

    /// Failed to clear the output directory before writing.
    #[error("failed to clear output directory {path}: {source}")]
    Clear {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a generated source file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Source generation error.
    #[error("codegen error: {0}")]
    Codegen(String),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
