//! Error types for delimited-file ingestion.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading delimited files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File starts with a byte-order mark for an unsupported encoding.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// The CSV reader failed on a record.
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Configuration Errors ===
    /// Delimiter or quote is not a single ASCII character.
    #[error("delimiter must be a single ASCII character, got {delimiter:?}")]
    InvalidDelimiter { delimiter: char },

    /// Chunk size is below the supported minimum.
    #[error("chunk_size must be at least {min}, got {chunk_size}")]
    InvalidChunkSize { chunk_size: usize, min: usize },

    /// Preview asked for zero lines.
    #[error("max_lines must be at least 1")]
    InvalidMaxLines,
}

impl IngestError {
    /// Map an `io::Error` from opening `path`, keeping not-found distinct.
    pub(crate) fn open(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
