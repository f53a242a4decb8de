//! Error types for the streaming tabular model.

use thiserror::Error;

/// Boxed error produced by a row-chunk source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while configuring or driving a [`StreamingModel`].
///
/// [`StreamingModel`]: crate::StreamingModel
#[derive(Debug, Error)]
pub enum ModelError {
    // === Configuration Errors ===
    /// No row-chunk source was supplied to the builder.
    #[error("stream is required")]
    MissingSource,

    /// Header row count is negative.
    #[error("header rows must be greater than or equal to 0, got {header_rows}")]
    NegativeHeaderRows { header_rows: i64 },

    /// Chunk size is below the supported minimum.
    #[error("chunk_size must be at least {min}, got {chunk_size}")]
    ChunkSizeTooSmall { chunk_size: usize, min: usize },

    // === Lookup Errors ===
    /// Column name is not part of the current schema.
    #[error("column name {name} not found")]
    ColumnNotFound { name: String },

    // === Source Errors ===
    /// The row-chunk source failed while producing a chunk.
    #[error("row-chunk source failed: {0}")]
    Source(#[source] BoxError),
}

impl ModelError {
    /// Wraps a source failure without altering it.
    pub fn source_error<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Source(err.into())
    }

    /// Returns true for errors raised while validating construction input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingSource | Self::NegativeHeaderRows { .. } | Self::ChunkSizeTooSmall { .. }
        )
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
