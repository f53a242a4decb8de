//! Model configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default number of header rows.
pub const DEFAULT_HEADER_ROWS: i64 = 1;

/// Default number of rows per buffered chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Smallest accepted chunk size.
pub const MIN_CHUNK_SIZE: usize = 100;

/// Options controlling how a [`StreamingModel`] reads its source.
///
/// [`StreamingModel`]: crate::StreamingModel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Number of leading rows consumed as column headers.
    /// Defaults to 1.
    pub header_rows: i64,

    /// Whether rows made only of blank cells are dropped.
    /// Defaults to true.
    pub skip_empty_rows: bool,

    /// Upper bound of rows expected per chunk.
    /// Defaults to 500.
    pub chunk_size: usize,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            header_rows: DEFAULT_HEADER_ROWS,
            skip_empty_rows: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ModelOptions {
    /// Set the number of header rows.
    #[must_use]
    pub fn with_header_rows(mut self, header_rows: i64) -> Self {
        self.header_rows = header_rows;
        self
    }

    /// Enable or disable empty-row skipping.
    #[must_use]
    pub fn with_skip_empty_rows(mut self, skip: bool) -> Self {
        self.skip_empty_rows = skip;
        self
    }

    /// Set the chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Check the options, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NegativeHeaderRows`] or
    /// [`ModelError::ChunkSizeTooSmall`].
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    pub(crate) fn resolve(&self) -> Result<Settings> {
        let header_rows =
            usize::try_from(self.header_rows).map_err(|_| ModelError::NegativeHeaderRows {
                header_rows: self.header_rows,
            })?;
        if self.chunk_size < MIN_CHUNK_SIZE {
            return Err(ModelError::ChunkSizeTooSmall {
                chunk_size: self.chunk_size,
                min: MIN_CHUNK_SIZE,
            });
        }
        Ok(Settings {
            header_rows,
            skip_empty_rows: self.skip_empty_rows,
            chunk_size: self.chunk_size,
        })
    }
}

/// Validated form of [`ModelOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settings {
    pub header_rows: usize,
    pub skip_empty_rows: bool,
    pub chunk_size: usize,
}
