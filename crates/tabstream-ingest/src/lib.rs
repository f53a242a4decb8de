//! Delimited-file ingestion for tabstream.
//!
//! Provides a [`CsvChunkSource`] that feeds a
//! [`StreamingModel`](tabstream_core::StreamingModel) one chunk of raw rows at
//! a time, plus small line-oriented helpers for text files.
//!
//! # Features
//!
//! - **Chunked Reading**: bounded chunks from any delimited file or reader
//! - **Row Skipping**: drop leading and trailing records before they reach the model
//! - **Encoding Check**: reject UTF-16 input, strip a UTF-8 BOM
//! - **Text Helpers**: line counts and previews without loading the file
//!
//! # Example
//!
//! ```no_run
//! use tabstream_core::{ModelOptions, StreamingModel};
//! use tabstream_ingest::{CsvChunkSource, CsvSourceOptions};
//!
//! let source = CsvChunkSource::from_path("data.csv", CsvSourceOptions::default())?;
//! let mut model = StreamingModel::new(source, &ModelOptions::default())?;
//! for record in model.iter_rows() {
//!     println!("{:?}", record?.get("Name"));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod source;
mod text;

// === Error Types ===
pub use error::{IngestError, Result};

// === Chunk Sources ===
pub use source::{
    CsvChunkSource, CsvSourceOptions, DEFAULT_SOURCE_CHUNK_SIZE, MIN_SOURCE_CHUNK_SIZE,
    delimiter_byte,
};

// === Text Helpers ===
pub use text::{DEFAULT_PREVIEW_LINES, PreviewOptions, line_count, preview, validate_encoding};
