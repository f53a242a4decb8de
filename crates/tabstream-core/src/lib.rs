//! Streaming tabular data model.
//!
//! This crate turns an unbounded stream of raw row chunks into a schema and a
//! family of lazy row views, holding at most one chunk in memory.
//!
//! # Features
//!
//! - **Header Resolution**: merge one or more header rows into column names
//! - **Row Buffering**: refill one chunk at a time, optionally dropping blank rows
//! - **Ragged Rows**: pad short rows, grow the schema for wide rows
//! - **Views**: ordered cells, name-keyed records, or immutable slices
//!
//! # Example
//!
//! ```
//! use tabstream_core::{StreamingModel, VecSource};
//!
//! let source = VecSource::from_rows(
//!     [
//!         vec!["Personal", "Personal", "Location"],
//!         vec!["Name", "Age", "City"],
//!         vec!["John", "25", "New York"],
//!     ],
//!     100,
//! );
//! let mut model = StreamingModel::builder()
//!     .source(source)
//!     .header_rows(2)
//!     .build()?;
//!
//! assert_eq!(
//!     model.column_names()?,
//!     vec!["Personal_Name", "Personal_Age", "Location_City"]
//! );
//! # Ok::<(), tabstream_core::ModelError>(())
//! ```

mod buffer;
mod error;
mod header;
mod model;
mod options;
mod record;
mod schema;
mod source;
mod views;

// === Error Types ===
pub use error::{BoxError, ModelError, Result};

// === Configuration ===
pub use options::{DEFAULT_CHUNK_SIZE, DEFAULT_HEADER_ROWS, MIN_CHUNK_SIZE, ModelOptions};

// === Sources ===
pub use source::{Chunk, ChunkSource, IterSource, RawRow, VecSource};

// === Schema & Headers ===
pub use header::{is_blank_row, normalize_header, process_headers, resolve_column_names};
pub use schema::{Schema, synthesized_column_name};

// === Model ===
pub use buffer::{ChunkStats, Refill, RowBuffer};
pub use model::{ModelState, StreamingModel, StreamingModelBuilder};
pub use record::Record;
pub use views::{Records, Rows, Tuples};
