//! Streaming tabular model.
//!
//! Wraps a [`ChunkSource`] and exposes it as a schema-aware row stream without
//! materializing the whole input.
//!
//! # Usage
//!
//! ```
//! use tabstream_core::{StreamingModel, VecSource};
//!
//! let source = VecSource::from_rows(
//!     [vec!["Name", "Age"], vec!["John", "25"], vec!["Jane", "30"]],
//!     100,
//! );
//! let mut model = StreamingModel::builder().source(source).build()?;
//!
//! assert_eq!(model.column_names()?, vec!["Name", "Age"]);
//! for record in model.iter_rows() {
//!     let record = record?;
//!     assert!(record.get("Name").is_some());
//! }
//! # Ok::<(), tabstream_core::ModelError>(())
//! ```
//!
//! # Lifecycle
//!
//! Nothing is read at construction. The first accessor that needs the schema
//! runs [`StreamingModel::ensure_initialized`], which consumes the header rows
//! and keeps any rows pulled past them as the first buffered data rows.
//! [`StreamingModel::reset_stream`] drops the local cache only; the source keeps
//! its position.

use std::cmp::Ordering;

use crate::buffer::{Refill, RowBuffer};
use crate::error::{ModelError, Result};
use crate::header::resolve_column_names;
use crate::options::{ModelOptions, Settings};
use crate::schema::{Schema, synthesized_column_name};
use crate::source::{ChunkSource, RawRow};
use crate::views::{Records, Rows, Tuples};

/// Initialization state of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    Uninitialized,
    Initialized,
}

/// Schema-aware, forward-only view over a row-chunk source.
#[derive(Debug)]
pub struct StreamingModel<S> {
    source: S,
    settings: Settings,
    state: ModelState,
    schema: Schema,
    buffer: RowBuffer,
    exhausted: bool,
    rows_emitted: u64,
}

impl<S: ChunkSource> StreamingModel<S> {
    /// Create a model over `source`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `options` fail validation.
    pub fn new(source: S, options: &ModelOptions) -> Result<Self> {
        let settings = options.resolve()?;
        Ok(Self {
            source,
            settings,
            state: ModelState::Uninitialized,
            schema: Schema::default(),
            buffer: RowBuffer::new(settings.skip_empty_rows, settings.chunk_size),
            exhausted: false,
            rows_emitted: 0,
        })
    }

    /// Start building a model.
    pub fn builder() -> StreamingModelBuilder<S> {
        StreamingModelBuilder::new()
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == ModelState::Initialized
    }

    /// True once the source has reported that it has no further chunks.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of header rows consumed on initialization.
    pub fn header_rows(&self) -> usize {
        self.settings.header_rows
    }

    pub fn skip_empty_rows(&self) -> bool {
        self.settings.skip_empty_rows
    }

    pub fn chunk_size(&self) -> usize {
        self.settings.chunk_size
    }

    /// Build the schema from the source if that has not happened yet.
    ///
    /// Idempotent: a second call is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates source failures.
    pub fn ensure_initialized(&mut self) -> Result<()> {
        if self.state == ModelState::Initialized {
            return Ok(());
        }

        let header_rows = self.settings.header_rows;
        let mut header: Vec<RawRow> = Vec::with_capacity(header_rows);
        while header.len() < header_rows && !self.exhausted {
            let quota = header_rows - header.len();
            if let Refill::Pulled(stats) = self.refill(quota)? {
                header.extend(stats.header);
            }
        }

        let names = if header_rows > 0 {
            resolve_column_names(&header)
        } else {
            while self.buffer.is_empty() && !self.exhausted {
                self.refill(0)?;
            }
            // A present first row always yields at least one column.
            let width = self.buffer.front().map_or(0, |row| row.len().max(1));
            (0..width).map(synthesized_column_name).collect()
        };

        self.schema = Schema::new(names);
        self.state = ModelState::Initialized;
        tracing::debug!(
            header_rows = header.len(),
            columns = self.schema.len(),
            buffered = self.buffer.len(),
            "Initialized streaming model"
        );
        Ok(())
    }

    /// Snapshot of the current column names.
    ///
    /// # Errors
    ///
    /// Propagates source failures raised by lazy initialization.
    pub fn column_names(&mut self) -> Result<Vec<String>> {
        self.ensure_initialized()?;
        Ok(self.schema.names().to_vec())
    }

    /// Number of columns in the current schema.
    ///
    /// # Errors
    ///
    /// Propagates source failures raised by lazy initialization.
    pub fn column_count(&mut self) -> Result<usize> {
        self.ensure_initialized()?;
        Ok(self.schema.len())
    }

    /// Position of the first column named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ColumnNotFound`] if `name` is not in the schema.
    pub fn column_index(&mut self, name: &str) -> Result<usize> {
        self.ensure_initialized()?;
        self.schema.index_of(name)
    }

    /// Borrow the live schema.
    ///
    /// # Errors
    ///
    /// Propagates source failures raised by lazy initialization.
    pub fn schema(&mut self) -> Result<&Schema> {
        self.ensure_initialized()?;
        Ok(&self.schema)
    }

    /// Data rows emitted so far across all views.
    pub fn row_count(&self) -> u64 {
        self.rows_emitted
    }

    /// Rows currently waiting in the buffer.
    pub fn buffered_rows(&self) -> usize {
        self.buffer.len()
    }

    /// Drop buffered rows without touching initialization or the source.
    pub fn clear_buffer(&mut self) -> usize {
        let discarded = self.buffer.clear();
        if discarded > 0 {
            tracing::debug!(discarded, "Cleared row buffer");
        }
        discarded
    }

    /// Drop the buffer and mark the model uninitialized.
    ///
    /// The source is not rewound: the next accessor re-reads headers from
    /// wherever the source currently stands.
    pub fn reset_stream(&mut self) {
        let discarded = self.buffer.clear();
        self.state = ModelState::Uninitialized;
        tracing::debug!(discarded, "Reset streaming model");
    }

    /// Ask the source to rewind and, if it can, start over from a clean state.
    ///
    /// # Errors
    ///
    /// Propagates the source's failure to rewind.
    pub fn restart(&mut self) -> Result<bool> {
        if !self.source.restart().map_err(ModelError::source_error)? {
            return Ok(false);
        }
        self.buffer.clear();
        self.schema = Schema::default();
        self.state = ModelState::Uninitialized;
        self.exhausted = false;
        self.rows_emitted = 0;
        tracing::debug!("Restarted streaming model from the beginning of the source");
        Ok(true)
    }

    /// Iterate rows as ordered cells.
    pub fn rows(&mut self) -> Rows<'_, S> {
        Rows::new(self)
    }

    /// Iterate rows as name-keyed records.
    pub fn iter_rows(&mut self) -> Records<'_, S> {
        Records::new(self)
    }

    /// Iterate rows as immutable cell slices.
    pub fn iter_rows_as_tuples(&mut self) -> Tuples<'_, S> {
        Tuples::new(self)
    }

    /// Give back the source handle.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Produce the next normalized row, refilling the buffer as needed.
    pub(crate) fn next_row(&mut self) -> Result<Option<RawRow>> {
        self.ensure_initialized()?;
        loop {
            if let Some(row) = self.buffer.pop_front() {
                return Ok(Some(self.normalize(row)));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.refill(0)?;
        }
    }

    pub(crate) fn current_schema(&self) -> &Schema {
        &self.schema
    }

    fn refill(&mut self, header_quota: usize) -> Result<Refill> {
        let refill = self.buffer.refill(&mut self.source, header_quota)?;
        if matches!(refill, Refill::Exhausted) {
            self.exhausted = true;
            tracing::debug!(rows = self.rows_emitted, "Row-chunk source exhausted");
        }
        Ok(refill)
    }

    fn normalize(&mut self, mut row: RawRow) -> RawRow {
        let width = self.schema.len();
        match row.len().cmp(&width) {
            Ordering::Less => row.resize(width, String::new()),
            Ordering::Greater => {
                let added = self.schema.grow_to(row.len());
                tracing::debug!(
                    from = width,
                    to = self.schema.len(),
                    added,
                    "Grew schema for wide row"
                );
            }
            Ordering::Equal => {}
        }
        self.rows_emitted += 1;
        row
    }
}

impl<'a, S: ChunkSource> IntoIterator for &'a mut StreamingModel<S> {
    type Item = Result<RawRow>;
    type IntoIter = Rows<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

/// Builder for [`StreamingModel`] that validates eagerly on [`build`].
///
/// [`build`]: StreamingModelBuilder::build
#[derive(Debug)]
pub struct StreamingModelBuilder<S> {
    source: Option<S>,
    options: ModelOptions,
}

impl<S> Default for StreamingModelBuilder<S> {
    fn default() -> Self {
        Self {
            source: None,
            options: ModelOptions::default(),
        }
    }
}

impl<S: ChunkSource> StreamingModelBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn source(mut self, source: S) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace all options at once.
    #[must_use]
    pub fn options(mut self, options: ModelOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn header_rows(mut self, header_rows: i64) -> Self {
        self.options.header_rows = header_rows;
        self
    }

    #[must_use]
    pub fn skip_empty_rows(mut self, skip: bool) -> Self {
        self.options.skip_empty_rows = skip;
        self
    }

    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.options.chunk_size = chunk_size;
        self
    }

    /// Validate the configuration and create the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingSource`] when no source was given, otherwise
    /// the first option that fails validation.
    pub fn build(self) -> Result<StreamingModel<S>> {
        let source = self.source.ok_or(ModelError::MissingSource)?;
        StreamingModel::new(source, &self.options)
    }
}
