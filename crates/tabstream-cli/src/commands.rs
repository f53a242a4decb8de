//! Command implementations shared by the binary and its tests.
//!
//! Every command writes to a caller-supplied writer so output can be captured.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use tabstream_core::{DEFAULT_CHUNK_SIZE, DEFAULT_HEADER_ROWS, ModelOptions, StreamingModel};
use tabstream_ingest::{CsvChunkSource, CsvSourceOptions, delimiter_byte};

use crate::output::{column_table, row_table};

/// Default number of rows printed by `head`.
pub const DEFAULT_HEAD_ROWS: usize = 10;

/// How to read an input file.
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub path: PathBuf,
    pub delimiter: char,
    pub header_rows: i64,
    pub keep_empty_rows: bool,
    pub chunk_size: usize,
    pub skip_footer_rows: usize,
}

impl InputConfig {
    /// Defaults for reading `path` as comma-separated text with one header row.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: ',',
            header_rows: DEFAULT_HEADER_ROWS,
            keep_empty_rows: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            skip_footer_rows: 0,
        }
    }

    fn source_options(&self) -> Result<CsvSourceOptions> {
        let delimiter = delimiter_byte(self.delimiter)?;
        Ok(CsvSourceOptions::default()
            .with_delimiter(delimiter)
            .with_chunk_size(self.chunk_size)
            .with_skip_footer_rows(self.skip_footer_rows))
    }

    fn model_options(&self) -> ModelOptions {
        ModelOptions::default()
            .with_header_rows(self.header_rows)
            .with_skip_empty_rows(!self.keep_empty_rows)
            .with_chunk_size(self.chunk_size)
    }
}

/// Row and column totals reported by `count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSummary {
    pub rows: u64,
    pub columns: usize,
}

/// Build a streaming model over the input file.
///
/// # Errors
///
/// Fails on invalid options or when the file cannot be opened.
pub fn open_model(input: &InputConfig) -> Result<StreamingModel<CsvChunkSource>> {
    let model_options = input.model_options();
    model_options
        .validate()
        .context("invalid model options")?;
    let source = CsvChunkSource::from_path(&input.path, input.source_options()?)
        .with_context(|| format!("open {}", input.path.display()))?;
    let model = StreamingModel::new(source, &model_options)?;
    debug!(
        path = %input.path.display(),
        header_rows = model.header_rows(),
        chunk_size = model.chunk_size(),
        "Opened input"
    );
    Ok(model)
}

/// Print the resolved schema.
///
/// # Errors
///
/// Fails when the input cannot be read or the output cannot be written.
pub fn run_columns(input: &InputConfig, out: &mut impl Write) -> Result<()> {
    let _span = info_span!("columns", path = %input.path.display()).entered();
    let mut model = open_model(input)?;
    let names = model
        .column_names()
        .with_context(|| read_context(&input.path))?;
    info!(columns = names.len(), "Resolved schema");
    writeln!(out, "{}", column_table(&names))?;
    Ok(())
}

/// Print the first `limit` rows under the schema known after reading them.
///
/// # Errors
///
/// Fails when the input cannot be read or the output cannot be written.
pub fn run_head(input: &InputConfig, limit: usize, out: &mut impl Write) -> Result<()> {
    let _span = info_span!("head", path = %input.path.display(), limit).entered();
    let mut model = open_model(input)?;
    let mut rows = Vec::with_capacity(limit.min(DEFAULT_CHUNK_SIZE));
    for row in model.rows().take(limit) {
        rows.push(row.with_context(|| read_context(&input.path))?);
    }
    let names = model.column_names()?;
    // Rows read before a schema widening are shorter than the final schema.
    for row in &mut rows {
        row.resize(names.len(), String::new());
    }
    info!(rows = rows.len(), columns = names.len(), "Previewed rows");
    writeln!(out, "{}", row_table(&names, &rows))?;
    Ok(())
}

/// Write each row as a JSON object on its own line, returning the row count.
///
/// # Errors
///
/// Fails when the input cannot be read or the output cannot be written.
pub fn write_rows(input: &InputConfig, limit: Option<usize>, out: &mut impl Write) -> Result<u64> {
    let _span = info_span!("rows", path = %input.path.display()).entered();
    let mut model = open_model(input)?;
    let mut written = 0u64;
    for record in model.iter_rows().take(limit.unwrap_or(usize::MAX)) {
        let record = record.with_context(|| read_context(&input.path))?;
        serde_json::to_writer(&mut *out, &record).context("serialize row")?;
        writeln!(out)?;
        written += 1;
    }
    out.flush()?;
    info!(rows = written, "Wrote rows");
    Ok(written)
}

/// Stream the whole input and report its size.
///
/// # Errors
///
/// Fails when the input cannot be read or the output cannot be written.
pub fn run_count(input: &InputConfig, out: &mut impl Write) -> Result<CountSummary> {
    let _span = info_span!("count", path = %input.path.display()).entered();
    let mut model = open_model(input)?;
    for row in model.rows() {
        row.with_context(|| read_context(&input.path))?;
    }
    let summary = CountSummary {
        rows: model.row_count(),
        columns: model.column_count()?,
    };
    writeln!(out, "rows: {}", summary.rows)?;
    writeln!(out, "columns: {}", summary.columns)?;
    info!(rows = summary.rows, columns = summary.columns, "Counted rows");
    Ok(summary)
}

fn read_context(path: &Path) -> String {
    format!("read {}", path.display())
}
