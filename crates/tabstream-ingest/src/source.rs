//! Delimited-file row-chunk source built on the `csv` crate.
//!
//! Records are read with headers disabled and flexible record lengths, so
//! header handling and ragged rows are left to the tabular model.

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tabstream_core::{Chunk, ChunkSource, RawRow};

use crate::error::{IngestError, Result};
use crate::text::validate_encoding;

/// Default rows per chunk.
pub const DEFAULT_SOURCE_CHUNK_SIZE: usize = 500;

/// Smallest accepted rows per chunk.
pub const MIN_SOURCE_CHUNK_SIZE: usize = 100;

/// Options for reading a delimited file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvSourceOptions {
    /// Field delimiter. Defaults to `,`.
    pub delimiter: u8,

    /// Quote character, or `None` to disable quoting. Defaults to `"`.
    pub quote: Option<u8>,

    /// Whether cells are trimmed of surrounding whitespace.
    /// Defaults to true.
    pub trim: bool,

    /// Records dropped from the start before any chunk is produced.
    pub skip_header_rows: usize,

    /// Records dropped from the end of the file.
    pub skip_footer_rows: usize,

    /// Rows per chunk. Defaults to 500.
    pub chunk_size: usize,
}

impl Default for CsvSourceOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: Some(b'"'),
            trim: true,
            skip_header_rows: 0,
            skip_footer_rows: 0,
            chunk_size: DEFAULT_SOURCE_CHUNK_SIZE,
        }
    }
}

impl CsvSourceOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_quote(mut self, quote: Option<u8>) -> Self {
        self.quote = quote;
        self
    }

    #[must_use]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    #[must_use]
    pub fn with_skip_header_rows(mut self, rows: usize) -> Self {
        self.skip_header_rows = rows;
        self
    }

    #[must_use]
    pub fn with_skip_footer_rows(mut self, rows: usize) -> Self {
        self.skip_footer_rows = rows;
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// # Errors
    ///
    /// Returns [`IngestError::InvalidChunkSize`] below the minimum chunk size.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size < MIN_SOURCE_CHUNK_SIZE {
            return Err(IngestError::InvalidChunkSize {
                chunk_size: self.chunk_size,
                min: MIN_SOURCE_CHUNK_SIZE,
            });
        }
        Ok(())
    }
}

/// Convert a delimiter character to the byte the reader expects.
///
/// # Errors
///
/// Returns [`IngestError::InvalidDelimiter`] for non-ASCII characters.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(IngestError::InvalidDelimiter { delimiter })
}

type BoxedRead = Box<dyn Read + Send>;

/// Reads a delimited file as chunks of raw rows.
pub struct CsvChunkSource {
    reader: csv::Reader<BoxedRead>,
    path: Option<PathBuf>,
    options: CsvSourceOptions,
    record: StringRecord,
    footer: VecDeque<RawRow>,
    deferred: Option<IngestError>,
    records_read: u64,
    started: bool,
    finished: bool,
}

impl fmt::Debug for CsvChunkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvChunkSource")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("records_read", &self.records_read)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl CsvChunkSource {
    /// Open `path` for chunked reading. The source can be restarted.
    ///
    /// # Errors
    ///
    /// Fails on invalid options, a missing or unreadable file, or a UTF-16 BOM.
    pub fn from_path(path: impl AsRef<Path>, options: CsvSourceOptions) -> Result<Self> {
        options.validate()?;
        let path = path.as_ref();
        validate_encoding(path)?;
        let file = File::open(path).map_err(|err| IngestError::open(path, err))?;
        tracing::debug!(path = %path.display(), "Opened delimited file");
        Ok(Self::build(Box::new(file), Some(path.to_path_buf()), options))
    }

    /// Read from any byte stream. The source cannot be restarted.
    ///
    /// # Errors
    ///
    /// Fails on invalid options.
    pub fn from_reader<R>(reader: R, options: CsvSourceOptions) -> Result<Self>
    where
        R: Read + Send + 'static,
    {
        options.validate()?;
        Ok(Self::build(Box::new(reader), None, options))
    }

    fn build(input: BoxedRead, path: Option<PathBuf>, options: CsvSourceOptions) -> Self {
        Self {
            reader: csv_reader(input, &options),
            path,
            options,
            record: StringRecord::new(),
            footer: VecDeque::new(),
            deferred: None,
            records_read: 0,
            started: false,
            finished: false,
        }
    }

    /// Path backing this source, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> &CsvSourceOptions {
        &self.options
    }

    /// Records read from the input so far, including skipped ones.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    fn display_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from("<reader>"))
    }

    fn read_row(&mut self) -> Result<Option<RawRow>> {
        let more = self
            .reader
            .read_record(&mut self.record)
            .map_err(|source| IngestError::Csv {
                path: self.display_path(),
                source,
            })?;
        if !more {
            return Ok(None);
        }
        let first = self.records_read == 0;
        self.records_read += 1;
        let mut row: RawRow = self.record.iter().map(str::to_string).collect();
        if first && let Some(cell) = row.first_mut() {
            // The reader trims around the BOM, not after it.
            let stripped = cell.trim_start_matches('\u{feff}');
            let stripped = if self.options.trim {
                stripped.trim_start()
            } else {
                stripped
            };
            if stripped.len() != cell.len() {
                let stripped = stripped.to_string();
                *cell = stripped;
            }
        }
        Ok(Some(row))
    }

    fn skip_leading(&mut self) -> Result<()> {
        self.started = true;
        for _ in 0..self.options.skip_header_rows {
            if self.read_row()?.is_none() {
                self.finished = true;
                break;
            }
        }
        Ok(())
    }
}

fn csv_reader(input: BoxedRead, options: &CsvSourceOptions) -> csv::Reader<BoxedRead> {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .trim(if options.trim { Trim::Fields } else { Trim::None });
    match options.quote {
        Some(quote) => {
            builder.quote(quote);
        }
        None => {
            builder.quoting(false);
        }
    }
    builder.from_reader(input)
}

impl ChunkSource for CsvChunkSource {
    type Error = IngestError;

    fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        if !self.started {
            self.skip_leading()?;
        }
        if self.finished {
            return Ok(None);
        }

        let footer_rows = self.options.skip_footer_rows;
        let mut chunk = Vec::with_capacity(self.options.chunk_size);
        while chunk.len() < self.options.chunk_size {
            let row = match self.read_row() {
                Ok(Some(row)) => row,
                Ok(None) => {
                    self.finished = true;
                    if !self.footer.is_empty() {
                        tracing::debug!(rows = self.footer.len(), "Dropped footer rows");
                    }
                    self.footer.clear();
                    break;
                }
                // Rows already read are handed out first; the error follows on the next call.
                Err(err) if !chunk.is_empty() => {
                    self.deferred = Some(err);
                    break;
                }
                Err(err) => return Err(err),
            };
            self.footer.push_back(row);
            if self.footer.len() > footer_rows
                && let Some(ready) = self.footer.pop_front()
            {
                chunk.push(ready);
            }
        }

        if chunk.is_empty() {
            return Ok(None);
        }
        Ok(Some(chunk))
    }

    fn restart(&mut self) -> Result<bool> {
        let Some(path) = self.path.clone() else {
            return Ok(false);
        };
        let file = File::open(&path).map_err(|err| IngestError::open(&path, err))?;
        self.reader = csv_reader(Box::new(file), &self.options);
        self.footer.clear();
        self.deferred = None;
        self.records_read = 0;
        self.started = false;
        self.finished = false;
        tracing::debug!(path = %path.display(), "Restarted delimited file");
        Ok(true)
    }
}
