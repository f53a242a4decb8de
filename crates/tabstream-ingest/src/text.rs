//! Line-oriented helpers for text files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Default number of lines returned by [`preview`].
pub const DEFAULT_PREVIEW_LINES: usize = 100;

/// Options for [`preview`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    /// Maximum lines returned. Must be at least 1.
    pub max_lines: usize,
    /// Trim whitespace from each line.
    pub strip: bool,
    /// Lines skipped before the preview starts.
    pub skip_header_rows: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_PREVIEW_LINES,
            strip: true,
            skip_header_rows: 0,
        }
    }
}

impl PreviewOptions {
    #[must_use]
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    #[must_use]
    pub fn with_strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    #[must_use]
    pub fn with_skip_header_rows(mut self, rows: usize) -> Self {
        self.skip_header_rows = rows;
        self
    }
}

/// Rejects files that start with a UTF-16 byte-order mark.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedEncoding`] for UTF-16 input, or an
/// open/read error.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|err| IngestError::open(path, err))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

fn open_lines(path: &Path) -> Result<std::io::Lines<BufReader<File>>> {
    let file = File::open(path).map_err(|err| IngestError::open(path, err))?;
    Ok(BufReader::new(file).lines())
}

/// Count lines in a text file without loading it.
///
/// # Errors
///
/// Fails if the file is missing, unreadable, or not UTF-8.
pub fn line_count(path: &Path) -> Result<usize> {
    let mut count = 0;
    for line in open_lines(path)? {
        line.map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        count += 1;
    }
    Ok(count)
}

/// Read up to `max_lines` lines after skipping `skip_header_rows`.
///
/// A leading byte-order mark on the first line is removed.
///
/// # Errors
///
/// Returns [`IngestError::InvalidMaxLines`] when `max_lines` is zero, or a
/// file error.
pub fn preview(path: &Path, options: &PreviewOptions) -> Result<Vec<String>> {
    if options.max_lines < 1 {
        return Err(IngestError::InvalidMaxLines);
    }

    let mut lines = Vec::with_capacity(options.max_lines.min(DEFAULT_PREVIEW_LINES));
    for (number, line) in open_lines(path)?
        .enumerate()
        .skip(options.skip_header_rows)
        .take(options.max_lines)
    {
        let line = line.map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let line = if number == 0 {
            line.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(line)
        } else {
            line
        };
        lines.push(if options.strip {
            line.trim().to_string()
        } else {
            line
        });
    }
    Ok(lines)
}
