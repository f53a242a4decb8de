//! Bounded row buffer refilled one chunk at a time.

use std::collections::VecDeque;

use crate::error::{ModelError, Result};
use crate::header::is_blank_row;
use crate::source::{ChunkSource, RawRow};

/// Outcome of a single [`RowBuffer::refill`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refill {
    /// The source has no further chunks.
    Exhausted,
    /// One chunk was pulled.
    Pulled(ChunkStats),
}

/// Accounting for one pulled chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkStats {
    /// Leading rows handed back unfiltered, as requested by the caller.
    pub header: Vec<RawRow>,
    /// Rows appended to the buffer.
    pub kept: usize,
    /// Blank rows dropped.
    pub dropped: usize,
}

/// Queue of data rows awaiting normalization.
///
/// Refilled only when drained, so it holds at most one chunk.
#[derive(Debug)]
pub struct RowBuffer {
    rows: VecDeque<RawRow>,
    skip_empty_rows: bool,
    chunk_size: usize,
    oversize_warned: bool,
}

impl RowBuffer {
    pub fn new(skip_empty_rows: bool, chunk_size: usize) -> Self {
        Self {
            rows: VecDeque::new(),
            skip_empty_rows,
            chunk_size,
            oversize_warned: false,
        }
    }

    /// Pull exactly one chunk from `source`.
    ///
    /// The first `header_quota` rows of the chunk are returned in
    /// [`ChunkStats::header`] without filtering; the rest enter the buffer,
    /// minus blank rows when empty-row skipping is on.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Source`] wrapping the source's own failure.
    pub fn refill<S: ChunkSource>(&mut self, source: &mut S, header_quota: usize) -> Result<Refill> {
        let Some(chunk) = source.next_chunk().map_err(ModelError::source_error)? else {
            return Ok(Refill::Exhausted);
        };

        if chunk.len() > self.chunk_size && !self.oversize_warned {
            self.oversize_warned = true;
            tracing::warn!(
                rows = chunk.len(),
                chunk_size = self.chunk_size,
                "Source chunk exceeds configured chunk_size"
            );
        }

        let mut stats = ChunkStats::default();
        let mut rows = chunk.into_iter();
        stats.header.extend(rows.by_ref().take(header_quota));
        for row in rows {
            if self.skip_empty_rows && is_blank_row(&row) {
                stats.dropped += 1;
                continue;
            }
            self.rows.push_back(row);
            stats.kept += 1;
        }

        tracing::trace!(
            header = stats.header.len(),
            kept = stats.kept,
            dropped = stats.dropped,
            "Pulled chunk"
        );
        Ok(Refill::Pulled(stats))
    }

    pub fn pop_front(&mut self) -> Option<RawRow> {
        self.rows.pop_front()
    }

    pub fn front(&self) -> Option<&RawRow> {
        self.rows.front()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Discard buffered rows, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let discarded = self.rows.len();
        self.rows.clear();
        discarded
    }
}
