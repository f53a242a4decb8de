//! Row-chunk sources consumed by the model.
//!
//! A source yields ordered batches of raw rows and signals exhaustion by
//! returning `None`. The model never parses text itself; any reader that can
//! split records into string cells can feed it through [`ChunkSource`].

use std::convert::Infallible;
use std::iter::Fuse;

/// One raw row: ordered string cells.
pub type RawRow = Vec<String>;

/// One batch of raw rows produced by a single pull.
pub type Chunk = Vec<RawRow>;

/// A lazy producer of row chunks.
pub trait ChunkSource {
    /// Failure raised while producing a chunk.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce the next chunk, or `None` once the source is exhausted.
    fn next_chunk(&mut self) -> Result<Option<Chunk>, Self::Error>;

    /// Rewind to the first row. Returns `false` when rewinding is unsupported.
    fn restart(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    type Error = S::Error;

    fn next_chunk(&mut self) -> Result<Option<Chunk>, Self::Error> {
        (**self).next_chunk()
    }

    fn restart(&mut self) -> Result<bool, Self::Error> {
        (**self).restart()
    }
}

impl<S: ChunkSource + ?Sized> ChunkSource for Box<S> {
    type Error = S::Error;

    fn next_chunk(&mut self) -> Result<Option<Chunk>, Self::Error> {
        (**self).next_chunk()
    }

    fn restart(&mut self) -> Result<bool, Self::Error> {
        (**self).restart()
    }
}

/// Adapts any iterator of chunks. Not restartable.
#[derive(Debug)]
pub struct IterSource<I> {
    chunks: Fuse<I>,
}

impl<I: Iterator<Item = Chunk>> IterSource<I> {
    pub fn new<T>(chunks: T) -> Self
    where
        T: IntoIterator<IntoIter = I, Item = Chunk>,
    {
        Self {
            chunks: chunks.into_iter().fuse(),
        }
    }
}

impl<I: Iterator<Item = Chunk>> ChunkSource for IterSource<I> {
    type Error = Infallible;

    fn next_chunk(&mut self) -> Result<Option<Chunk>, Self::Error> {
        Ok(self.chunks.next())
    }
}

/// In-memory chunks with a rewindable cursor.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    chunks: Vec<Chunk>,
    cursor: usize,
}

impl VecSource {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks, cursor: 0 }
    }

    /// Split `rows` into chunks of at most `rows_per_chunk` rows.
    pub fn from_rows<R, C>(rows: R, rows_per_chunk: usize) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let size = rows_per_chunk.max(1);
        let rows: Vec<RawRow> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let chunks = rows.chunks(size).map(<[RawRow]>::to_vec).collect();
        Self::new(chunks)
    }

    /// Number of chunks not yet produced.
    pub fn remaining(&self) -> usize {
        self.chunks.len().saturating_sub(self.cursor)
    }
}

impl ChunkSource for VecSource {
    type Error = Infallible;

    fn next_chunk(&mut self) -> Result<Option<Chunk>, Self::Error> {
        let chunk = self.chunks.get(self.cursor).cloned();
        if chunk.is_some() {
            self.cursor += 1;
        }
        Ok(chunk)
    }

    fn restart(&mut self) -> Result<bool, Self::Error> {
        self.cursor = 0;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_source_chunks_rows() {
        let mut source = VecSource::from_rows([["a"], ["b"], ["c"]], 2);
        assert_eq!(source.remaining(), 2);
        assert_eq!(
            source.next_chunk().unwrap(),
            Some(vec![vec!["a".to_string()], vec!["b".to_string()]])
        );
        assert_eq!(
            source.next_chunk().unwrap(),
            Some(vec![vec!["c".to_string()]])
        );
        assert_eq!(source.next_chunk().unwrap(), None);
        assert_eq!(source.next_chunk().unwrap(), None);
    }

    #[test]
    fn test_vec_source_restart() {
        let mut source = VecSource::from_rows([["a"]], 100);
        assert!(source.next_chunk().unwrap().is_some());
        assert!(source.next_chunk().unwrap().is_none());
        assert!(source.restart().unwrap());
        assert!(source.next_chunk().unwrap().is_some());
    }

    #[test]
    fn test_iter_source_not_restartable() {
        let mut source = IterSource::new(vec![vec![vec!["x".to_string()]]]);
        assert!(source.next_chunk().unwrap().is_some());
        assert!(source.next_chunk().unwrap().is_none());
        assert!(!source.restart().unwrap());
    }

    fn drain<S: ChunkSource>(mut source: S) -> usize {
        let mut chunks = 0;
        while let Ok(Some(_)) = source.next_chunk() {
            chunks += 1;
        }
        chunks
    }

    #[test]
    fn test_handles_forward() {
        let mut source = VecSource::from_rows([["a"], ["b"]], 1);
        assert_eq!(drain(&mut source), 2);
        assert_eq!(source.remaining(), 0);

        let boxed: Box<VecSource> = Box::new(VecSource::from_rows([["a"]], 1));
        assert_eq!(drain(boxed), 1);
    }
}
