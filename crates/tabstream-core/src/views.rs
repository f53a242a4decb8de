//! Row iteration views.
//!
//! All three views drive the same normalized row stream of one model and
//! differ only in how each row is projected. They are single-pass: rows one
//! view consumes are gone for the others. After an error a view yields nothing
//! further.

use std::iter::FusedIterator;

use crate::error::Result;
use crate::model::StreamingModel;
use crate::record::Record;
use crate::schema::Schema;
use crate::source::{ChunkSource, RawRow};

struct Engine<'a, S> {
    model: &'a mut StreamingModel<S>,
    fused: bool,
}

impl<'a, S: ChunkSource> Engine<'a, S> {
    fn new(model: &'a mut StreamingModel<S>) -> Self {
        Self {
            model,
            fused: false,
        }
    }

    fn next_with<T>(&mut self, project: impl FnOnce(&Schema, RawRow) -> T) -> Option<Result<T>> {
        if self.fused {
            return None;
        }
        match self.model.next_row() {
            Ok(Some(row)) => Some(Ok(project(self.model.current_schema(), row))),
            Ok(None) => {
                self.fused = true;
                None
            }
            Err(err) => {
                self.fused = true;
                Some(Err(err))
            }
        }
    }
}

/// Rows as ordered cells. Created by [`StreamingModel::rows`].
pub struct Rows<'a, S>(Engine<'a, S>);

impl<'a, S: ChunkSource> Rows<'a, S> {
    pub(crate) fn new(model: &'a mut StreamingModel<S>) -> Self {
        Self(Engine::new(model))
    }
}

impl<S: ChunkSource> Iterator for Rows<'_, S> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_with(|_, row| row)
    }
}

impl<S: ChunkSource> FusedIterator for Rows<'_, S> {}

/// Rows as [`Record`]s keyed by the schema at emission time.
/// Created by [`StreamingModel::iter_rows`].
pub struct Records<'a, S>(Engine<'a, S>);

impl<'a, S: ChunkSource> Records<'a, S> {
    pub(crate) fn new(model: &'a mut StreamingModel<S>) -> Self {
        Self(Engine::new(model))
    }
}

impl<S: ChunkSource> Iterator for Records<'_, S> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next_with(|schema, row| Record::from_row(schema.names(), row))
    }
}

impl<S: ChunkSource> FusedIterator for Records<'_, S> {}

/// Rows as immutable cell slices. Created by [`StreamingModel::iter_rows_as_tuples`].
pub struct Tuples<'a, S>(Engine<'a, S>);

impl<'a, S: ChunkSource> Tuples<'a, S> {
    pub(crate) fn new(model: &'a mut StreamingModel<S>) -> Self {
        Self(Engine::new(model))
    }
}

impl<S: ChunkSource> Iterator for Tuples<'_, S> {
    type Item = Result<Box<[String]>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_with(|_, row| row.into_boxed_slice())
    }
}

impl<S: ChunkSource> FusedIterator for Tuples<'_, S> {}
