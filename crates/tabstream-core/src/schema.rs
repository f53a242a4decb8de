//! Live column schema.

use std::collections::HashMap;

use crate::error::{ModelError, Result};

/// Name given to an unlabeled column at `index`.
pub fn synthesized_column_name(index: usize) -> String {
    format!("column_{index}")
}

/// Ordered column names with first-match name lookup.
///
/// Duplicate names are kept verbatim; lookups resolve to the first position.
/// Within one initialized model the schema only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new(names: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(position);
        }
        Self { names, index }
    }

    /// Column names in schema order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of the first column called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ColumnNotFound`] carrying `name`.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.position(name).ok_or_else(|| ModelError::ColumnNotFound {
            name: name.to_string(),
        })
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// True when at least two positions share a name.
    pub fn has_duplicates(&self) -> bool {
        self.index.len() != self.names.len()
    }

    /// Append synthesized columns until the schema is `width` wide.
    ///
    /// Returns the number of columns added. Never removes columns.
    pub(crate) fn grow_to(&mut self, width: usize) -> usize {
        let before = self.names.len();
        for position in before..width {
            let name = synthesized_column_name(position);
            self.index.entry(name.clone()).or_insert(position);
            self.names.push(name);
        }
        self.names.len() - before
    }
}
