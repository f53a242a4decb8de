//! Name-keyed row records.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A row keyed by column name, in schema order.
///
/// Duplicate column names collapse into one key: it keeps the position of the
/// first occurrence and the value of the last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, String)>,
}

impl Record {
    /// Pair `names` with `values` positionally.
    ///
    /// Extra values beyond `names` (or names beyond values) are ignored.
    pub fn from_row(names: &[String], values: Vec<String>) -> Self {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(names.len());
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(names.len());
        for (name, value) in names.iter().zip(values) {
            match seen.get(name.as_str()) {
                Some(&slot) => entries[slot].1 = value,
                None => {
                    seen.insert(name.as_str(), entries.len());
                    entries.push((name.clone(), value));
                }
            }
        }
        Self { entries }
    }

    /// Value of column `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, value)| value.as_str())
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.entries
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let (names, values): (Vec<String>, Vec<String>) = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .unzip();
        Self::from_row(&names, values)
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
