//! Header row resolution.
//!
//! Turns the leading header rows of a source into final column names:
//! one header row is taken verbatim, several header rows are merged per
//! position with `_`, and positions with no label anywhere become
//! `column_<i>`.

use crate::schema::synthesized_column_name;
use crate::source::RawRow;

/// Normalizes a header cell: strips a BOM, trims, and collapses inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim_matches('\u{feff}').trim();
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// True if every cell is blank or whitespace-only. A row with no cells is blank.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Resolve column names from a block of header rows.
///
/// The result is as wide as the widest header row.
pub fn resolve_column_names(header: &[RawRow]) -> Vec<String> {
    let width = header.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|position| {
            let parts: Vec<String> = header
                .iter()
                .filter_map(|row| row.get(position))
                .map(|cell| normalize_header(cell))
                .filter(|label| !label.is_empty())
                .collect();
            if parts.is_empty() {
                synthesized_column_name(position)
            } else {
                parts.join("_")
            }
        })
        .collect()
}

/// Split `rows` into header and data, returning `(leftover rows, column names)`.
///
/// With `header_rows == 0` no rows are consumed and names are synthesized from
/// the width of the first row, at least one when a row exists. Otherwise the first `header_rows` rows (or fewer,
/// if `rows` is shorter) are merged into names and the rest are returned.
pub fn process_headers(mut rows: Vec<RawRow>, header_rows: usize) -> (Vec<RawRow>, Vec<String>) {
    if header_rows == 0 {
        let width = rows.first().map_or(0, |row| row.len().max(1));
        let names = (0..width).map(synthesized_column_name).collect();
        return (rows, names);
    }
    let split = header_rows.min(rows.len());
    let leftover = rows.split_off(split);
    let names = resolve_column_names(&rows);
    (leftover, names)
}
