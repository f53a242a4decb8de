//! Table rendering for terminal output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Table of schema positions and column names.
pub fn column_table(names: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (position, name) in names.iter().enumerate() {
        table.add_row(vec![Cell::new(position), Cell::new(name)]);
    }
    table
}

/// Table of rows keyed by `names`. Rows are expected to be as wide as `names`.
pub fn row_table(names: &[String], rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table.set_header(names.iter().map(|name| header_cell(name)));
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(row);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_table_lists_positions() {
        let names = vec!["Name".to_string(), "column_1".to_string()];
        let rendered = column_table(&names).to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("column_1"));
        assert!(rendered.contains('1'));
    }

    #[test]
    fn test_row_table_has_one_line_per_row() {
        let names = vec!["a".to_string(), "b".to_string()];
        let rows = vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["3".to_string(), String::new()],
        ];
        let mut table = row_table(&names, &rows);
        assert_eq!(table.row_iter().count(), 2);
        assert_eq!(table.column_count(), 2);
    }
}
