//! Integration tests for CLI commands.

use std::io::Write;

use tabstream_cli::commands::{
    CountSummary, InputConfig, run_columns, run_count, run_head, write_rows,
};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn rows_output(input: &InputConfig, limit: Option<usize>) -> String {
    let mut out = Vec::new();
    write_rows(input, limit, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_rows_as_json_lines() {
    let file = create_temp_csv("Name,Age,City\nJohn,25,New York\n,,\nJane,30,Los Angeles\n");
    let output = rows_output(&InputConfig::new(file.path()), None);

    insta::assert_snapshot!(output, @r#"
    {"Name":"John","Age":"25","City":"New York"}
    {"Name":"Jane","Age":"30","City":"Los Angeles"}
    "#);
}

#[test]
fn test_rows_with_two_header_rows_and_growth() {
    let file = create_temp_csv("Personal,Personal\nName,Age\nJohn,25\nJane,30,extra\n");
    let mut input = InputConfig::new(file.path());
    input.header_rows = 2;
    let output = rows_output(&input, None);

    insta::assert_snapshot!(output, @r#"
    {"Personal_Name":"John","Personal_Age":"25"}
    {"Personal_Name":"Jane","Personal_Age":"30","column_2":"extra"}
    "#);
}

#[test]
fn test_rows_limit_and_kept_empty_rows() {
    let file = create_temp_csv("a;b\n;\n1;2\n3;4\n");
    let mut input = InputConfig::new(file.path());
    input.delimiter = ';';
    input.keep_empty_rows = true;

    let output = rows_output(&input, Some(2));
    insta::assert_snapshot!(output, @r#"
    {"a":"","b":""}
    {"a":"1","b":"2"}
    "#);
}

#[test]
fn test_rows_without_headers() {
    let file = create_temp_csv("x,y\n1,2\n");
    let mut input = InputConfig::new(file.path());
    input.header_rows = 0;
    let output = rows_output(&input, None);

    insta::assert_snapshot!(output, @r#"
    {"column_0":"x","column_1":"y"}
    {"column_0":"1","column_1":"2"}
    "#);
}

#[test]
fn test_count_reports_final_width() {
    let file = create_temp_csv("a,b\n1\n1,2,3\n\n4,5\ntotal,3\n");
    let mut input = InputConfig::new(file.path());
    input.skip_footer_rows = 1;

    let mut out = Vec::new();
    let summary = run_count(&input, &mut out).unwrap();
    assert_eq!(summary, CountSummary { rows: 3, columns: 3 });
    assert_eq!(String::from_utf8(out).unwrap(), "rows: 3\ncolumns: 3\n");
}

#[test]
fn test_head_pads_to_final_schema() {
    let file = create_temp_csv("id,name\n1,alpha\n2,beta,wide\n3,gamma\n");
    let mut out = Vec::new();
    run_head(&InputConfig::new(file.path()), 2, &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("column_2"));
    assert!(output.contains("alpha"));
    assert!(output.contains("wide"));
    assert!(!output.contains("gamma"));
}

#[test]
fn test_columns_lists_schema() {
    let file = create_temp_csv("\u{feff}First  Name, Age \nJohn,25\n");
    let mut out = Vec::new();
    run_columns(&InputConfig::new(file.path()), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("First Name"));
    assert!(output.contains("Age"));
    assert!(!output.contains('\u{feff}'));
}

#[test]
fn test_negative_header_rows_rejected() {
    let file = create_temp_csv("a\n1\n");
    let mut input = InputConfig::new(file.path());
    input.header_rows = -1;

    let err = run_count(&input, &mut Vec::new()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("header rows must be greater than or equal to 0"));
}

#[test]
fn test_small_chunk_size_rejected() {
    let file = create_temp_csv("a\n1\n");
    let mut input = InputConfig::new(file.path());
    input.chunk_size = 50;

    let err = write_rows(&input, None, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("chunk_size must be at least 100, got 50"));
}

#[test]
fn test_missing_file_reports_path() {
    let input = InputConfig::new("/nonexistent/tabstream/input.csv");
    let err = run_columns(&input, &mut Vec::new()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("/nonexistent/tabstream/input.csv"));
    assert!(message.contains("file not found"));
}

#[test]
fn test_non_ascii_delimiter_rejected() {
    let file = create_temp_csv("a\n1\n");
    let mut input = InputConfig::new(file.path());
    input.delimiter = '§';

    let err = run_count(&input, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("delimiter must be a single ASCII character"));
}
