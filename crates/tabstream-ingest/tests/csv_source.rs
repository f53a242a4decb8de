//! Integration tests for reading delimited files through the streaming model.

use std::io::Write;

use tabstream_core::{ChunkSource, ModelError, ModelOptions, StreamingModel};
use tabstream_ingest::{CsvChunkSource, CsvSourceOptions, IngestError};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

fn model_for(
    file: &NamedTempFile,
    source_options: CsvSourceOptions,
    model_options: &ModelOptions,
) -> StreamingModel<CsvChunkSource> {
    let source = CsvChunkSource::from_path(file.path(), source_options).unwrap();
    StreamingModel::new(source, model_options).unwrap()
}

#[test]
fn reads_single_header_file() {
    let file = create_temp_csv(b"Name,Age,City\nJohn,25,New York\nJane,30,Los Angeles\n");
    let mut model = model_for(&file, CsvSourceOptions::default(), &ModelOptions::default());

    assert_eq!(model.column_names().unwrap(), vec!["Name", "Age", "City"]);
    let records: Vec<_> = model.iter_rows().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get("City"), Some("Los Angeles"));
}

#[test]
fn merges_two_header_rows_and_strips_bom() {
    let file = create_temp_csv(
        "\u{feff}Personal,Personal,Location\nName,Age,City\nJohn,25,New York\n".as_bytes(),
    );
    let options = ModelOptions::default().with_header_rows(2);
    let mut model = model_for(&file, CsvSourceOptions::default(), &options);

    assert_eq!(
        model.column_names().unwrap(),
        vec!["Personal_Name", "Personal_Age", "Location_City"]
    );
}

#[test]
fn ragged_file_pads_and_grows() {
    let file = create_temp_csv(b"a,b\n1\n1,2,3\n4,5\n");
    let mut model = model_for(&file, CsvSourceOptions::default(), &ModelOptions::default());

    let rows: Vec<_> = model.rows().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows[0], vec!["1", ""]);
    assert_eq!(rows[1], vec!["1", "2", "3"]);
    assert_eq!(rows[2], vec!["4", "5", ""]);
    assert_eq!(model.column_names().unwrap(), vec!["a", "b", "column_2"]);
}

#[test]
fn skips_leading_and_trailing_records() {
    let file = create_temp_csv(b"exported by tool\nName,Age\nJohn,25\nJane,30\ntotal,2\n");
    let source_options = CsvSourceOptions::default()
        .with_skip_header_rows(1)
        .with_skip_footer_rows(1);
    let mut model = model_for(&file, source_options, &ModelOptions::default());

    assert_eq!(model.column_names().unwrap(), vec!["Name", "Age"]);
    let rows: Vec<_> = model.rows().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows, vec![vec!["John", "25"], vec!["Jane", "30"]]);
}

#[test]
fn footer_larger_than_file_leaves_nothing() {
    let file = create_temp_csv(b"a\nb\n");
    let mut source = CsvChunkSource::from_path(
        file.path(),
        CsvSourceOptions::default().with_skip_footer_rows(5),
    )
    .unwrap();
    assert!(source.next_chunk().unwrap().is_none());
}

#[test]
fn chunks_are_bounded_by_chunk_size() {
    let mut content = String::new();
    for n in 0..250 {
        content.push_str(&format!("{n},x\n"));
    }
    let file = create_temp_csv(content.as_bytes());
    let mut source = CsvChunkSource::from_path(
        file.path(),
        CsvSourceOptions::default().with_chunk_size(100),
    )
    .unwrap();

    let mut sizes = Vec::new();
    while let Some(chunk) = source.next_chunk().unwrap() {
        sizes.push(chunk.len());
    }
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(source.records_read(), 250);
}

#[test]
fn custom_delimiter_and_blank_lines() {
    let file = create_temp_csv(b"Name\tAge\n\nJohn\t25\n\t\nJane\t30\n");
    let source_options = CsvSourceOptions::default().with_delimiter(b'\t');
    let mut model = model_for(&file, source_options, &ModelOptions::default());

    let rows: Vec<_> = model.rows().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows, vec![vec!["John", "25"], vec!["Jane", "30"]]);
}

#[test]
fn restart_rereads_from_the_top() {
    let file = create_temp_csv(b"Name\nJohn\nJane\n");
    let mut model = model_for(&file, CsvSourceOptions::default(), &ModelOptions::default());

    assert_eq!(model.rows().count(), 2);
    assert!(model.is_exhausted());

    assert!(model.restart().unwrap());
    assert!(!model.is_initialized());
    assert_eq!(model.column_names().unwrap(), vec!["Name"]);
    let rows: Vec<_> = model.rows().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows, vec![vec!["John"], vec!["Jane"]]);
}

#[test]
fn utf16_file_is_rejected() {
    let file = create_temp_csv(b"\xFF\xFEN\x00a\x00");
    let err = CsvChunkSource::from_path(file.path(), CsvSourceOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedEncoding { .. }));
}

#[test]
fn missing_file_is_reported() {
    let err = CsvChunkSource::from_path(
        "/nonexistent/dir/data.csv",
        CsvSourceOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn parse_failure_keeps_rows_read_before_it() {
    let mut content = b"Name,Age\n".to_vec();
    for n in 0..150 {
        content.extend_from_slice(format!("John,{n}\n").as_bytes());
    }
    content.extend_from_slice(b"\xC3\x28,30\nTail,999\n");
    let file = create_temp_csv(&content);
    let source_options = CsvSourceOptions::default().with_chunk_size(100);
    let model_options = ModelOptions::default().with_chunk_size(100);
    let mut model = model_for(&file, source_options, &model_options);

    // The second chunk stops at the bad record; its rows still come out first.
    let mut rows = model.rows();
    for n in 0..150 {
        let row = rows.next().unwrap().unwrap();
        assert_eq!(row, vec!["John".to_string(), n.to_string()]);
    }

    let err = rows.next().unwrap().unwrap_err();
    let ModelError::Source(inner) = err else {
        panic!("expected a source error");
    };
    let ingest = inner.downcast_ref::<IngestError>().unwrap();
    assert!(matches!(ingest, IngestError::Csv { .. }));
    assert!(rows.next().is_none());

    // A fresh view picks up after the bad record.
    let rest: Vec<_> = model.rows().collect::<Result<_, _>>().unwrap();
    assert_eq!(rest, vec![vec!["Tail", "999"]]);
    assert_eq!(model.row_count(), 151);
}
