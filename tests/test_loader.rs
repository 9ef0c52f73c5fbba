//! Tests for dataset loading from CSV and Parquet sources

use fraudsvm::pipeline::*;
use std::path::Path;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_load_csv_dataset() {
    let (_temp_dir, path) = synthetic_csv(40, 6, 1);
    let (dataset, stats) = load_dataset_with_stats(&path, 10000).unwrap();

    assert_eq!(dataset.len(), 46);
    assert_eq!(stats.rows, 46);
    assert_eq!(stats.columns, 31, "Time, V1..V28, Amount, Class");
    assert_eq!(dataset.class_frequency(), ClassFrequency { legit: 40, fraud: 6 });
}

#[test]
fn test_load_parquet_dataset() {
    let raw = synthetic_transactions(25, 5, 2);
    let mut df = transactions_frame(&raw);
    let (_temp_dir, path) = create_temp_parquet(&mut df);

    let dataset = load_dataset(&path, 10000).unwrap();
    assert_eq!(dataset.len(), 30);
    for (r, d) in raw.iter().zip(dataset.iter()) {
        assert_eq!(d.hour, derive_hour(r.elapsed_seconds));
        assert_eq!(d.label, r.label);
    }
}

#[test]
fn test_csv_values_survive_loading() {
    let raw = synthetic_transactions(10, 2, 3);
    let mut df = transactions_frame(&raw);
    let (_temp_dir, path) = create_temp_csv(&mut df);

    let loaded = load_transactions(&path, 10000).unwrap();
    assert_eq!(loaded.len(), raw.len());
    for (a, b) in raw.iter().zip(loaded.iter()) {
        assert_eq!(a.elapsed_seconds, b.elapsed_seconds);
        assert_eq!(a.label, b.label);
        assert!((a.amount - b.amount).abs() < 1e-9);
        for (x, y) in a.components.iter().zip(b.components.iter()) {
            assert!((x - y).abs() < 1e-9);
        }
    }
}

#[test]
fn test_get_column_names() {
    let (_temp_dir, path) = synthetic_csv(3, 1, 4);
    let names = get_column_names(&path).unwrap();

    assert_eq!(names.len(), 31);
    assert_eq!(names[0], "Time");
    assert_eq!(names[1], "V1");
    assert_eq!(names[29], "Amount");
    assert_eq!(names[30], "Class");
}

#[test]
fn test_missing_file() {
    let err = load_dataset(Path::new("/nonexistent/transactions.csv"), 10000).unwrap_err();
    assert!(matches!(err, PipelineError::DataLoad(_)));
}

#[test]
fn test_unsupported_extension() {
    let (_temp_dir, path) = write_csv_lines("transactions.txt", &[csv_header("Time")]);
    let err = load_dataset(&path, 10000).unwrap_err();

    match err {
        PipelineError::DataLoad(msg) => assert!(msg.contains("Unsupported file format")),
        other => panic!("Expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_missing_required_column() {
    let header = csv_header("Time").replace(",V7,", ",V7_renamed,");
    let lines = vec![
        header,
        csv_row("0", 0.1, 10.0, "0"),
        csv_row("1", 0.2, 20.0, "1"),
    ];
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &lines);

    match load_dataset(&path, 10000).unwrap_err() {
        PipelineError::DataLoad(msg) => assert!(msg.contains("V7"), "message: {}", msg),
        other => panic!("Expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_missing_time_column() {
    let lines = vec![
        csv_header("Seconds"),
        csv_row("0", 0.1, 10.0, "0"),
        csv_row("1", 0.2, 20.0, "1"),
    ];
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &lines);

    let err = load_dataset(&path, 10000).unwrap_err();
    assert!(matches!(err, PipelineError::DataLoad(_)));
}

#[test]
fn test_elapsed_seconds_alias() {
    let lines = vec![
        csv_header("elapsed_seconds"),
        csv_row("3661", 0.1, 10.0, "0"),
        csv_row("7200", -0.3, 99.0, "1"),
    ];
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &lines);

    let dataset = load_dataset(&path, 10000).unwrap();
    let hours: Vec<u8> = dataset.iter().map(|r| r.hour).collect();
    assert_eq!(hours, vec![1, 2]);
}

#[test]
fn test_fractional_time_is_floored() {
    let lines = vec![
        csv_header("Time"),
        csv_row("3599.9", 0.1, 10.0, "0"),
        csv_row("3600.5", 0.2, 20.0, "1"),
    ];
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &lines);

    let records = load_transactions(&path, 10000).unwrap();
    assert_eq!(records[0].elapsed_seconds, 3599);
    assert_eq!(records[1].elapsed_seconds, 3600);
}

#[test]
fn test_invalid_class_value() {
    let lines = vec![
        csv_header("Time"),
        csv_row("0", 0.1, 10.0, "0"),
        csv_row("1", 0.2, 20.0, "2"),
    ];
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &lines);

    match load_dataset(&path, 10000).unwrap_err() {
        PipelineError::DataLoad(msg) => assert!(msg.contains("Class"), "message: {}", msg),
        other => panic!("Expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_quoted_class_values_accepted() {
    let lines = vec![
        csv_header("Time"),
        csv_row("0", 0.1, 10.0, "\"0\""),
        csv_row("1", 0.2, 20.0, "\"1\""),
    ];
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &lines);

    let dataset = load_dataset(&path, 10000).unwrap();
    assert_eq!(dataset.class_frequency(), ClassFrequency { legit: 1, fraud: 1 });
}

#[test]
fn test_non_numeric_component() {
    let mut bad = csv_row("1", 0.2, 20.0, "1");
    bad = bad.replacen(",0.2,", ",abc,", 1);
    let lines = vec![csv_header("Time"), csv_row("0", 0.1, 10.0, "0"), bad];
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &lines);

    let err = load_dataset(&path, 10000).unwrap_err();
    assert!(matches!(err, PipelineError::DataLoad(_)));
}

#[test]
fn test_negative_amount_rejected() {
    let lines = vec![
        csv_header("Time"),
        csv_row("0", 0.1, 10.0, "0"),
        csv_row("1", 0.2, -5.0, "1"),
    ];
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &lines);

    match load_dataset(&path, 10000).unwrap_err() {
        PipelineError::DataLoad(msg) => assert!(msg.contains("Amount"), "message: {}", msg),
        other => panic!("Expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_single_class_file_rejected() {
    let lines = vec![
        csv_header("Time"),
        csv_row("0", 0.1, 10.0, "0"),
        csv_row("1", 0.2, 20.0, "0"),
    ];
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &lines);

    match load_dataset(&path, 10000).unwrap_err() {
        PipelineError::DataLoad(msg) => assert!(msg.contains("fraud"), "message: {}", msg),
        other => panic!("Expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_header_only_file_rejected() {
    let (_temp_dir, path) = write_csv_lines("transactions.csv", &[csv_header("Time")]);

    let err = load_dataset(&path, 10000).unwrap_err();
    assert!(matches!(err, PipelineError::DataLoad(_)));
}

#[test]
fn test_full_table_schema_scan() {
    let (_temp_dir, path) = synthetic_csv(20, 4, 5);
    let dataset = load_dataset(&path, 0).unwrap();
    assert_eq!(dataset.len(), 24);
}
