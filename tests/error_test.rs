//! Error cases

use ro_harvest::error::HarvestError;
use ro_harvest::scanner;
use ro_harvest::run_batch;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(HarvestError::FolderNotFound(_))));
}

#[test]
fn test_scan_file_instead_of_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("report.xlsx");
    std::fs::write(&file, b"x").unwrap();

    let result = scanner::scan_folder(&file);
    assert!(matches!(result, Err(HarvestError::FolderNotFound(_))));
}

#[test]
fn test_scan_folder_no_reports() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path()).unwrap();
    assert!(result.is_empty());
}

/// Missing input folder aborts before the master table is touched
#[test]
fn test_batch_missing_folder_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("master.csv");

    let result = run_batch(&dir.path().join("absent"), &output);
    assert!(matches!(result, Err(HarvestError::FolderNotFound(_))));
    assert!(!output.exists());
}

/// A master CSV that cannot be parsed stops the run
#[test]
fn test_batch_invalid_master_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("master.csv");
    std::fs::write(&output, b"Ca_FW\n\xff\xfe\n").unwrap();

    let result = run_batch(dir.path(), &output);
    assert!(matches!(result, Err(HarvestError::Csv(_))));
}

#[test]
fn test_error_display() {
    let errors = vec![
        HarvestError::Config("bad config".to_string()),
        HarvestError::MissingInputDir,
        HarvestError::FileNotFound("run.xlsx".to_string()),
        HarvestError::FolderNotFound("/path/to/folder".to_string()),
        HarvestError::SheetUnavailable {
            sheet: "Process Data".to_string(),
            reason: "not found".to_string(),
        },
        HarvestError::StageUndetected(PathBuf::from("run.xlsx")),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "empty message: {:?}", err);
    }
}

#[test]
fn test_stage_undetected_message() {
    let err = HarvestError::StageUndetected(PathBuf::from("reports/run.xlsx"));
    let display = err.to_string();
    assert!(display.contains("reports/run.xlsx"));
    assert!(display.contains("A25 != 3"));
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: HarvestError = io_err.into();

    assert!(matches!(err, HarvestError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: HarvestError = json_err.into();

    assert!(matches!(err, HarvestError::JsonParse(_)));
}

/// Common errors pass through unchanged
#[test]
fn test_common_error_transparent() {
    let common_err = ro_harvest_common::Error::InvalidStage(7);
    let expected = common_err.to_string();
    let err: HarvestError = common_err.into();

    assert!(matches!(err, HarvestError::Common(_)));
    assert_eq!(err.to_string(), expected);
}
