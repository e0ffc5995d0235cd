//! File-level conversion: output files, partial-output policy and the binary.

mod common;

use access2excel::convert::{ConvertOptions, Converter, MemoryProgress, PartialOutput, PathGuard};
use access2excel::database::{ColumnType, MemoryDatabase, Value};
use access2excel::sheet::OutputFormat;
use common::*;
use std::process::Command;

fn broken_database() -> MemoryDatabase {
    MemoryDatabase::builder()
        .table("T", [("A", ColumnType::Int32)], vec![vec![Some(Value::Int32(1))]])
        .reported_row_count(2)
        .build()
        .unwrap()
}

#[test]
fn test_write_file_produces_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.xls");
    let mut progress = MemoryProgress::new();
    Converter::new(options(OutputFormat::Xls))
        .write_file(&mut sample_database(), &output, &mut progress)
        .unwrap();

    let sheets = read_back(OutputFormat::Xls, std::fs::read(&output).unwrap());
    assert_eq!(sheets.len(), 2);
    assert_eq!(progress.lines.last().map(String::as_str), Some("Done."));
}

#[test]
fn test_partial_output_policy() {
    let dir = tempfile::tempdir().unwrap();

    let kept = dir.path().join("kept.xlsx");
    let mut progress = MemoryProgress::new();
    let err = Converter::default()
        .write_file(&mut broken_database(), &kept, &mut progress)
        .unwrap_err();
    assert_eq!(err.kind(), "ConversionError");
    assert_eq!(progress.errors, vec![err.report_line()]);
    assert!(kept.exists());

    let deleted = dir.path().join("deleted.xlsx");
    let options = ConvertOptions {
        on_error: PartialOutput::Delete,
        ..ConvertOptions::default()
    };
    assert!(Converter::new(options)
        .write_file(&mut broken_database(), &deleted, &mut MemoryProgress::new())
        .is_err());
    assert!(!deleted.exists());
}

#[test]
fn test_run_guards_output_path() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("db.accdb");
    std::fs::write(&input, b"").unwrap();
    let output = root.path().join("..").join("escaped.xlsx");

    let err = Converter::default()
        .with_guard(PathGuard::new(root.path()))
        .run(&input, &output, &mut MemoryProgress::new())
        .unwrap_err();
    assert_eq!(err.kind(), "SecurityError");
    assert!(!output.exists());
}

#[test]
fn test_run_accepts_output_in_new_folder_inside_root() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("db.accdb");
    std::fs::write(&input, b"").unwrap();
    let output = root.path().join("reports").join("2024").join("out.xlsx");

    let err = Converter::default()
        .with_guard(PathGuard::new(root.path()))
        .run(&input, &output, &mut MemoryProgress::new())
        .unwrap_err();
    assert_eq!(err.kind(), "OpenError");
}

#[test]
fn test_write_file_into_missing_folder_is_a_conversion_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("out.xlsx");
    let err = Converter::default()
        .write_file(&mut sample_database(), &output, &mut MemoryProgress::new())
        .unwrap_err();
    assert_eq!(err.kind(), "ConversionError");
}

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_access2excel"))
}

#[test]
fn test_cli_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary()
        .current_dir(dir.path())
        .args(["-i", "db.mdb", "-f", "ods"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid format: ods. Use XLS or XLSX."));
    assert!(!dir.path().join("db.xlsx").exists());
}

#[test]
fn test_cli_requires_input() {
    let output = binary().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--inputFile"));
}

#[test]
fn test_cli_reports_open_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("db.mdb"), b"not a database").unwrap();
    std::fs::create_dir(dir.path().join("tools")).unwrap();

    let output = binary()
        .current_dir(dir.path())
        .args(["-i", "db.mdb", "-f", "xls", "--mdbtools-dir", "tools"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: OpenError"));
    assert!(!dir.path().join("db.xls").exists());
}

#[test]
fn test_cli_rejects_input_outside_working_directory() {
    let work = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let input = other.path().join("db.mdb");
    std::fs::write(&input, b"").unwrap();

    let output = binary()
        .current_dir(work.path())
        .arg("-i")
        .arg(&input)
        .args(["-o", "out.xlsx"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: SecurityError"));
    assert!(!work.path().join("out.xlsx").exists());
}
