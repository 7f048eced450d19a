// Integration tests for chart, spreadsheet and document exports

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Read;
use tempfile::TempDir;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn pareto() -> Command {
    Command::cargo_bin("pareto").unwrap()
}

fn zip_entry(path: &std::path::Path, name: &str) -> String {
    let file = fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();
    text
}

#[test]
fn test_all_exports_written() {
    let dir = TempDir::new().unwrap();
    let xlsx = dir.path().join("report.xlsx");
    let docx = dir.path().join("report.docx");
    let chart = dir.path().join("chart.png");
    let top_chart = dir.path().join("top.png");

    pareto()
        .args(["-a", "A=50", "-a", "B=30", "-a", "C=15", "-a", "D=5"])
        .args(["--format", "none"])
        .arg("--xlsx")
        .arg(&xlsx)
        .arg("--docx")
        .arg(&docx)
        .arg("--chart")
        .arg(&chart)
        .arg("--top-chart")
        .arg(&top_chart)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("spreadsheet written"));

    assert!(fs::read(&chart).unwrap().starts_with(PNG_SIGNATURE));
    assert!(fs::read(&top_chart).unwrap().starts_with(PNG_SIGNATURE));
    assert!(fs::read(&xlsx).unwrap().starts_with(b"PK"));

    let document = zip_entry(&docx, "word/document.xml");
    assert!(document.contains("Total number of causes: 4"));
    assert!(document.contains("Top causes: 2"));
    assert!(document.contains("They cover 80.0% of occurrences"));
}

#[test]
fn test_spreadsheet_round_trip() {
    let dir = TempDir::new().unwrap();
    let xlsx = dir.path().join("round.xlsx");

    pareto()
        .args(["-t", "Round trip", "-a", "Jam=7", "-a", "Leak=2.5", "-a", "Noise=1"])
        .args(["--format", "none"])
        .arg("--xlsx")
        .arg(&xlsx)
        .assert()
        .success();

    pareto()
        .arg("-i")
        .arg(&xlsx)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jam,7,"))
        .stdout(predicate::str::contains("Leak,2.5,"))
        .stdout(predicate::str::contains("Noise,1,"));
}

#[test]
fn test_spreadsheet_highlight_and_sheet_name() {
    let dir = TempDir::new().unwrap();
    let xlsx = dir.path().join("styled.xlsx");

    pareto()
        .args(["-a", "A=50", "-a", "B=30", "-a", "C=20", "--format", "none"])
        .arg("--xlsx")
        .arg(&xlsx)
        .assert()
        .success();

    assert!(zip_entry(&xlsx, "xl/styles.xml").contains("FFC7CE"));
    assert!(zip_entry(&xlsx, "xl/workbook.xml").contains("name=\"Pareto\""));
}

#[test]
fn test_no_export_on_empty_dataset() {
    let dir = TempDir::new().unwrap();
    let xlsx = dir.path().join("empty.xlsx");

    pareto()
        .arg("--xlsx")
        .arg(&xlsx)
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to analyze"));

    assert!(!xlsx.exists());
}

#[test]
fn test_export_into_missing_directory_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let docx = dir.path().join("nope").join("report.docx");

    pareto()
        .args(["-a", "A=1", "--format", "none"])
        .arg("--docx")
        .arg(&docx)
        .assert()
        .failure();

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
