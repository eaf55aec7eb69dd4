use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn statement(dir: &Path) -> PathBuf {
    write_csv(
        dir,
        "stmt.csv",
        "2024-01-05,Tesco Store,-23.50\n2024-01-06,Salary,1500.00\n2024-01-07,Uber Trip,-12.00\n",
    )
}

fn expenses() -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_list_shows_only_expenses() {
    let dir = tempfile::tempdir().unwrap();
    let path = statement(dir.path());
    expenses()
        .arg("list")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tesco Store"))
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("23.50"))
        .stdout(predicate::str::contains("Transportation"))
        .stdout(predicate::str::contains("12.00"))
        .stdout(predicate::str::contains("35.50"))
        .stdout(predicate::str::contains("Salary").not());
}

#[test]
fn test_list_sorts_amount_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "amounts.csv",
        "2024-01-01,Shop A,-2.00\n2024-01-02,Shop B,-10.00\n",
    );
    let output = expenses()
        .args(["list", path.to_str().unwrap(), "--sort", "amount"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let ten = stdout.find("Shop B").unwrap();
    let two = stdout.find("Shop A").unwrap();
    assert!(ten < two, "10.00 should sort before 2.00:\n{stdout}");

    let output = expenses()
        .args(["list", path.to_str().unwrap(), "--sort", "amount", "--desc"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.find("Shop A").unwrap() < stdout.find("Shop B").unwrap());
}

#[test]
fn test_summary_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = statement(dir.path());
    let output = expenses()
        .args(["summary", path.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let categories = value["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["category"], "Groceries");
    assert_eq!(categories[0]["total"], 23.5);
    assert_eq!(categories[1]["category"], "Transportation");
    assert_eq!(categories[1]["total"], 12.0);
    assert_eq!(value["total"], 35.5);
}

#[test]
fn test_summary_text_percentages() {
    let dir = tempfile::tempdir().unwrap();
    let path = statement(dir.path());
    expenses()
        .arg("summary")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("66.2%"))
        .stdout(predicate::str::contains("33.8%"));
}

#[test]
fn test_summary_without_expenses() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "income.csv", "2024-01-06,Salary,1500.00\n2024-01-07,Junk,abc\n");
    expenses()
        .arg("summary")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No data to display"));
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    expenses()
        .arg("list")
        .arg(dir.path().join("missing.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: IO error"));
}

#[test]
fn test_malformed_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "wide.csv", "2024-01-05,Tesco,-1.00,extra\n");
    expenses()
        .arg("summary")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed row at line 1"));
}

#[test]
fn test_empty_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "empty.csv", "\n");
    expenses()
        .arg("list")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No columns to parse from file"));
}

#[test]
fn test_rules_lists_keywords() {
    expenses()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("tesco"))
        .stdout(predicate::str::contains("Transportation"));
}

#[test]
fn test_browse_without_terminal_prints_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = statement(dir.path());
    expenses()
        .arg("browse")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Uber Trip"));
}

#[test]
fn test_browse_without_terminal_or_file_fails() {
    expenses()
        .arg("browse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
