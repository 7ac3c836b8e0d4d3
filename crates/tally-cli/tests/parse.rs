//! Integration tests for the parse and scan commands.
//!
//! These exercise the text path only, so no OCR models are needed.

use assert_cmd::Command;
use predicates::prelude::*;

fn tally() -> Command {
    Command::cargo_bin("tally").unwrap()
}

#[test]
fn parse_text_receipt_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.txt");
    std::fs::write(
        &path,
        "WAL*MART\nGV WHOLE MILK 3.50 X\nWONDER BREAD 2.10 X\nTOTAL 5.60\n",
    )
    .unwrap();

    tally()
        .args(["parse", "--text", "--format", "csv"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Store,Item,Price"))
        .stdout(predicate::str::contains("Walmart,GV WHOLE MILK,$3.50"))
        .stdout(predicate::str::contains("Walmart,WONDER BREAD,$2.10"))
        .stdout(predicate::str::contains("Walmart,TOTAL,$5.60"));
}

#[test]
fn parse_text_receipt_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.txt");
    std::fs::write(&path, "TRADER JOE'S\nSALSA 2.99\nCASH 5.00\n").unwrap();

    tally()
        .args(["parse", "--text", "--format", "json"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trader_joes\""))
        .stdout(predicate::str::contains("\"SALSA\""))
        .stdout(predicate::str::contains("\"2.99\"").or(predicate::str::contains("2.99")));
}

#[test]
fn parse_missing_input_fails() {
    tally()
        .args(["parse", "--text", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn scan_with_no_matching_files_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.jpg");

    tally()
        .arg("scan")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching image files"));
}

#[test]
fn config_show_prints_defaults() {
    tally()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parse_unknown_stores"));
}
