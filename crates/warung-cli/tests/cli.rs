use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "12/08/2024\nIndomie Goreng 2 4500\nTeh Botol 1 5000\n";

/// Command with config lookups pointed at an empty directory.
fn warung(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("warung").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn parse_text_file_to_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    warung(dir.path())
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"item\": \"Indomie Goreng\""))
        .stdout(predicate::str::contains("\"date\": \"2024-08-12\""))
        .stdout(predicate::str::contains("\"type\": \"penjualan\""));
}

#[test]
fn parse_to_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    warung(dir.path())
        .args(["parse", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("date,item,qty,unit,price,total,type,source"))
        .stdout(predicate::str::contains("2024-08-12,Indomie Goreng,2,pcs,4500,9000,penjualan,rule"))
        .stdout(predicate::str::contains("2024-08-12,Teh Botol,1,pcs,5000,5000,penjualan,rule"));
}

#[test]
fn parse_json_input_with_only_a_date() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scan.json");
    fs::write(&input, r#"{"lines": ["2024-05-01", "Catatan tanpa angka"]}"#).unwrap();

    warung(dir.path())
        .args(["parse", "--show-warnings"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"meta\""))
        .stdout(predicate::str::contains("\"item\": \"Tanggal\""))
        .stderr(predicate::str::contains("Only a date could be extracted"));
}

#[test]
fn parse_stdin_as_text() {
    let dir = TempDir::new().unwrap();

    warung(dir.path())
        .args(["parse", "-", "--format", "text"])
        .write_stdin("Kopi 15000\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(" | Kopi | qty 1 pcs | price 15000 | total 15000 | penjualan"));
}

#[test]
fn parse_nothing_usable_prints_empty_array() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("noise.txt");
    fs::write(&input, "Catatan tanpa angka sama sekali\n").unwrap();

    warung(dir.path())
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    warung(dir.path())
        .args(["parse", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn parse_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    let output = dir.path().join("rows.json");
    fs::write(&input, RECEIPT).unwrap();

    warung(dir.path())
        .arg("parse")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["total"], 9000.0);
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let scans = dir.path().join("scans");
    let out = dir.path().join("out");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("a.txt"), RECEIPT).unwrap();
    fs::write(scans.join("b.json"), r#"["07-11-24", "Gula 3 12000"]"#).unwrap();
    fs::write(scans.join("c.png"), [0u8, 1, 2]).unwrap();

    warung(dir.path())
        .arg("batch")
        .arg(format!("{}/*", scans.display()))
        .arg("-d")
        .arg(&out)
        .args(["--format", "csv", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files to process"))
        .stdout(predicate::str::contains("Processed 2 files (3 rows)"));

    let b = fs::read_to_string(out.join("b.csv")).unwrap();
    assert!(b.contains("2024-11-07,Gula,3,pcs,12000,36000,penjualan,rule"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,2,2024-08-12,14000,"));
    assert!(summary.contains("b.json,success,1,2024-11-07,36000,"));
}

#[test]
fn batch_keeps_outputs_of_inputs_sharing_a_stem() {
    let dir = TempDir::new().unwrap();
    let scans = dir.path().join("scans");
    let out = dir.path().join("out");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("a.txt"), "Kopi 15000\n").unwrap();
    fs::write(scans.join("a.json"), r#"["Gula 3 12000"]"#).unwrap();

    warung(dir.path())
        .arg("batch")
        .arg(format!("{}/*", scans.display()))
        .arg("-d")
        .arg(&out)
        .args(["--format", "csv"])
        .assert()
        .success();

    let from_text = fs::read_to_string(out.join("a.txt.csv")).unwrap();
    assert!(from_text.contains(",Kopi,1,pcs,15000,15000,penjualan,rule"));

    let from_json = fs::read_to_string(out.join("a.json.csv")).unwrap();
    assert!(from_json.contains(",Gula,3,pcs,12000,36000,penjualan,rule"));
    assert!(!out.join("a.csv").exists());
}

#[test]
fn batch_malformed_file_fails_unless_continuing() {
    let dir = TempDir::new().unwrap();
    let scans = dir.path().join("scans");
    let out = dir.path().join("out");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("good.txt"), "Kopi 15000\n").unwrap();
    fs::write(scans.join("bad.json"), r#"{"text": 1}"#).unwrap();

    let pattern = format!("{}/*", scans.display());

    warung(dir.path())
        .args(["batch", pattern.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.json"));

    warung(dir.path())
        .args(["batch", pattern.as_str(), "--continue-on-error", "--summary", "-d"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("bad.json,error"));
    assert!(summary.contains("good.txt,success,1,,15000,"));
}

#[test]
fn config_file_sets_default_format() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    warung(dir.path())
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();

    warung(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "output.format", "text"])
        .assert()
        .success();

    warung(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"text\""));

    warung(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-08-12 | Teh Botol | qty 1 pcs | price 5000 | total 5000 | penjualan"));
}

#[test]
fn config_set_rejects_unknown_key_and_bad_format() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    warung(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "output.colour", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    warung(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "output.format", "xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format"));
}
