use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample.csv")
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("popviz").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("popviz"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn lists_locations_sorted() {
    let mut cmd = Command::cargo_bin("popviz").unwrap();
    cmd.arg("locations").arg("--data").arg(fixture());
    cmd.assert().success().stdout("AUS\nBRA\nUSA\n");
}

#[test]
fn writes_line_chart() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("usa.svg");
    let mut cmd = Command::cargo_bin("popviz").unwrap();
    cmd.args(["line", "--location", "USA", "--out"])
        .arg(&out)
        .arg("--data")
        .arg(fixture());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("3 points"));
    assert!(fs::read_to_string(&out).unwrap().contains("<svg"));
}

#[test]
fn writes_scatter_chart_with_trend() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("scatter.svg");
    let mut cmd = Command::cargo_bin("popviz").unwrap();
    cmd.arg("scatter").arg("-D").arg(fixture()).arg("-o").arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("trend:"))
        .stderr(predicate::str::contains("1 skipped"));
    assert!(out.exists());
}

#[test]
fn exports_one_year_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("y1960.json");
    let mut cmd = Command::cargo_bin("popviz").unwrap();
    cmd.args(["export", "--year", "1960", "-o"])
        .arg(&out)
        .arg("-D")
        .arg(fixture());
    cmd.assert().success();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 3);
}

#[test]
fn export_needs_a_filter() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("popviz").unwrap();
    cmd.args(["export", "-o"])
        .arg(dir.path().join("x.csv"))
        .arg("-D")
        .arg(fixture());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--location or --year"));
}

#[test]
fn stats_per_location() {
    let mut cmd = Command::cargo_bin("popviz").unwrap();
    cmd.args(["stats", "--field", "life_expectancy", "-D"]).arg(fixture());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("AUS"))
        .stdout(predicate::str::contains("missing=1"));
}

#[test]
fn missing_data_file_fails() {
    let mut cmd = Command::cargo_bin("popviz").unwrap();
    cmd.args(["locations", "--data", "does/not/exist.csv"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does/not/exist.csv"));
}
