#![allow(missing_docs)]

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

fn workdir_with(results: Option<&str>) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    if let Some(contents) = results {
        fs::write(dir.path().join("results.csv"), contents).expect("write results");
    }
    dir
}

fn failing_stderr(dir: &TempDir) -> String {
    let output = cargo_bin_cmd!("ptrplot")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();
    String::from_utf8_lossy(&output).into_owned()
}

#[test]
fn missing_results_file_fails_at_load() {
    let dir = workdir_with(None);
    let stderr = failing_stderr(&dir);
    assert!(stderr.contains("error: load:"), "{stderr}");
    assert!(stderr.contains("cannot read results.csv"), "{stderr}");
}

#[test]
fn non_numeric_shared_value_is_malformed() {
    let dir = workdir_with(Some(
        "size,raw,unique,shared\n10,5.0,6.0,7.0\n20,9.0,11.0,abc\n",
    ));
    let stderr = failing_stderr(&dir);
    assert!(stderr.contains("error: load: malformed data"), "{stderr}");
    assert!(stderr.contains("column 'shared'"), "{stderr}");
    assert!(stderr.contains("line 3"), "{stderr}");
}

#[test]
fn header_only_file_is_malformed() {
    let dir = workdir_with(Some("size,raw,unique,shared\n"));
    let stderr = failing_stderr(&dir);
    assert!(stderr.contains("no data rows"), "{stderr}");
}

#[test]
fn missing_required_column_is_malformed() {
    let dir = workdir_with(Some("size,raw,shared\n10,5,7\n"));
    let stderr = failing_stderr(&dir);
    assert!(stderr.contains("column 'unique' not found"), "{stderr}");
}

#[test]
fn rejects_unexpected_arguments() {
    let dir = workdir_with(None);
    cargo_bin_cmd!("ptrplot")
        .current_dir(dir.path())
        .arg("other.csv")
        .assert()
        .failure();
}

#[test]
fn prints_version() {
    let output = cargo_bin_cmd!("ptrplot")
        .arg("--version")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8_lossy(&output).starts_with("ptrplot "));
}

#[test]
fn unplottable_extent_fails_at_load() {
    let dir = workdir_with(Some("size,raw,unique,shared\n10,-1e308,1e308,1\n"));
    let stderr = failing_stderr(&dir);
    assert!(stderr.contains("error: load: malformed data"), "{stderr}");
    assert!(stderr.contains("too wide to plot"), "{stderr}");
}
