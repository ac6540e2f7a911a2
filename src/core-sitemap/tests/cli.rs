//! Tests for the `xl2sitemap` binary's exit status and diagnostics

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rust_xlsxwriter::Workbook;

fn write_workbook(path: &Path, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet.write_string(r as u32, c as u16, *value).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

/// Runs the binary inside `dir`, isolated from the caller's environment defaults.
fn xl2sitemap(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xl2sitemap"))
        .args(args)
        .current_dir(dir)
        .env_remove("XL2SITEMAP_MAX_URLS")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_success_writes_sitemaps_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    write_workbook(&dir.path().join("urls.xlsx"), &[&["url"], &["https://example.com/"]]);
    fs::create_dir(dir.path().join("out")).unwrap();

    let output = xl2sitemap(dir.path(), &["urls.xlsx", "-o", "out"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Generated 1 sitemap(s)"));
    assert!(dir.path().join("out/sitemap-1.xml").is_file());
    assert!(dir.path().join("out/sitemap-1.xml.gz").is_file());
    assert!(dir.path().join("out/List-of-sitemaps-generated.xlsx").is_file());
}

#[test]
fn test_garbage_workbook_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("garbage.xlsx"), b"this is not a zip archive").unwrap();

    let output = xl2sitemap(dir.path(), &["garbage.xlsx"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("ERROR: Cannot load garbage.xlsx"), "stderr: {err}");
    assert!(err.contains("Cannot read workbook"), "stderr: {err}");
    assert!(!dir.path().join("sitemap-1.xml").exists());
}

#[test]
fn test_missing_url_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_workbook(&dir.path().join("no-url.xlsx"), &[&["link"], &["https://example.com/"]]);

    let output = xl2sitemap(dir.path(), &["no-url.xlsx"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("missing the required 'url' column"), "stderr: {err}");
}

#[test]
fn test_zero_maxurls_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_workbook(&dir.path().join("urls.xlsx"), &[&["url"], &["https://example.com/"]]);

    for value in ["0", "-5"] {
        let output = xl2sitemap(dir.path(), &["urls.xlsx", "-m", value]);

        assert!(!output.status.success(), "-m {value}");
        let err = stderr(&output);
        assert!(err.contains("Invalid maximum URLs per file"), "stderr: {err}");
    }
    assert!(!dir.path().join("sitemap-1.xml").exists());
}

#[test]
fn test_zero_maxurls_from_env_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_workbook(&dir.path().join("urls.xlsx"), &[&["url"], &["https://example.com/"]]);

    let output = Command::new(env!("CARGO_BIN_EXE_xl2sitemap"))
        .arg("urls.xlsx")
        .current_dir(dir.path())
        .env("XL2SITEMAP_MAX_URLS", "0")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("XL2SITEMAP_MAX_URLS must be a positive number"), "stderr: {err}");
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = xl2sitemap(dir.path(), &["nope.xlsx"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Input path does not exist"));
}
