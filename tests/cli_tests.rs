//! End-to-end tests of the brdomains binary

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const UNREACHABLE: &str = "http://127.0.0.1:9/dominio/categorias/";

fn brdomains() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_brdomains"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Suffix CSV and input text in a fresh directory
fn fixture(dir: &Path, input: &str) -> (PathBuf, PathBuf) {
    let tlds = dir.join("tlds.csv");
    fs::write(&tlds, "tld\ncom.br\ngov.br\n").unwrap();
    let text = dir.join("in.txt");
    fs::write(&text, input).unwrap();
    (tlds, text)
}

fn filter_cmd(tlds: &Path, text: &Path) -> Command {
    let mut cmd = brdomains();
    cmd.arg("filter")
        .arg("--tld-csv")
        .arg(tlds)
        .arg("--input-filename")
        .arg(text);
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_filter_prints_domains() {
    let dir = tempfile::tempdir().unwrap();
    let (tlds, text) = fixture(dir.path(), "Acesse www.loja.com.br\n\nou .gov.br\n");

    let output = filter_cmd(&tlds, &text).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "loja.com.br\n");
    assert!(!stderr(&output).contains("INFO"), "stderr: {}", stderr(&output));
}

#[test]
fn test_filter_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let (tlds, _) = fixture(dir.path(), "");

    let mut child = brdomains()
        .arg("filter")
        .arg("--tld-csv")
        .arg(&tlds)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all("portal.gov.br e a.com.br\n".as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "portal.gov.br\na.com.br\n");
}

#[test]
fn test_missing_input_file_exits_with_status_1() {
    let dir = tempfile::tempdir().unwrap();
    let (tlds, _) = fixture(dir.path(), "");
    let missing = dir.path().join("nao-existe.txt");

    let output = filter_cmd(&tlds, &missing).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("not found"), "stderr: {}", stderr(&output));
}

#[test]
fn test_rust_log_sets_level() {
    let dir = tempfile::tempdir().unwrap();
    let (tlds, text) = fixture(dir.path(), "a.com.br\n");

    let output = filter_cmd(&tlds, &text)
        .env("RUST_LOG", "debug")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "a.com.br\n");
    assert!(
        stderr(&output).contains("Compiling domain pattern"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_log_level_flag_overrides_rust_log() {
    let dir = tempfile::tempdir().unwrap();
    let (tlds, text) = fixture(dir.path(), "a.com.br\n");

    let output = filter_cmd(&tlds, &text)
        .env("RUST_LOG", "debug")
        .args(["--log-level", "error"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!stderr(&output).contains("DEBUG"), "stderr: {}", stderr(&output));

    let output = filter_cmd(&tlds, &text)
        .args(["--log-level", "debug"])
        .output()
        .unwrap();
    assert!(stderr(&output).contains("DEBUG"), "stderr: {}", stderr(&output));
}

#[test]
fn test_tld_csv_and_cache_dir_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let (tlds, text) = fixture(dir.path(), "a.com.br\n");

    let output = filter_cmd(&tlds, &text)
        .arg("--cache-dir")
        .arg(dir.path().join("cache"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_download_failure_exits_with_status_1() {
    let dir = tempfile::tempdir().unwrap();
    let output_csv = dir.path().join("tlds.csv");

    let output = brdomains()
        .args(["download", "--print-regexp", "--url", UNREACHABLE])
        .arg(&output_csv)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(!output_csv.exists());
}
