use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    let mut c = Command::new(assert_cmd::cargo::cargo_bin!("namedup"));
    c.env_remove("GEMINI_API_KEY");
    c
}

/// Single file to stdout produces the duplicates table.
#[test]
fn test_cli_single_file_stdout() {
    cmd()
        .arg("tests/fixtures/roster.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Name | Count |"))
        .stdout(predicate::str::contains("| Alice | 3 |"))
        .stdout(predicate::str::contains("| bob | 2 |"))
        .stdout(predicate::str::contains("| 김민준 | 2 |"))
        .stdout(predicate::str::contains("Carol").not());
}

/// CSV input reports duplicates from the first column.
#[test]
fn test_cli_csv_file() {
    cmd()
        .arg("tests/fixtures/roster.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Alice | 2 |"))
        .stdout(predicate::str::contains("Bob").not());
}

/// Multiple files produce per-file headings.
#[test]
fn test_cli_multiple_files_with_headings() {
    cmd()
        .args(["tests/fixtures/roster.txt", "tests/fixtures/roster.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# tests/fixtures/roster.txt"))
        .stdout(predicate::str::contains("# tests/fixtures/roster.csv"));
}

/// Output to file with -o flag.
#[test]
fn test_cli_output_to_file() {
    let out = NamedTempFile::new().unwrap();
    let out_path = out.path().to_str().unwrap().to_string();

    cmd()
        .args(["tests/fixtures/roster.txt", "-o", &out_path])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&out_path).unwrap();
    assert!(content.contains("| Alice | 3 |"));
}

/// Stdin with --format flag.
#[test]
fn test_cli_stdin_with_format() {
    cmd()
        .args(["--format", "txt"])
        .write_stdin("Ann\nann\nBo\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Ann | 2 |"));
}

/// A clean list prints the placeholder, not an error.
#[test]
fn test_cli_no_duplicates_placeholder() {
    cmd()
        .args(["--format", "txt"])
        .write_stdin("Ann\nBo\nCy\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates found."));
}

/// --json emits the data shape.
#[test]
fn test_cli_json_output() {
    let output = cmd()
        .args(["--json", "--format", "txt"])
        .write_stdin("Ann\nann\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["data"][0]["name"], "Ann");
    assert_eq!(value["data"][0]["count"], 2);
}

/// --json on empty input emits the error shape and exits 1.
#[test]
fn test_cli_json_error_shape() {
    let output = cmd()
        .args(["--json", "--format", "txt"])
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["error"], "file content is empty");
    assert!(value.get("data").is_none());
}

/// --format overrides file extension detection.
#[test]
fn test_cli_format_override_on_file() {
    let mut tmp = NamedTempFile::with_suffix(".dat").unwrap();
    write!(tmp, "Ann,1\nann,2\n").unwrap();

    cmd()
        .args(["--format", "csv", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Ann | 2 |"));
}

/// Empty file produces exit code 1 and an error message.
#[test]
fn test_cli_empty_file_exit_1() {
    let tmp = NamedTempFile::with_suffix(".txt").unwrap();

    cmd()
        .arg(tmp.path().to_str().unwrap())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file content is empty"));
}

/// Missing file produces exit code 1.
#[test]
fn test_cli_missing_file_exit_1() {
    cmd()
        .arg("nonexistent_roster.txt")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: nonexistent_roster.txt"));
}

/// Stdin without --format produces exit code 2.
#[test]
fn test_cli_stdin_without_format_exit_2() {
    cmd()
        .write_stdin("Ann\n")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--format is required"));
}

/// Unsupported format produces exit code 1.
#[test]
fn test_cli_unsupported_format_exit_1() {
    cmd()
        .args(["--format", "zzz"])
        .write_stdin("data")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unsupported format"));
}

/// --matcher gemini without an API key produces exit code 2.
#[test]
fn test_cli_gemini_matcher_without_key_exit_2() {
    cmd()
        .args(["--matcher", "gemini", "tests/fixtures/roster.txt"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

/// --strict flag is accepted on clean input.
#[test]
fn test_cli_strict_flag() {
    cmd()
        .args(["--strict", "tests/fixtures/roster.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Alice | 3 |"));
}

/// Multiple files where one is missing: partial success with exit code 1.
#[test]
fn test_cli_partial_failure_multiple_files() {
    cmd()
        .args(["tests/fixtures/roster.txt", "nonexistent.txt"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("| Alice | 3 |"))
        .stderr(predicate::str::contains("error: nonexistent.txt"));
}

/// --version flag shows version.
#[test]
fn test_cli_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// --help flag shows usage.
#[test]
fn test_cli_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--matcher"));
}
