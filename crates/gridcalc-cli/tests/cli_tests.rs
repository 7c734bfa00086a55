// End-to-end tests for the `gridcalc` binary.
// Run with: cargo test -p gridcalc-cli --test cli_tests

use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

fn gridcalc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gridcalc"))
}

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create script");
    file.write_all(source.as_bytes()).expect("write script");
    file
}

fn run_file(source: &str, args: &[&str]) -> Output {
    let file = script(source);
    gridcalc()
        .arg(file.path())
        .args(args)
        .output()
        .expect("run gridcalc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_script_file_with_value_dump() {
    let output = run_file(
        "# totals\nset A1 =B1+1\nset B1 5\n\nset B2 =A1*B1\nset A2 '=not a formula\n",
        &["--dump", "values"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "6\t5\n=not a formula\t30\n");
}

#[test]
fn test_text_dump_shows_canonical_formulas() {
    let output = run_file("set A1 = ( 1 + 2 ) * B1\nset B1 0.5\n", &["--dump", "texts"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "=(1+2)*B1\t0.5\n");
}

#[test]
fn test_failures_are_reported_and_run_continues() {
    let output = run_file(
        "set A1 =B1\nset B1 =A1\nset C1 =1+\nset B1 4\nvalue A1\n",
        &[],
    );
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "4\n");

    let err = stderr(&output);
    assert!(err.contains("line 2"), "stderr: {}", err);
    assert!(err.contains("line 3"), "stderr: {}", err);
    assert!(err.contains("2 line(s) failed"), "stderr: {}", err);
}

#[test]
fn test_fail_fast() {
    let output = run_file("set A1 1\nset A1 =A1\nvalue A1\n", &["--fail-fast"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("line 2"));
}

#[test]
fn test_reads_script_from_stdin() {
    let mut child = gridcalc()
        .args(["--dump", "values"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn gridcalc");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"set B2 =1/0\nset A1 =Z9\nsize\n")
        .expect("write stdin");

    let output = child.wait_with_output().expect("wait for gridcalc");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "2 2\n0\t\n\t#DIV/0!\n");
}

#[test]
fn test_missing_script_file() {
    let output = gridcalc()
        .arg("/nonexistent/gridcalc-script.txt")
        .output()
        .expect("run gridcalc");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read"));
}
