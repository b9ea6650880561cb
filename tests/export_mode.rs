//! Integration tests for export mode (-o/--output flag)

use std::path::PathBuf;
use std::process::Command;

fn run_gridedit(args: &[&str]) -> (String, String, i32) {
    let log_dir = std::env::temp_dir().join("gridedit_export_logs");
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        .arg("--log-file")
        .arg(&log_dir)
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(name)
}

#[test]
fn test_export_default_rows() {
    let out = temp_path("gridedit_export_default.tsv");
    let out_str = out.to_string_lossy().to_string();

    let (stdout, _, code) = run_gridedit(&["-o", &out_str]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Exported to"));

    let written = std::fs::read_to_string(&out).expect("export written");
    assert_eq!(written, "\t行1\t20\n\t行2\t40\n\t行3\t60\n");

    let _ = std::fs::remove_file(&out);
}

#[test]
fn test_import_then_export_keeps_rows() {
    let input = temp_path("gridedit_export_input.tsv");
    let out = temp_path("gridedit_export_roundtrip.tsv");
    std::fs::write(&input, "2024-01-01\tLaunch\t5\r\n2024-02-01\tReview\tlots\r\n").unwrap();

    let input_str = input.to_string_lossy().to_string();
    let out_str = out.to_string_lossy().to_string();
    let (_, _, code) = run_gridedit(&[input_str.as_str(), "-o", out_str.as_str()]);
    assert_eq!(code, 0);

    let written = std::fs::read_to_string(&out).expect("export written");
    // A non-numeric count keeps the fresh row's zero.
    assert_eq!(written, "2024-01-01\tLaunch\t5\n2024-02-01\tReview\t0\n");

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&out);
}

#[test]
fn test_missing_input_file_fails() {
    let out = temp_path("gridedit_export_never.tsv");
    let out_str = out.to_string_lossy().to_string();
    let (_, stderr, code) = run_gridedit(&[
        "/nonexistent/gridedit/input.tsv",
        "-o",
        out_str.as_str(),
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Error: failed to load"));
}

#[test]
fn test_empty_input_file_fails() {
    let input = temp_path("gridedit_export_empty.tsv");
    std::fs::write(&input, "").unwrap();
    let out = temp_path("gridedit_export_empty_out.tsv");

    let input_str = input.to_string_lossy().to_string();
    let out_str = out.to_string_lossy().to_string();
    let (_, stderr, code) = run_gridedit(&[input_str.as_str(), "-o", out_str.as_str()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("file is empty"));

    let _ = std::fs::remove_file(&input);
}

#[test]
fn test_unknown_option_prints_usage() {
    let (_, stderr, code) = run_gridedit(&["--bogus"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option: --bogus"));
    assert!(stderr.contains("Usage: gridedit"));
}
