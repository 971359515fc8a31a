//! Integration tests: run the demo binary end to end

use std::process::Command;

fn waterfall() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_waterfall"));
    // Keep user config and env out of the run
    command
        .env_remove("WATERFALL_CONFIG")
        .env_remove("WATERFALL_COLUMNS")
        .env_remove("WATERFALL_WIDTH")
        .arg("--config")
        .arg(std::env::temp_dir().join("waterfall_cli_test_missing.toml"));
    command
}

fn log_file(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join("waterfall_cli_test_logs").join(name)
}

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_waterfall"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        stdout.contains("0.1.0"),
        "Expected output to contain version '0.1.0', but got: {}",
        stdout
    );
}

#[test]
fn json_report_for_worked_example() {
    let output = waterfall()
        .args(["-c", "2", "-p", "0", "-w", "200"])
        .args(["--heights", "100,130,160,100"])
        .args(["--viewport", "0,120,200,20", "-i", "3", "-i", "9", "--json"])
        .arg("--log-file")
        .arg(log_file("json.log"))
        .output()
        .expect("Failed to execute binary");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");

    assert_eq!(report["item_count"], 4);
    assert_eq!(report["content_size"]["height"], 260.0);

    let visible: Vec<u64> = report["visible"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["index"].as_u64().unwrap())
        .collect();
    assert_eq!(visible, vec![1, 2, 3]);

    assert_eq!(report["lookups"][0]["placement"]["frame"]["x"], 100.0);
    assert_eq!(report["lookups"][0]["placement"]["frame"]["y"], 130.0);
    assert!(report["lookups"][1]["placement"].is_null());
}

#[test]
fn text_report_lists_visible_items() {
    let output = waterfall()
        .args(["-c", "2", "-p", "0", "-w", "200", "--heights", "100,130,160,100"])
        .arg("--log-file")
        .arg(log_file("text.log"))
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("items: 4"), "got: {stdout}");
    assert!(stdout.contains("(4 visible)"), "got: {stdout}");
}

#[test]
fn zero_columns_exits_with_error() {
    let output = waterfall()
        .args(["-c", "0"])
        .arg("--log-file")
        .arg(log_file("zero.log"))
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.to_lowercase().contains("column"), "got: {stderr}");
}

#[test]
fn unparsable_env_override_exits_with_error() {
    let output = waterfall()
        .env("WATERFALL_COLUMNS", "many")
        .arg("--log-file")
        .arg(log_file("env.log"))
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WATERFALL_COLUMNS"), "got: {stderr}");
    assert!(stderr.contains("many"), "got: {stderr}");
}
