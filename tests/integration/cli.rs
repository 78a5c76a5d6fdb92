//! End-to-end runs of the trellis binary

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const SITE: &str = r#"
[site]
name = "shop"

[site.remember]
session = "anonymous"
status-message = "Welcome back"

[site.slots]
title = "Front page"
"#;

fn workspace_with_config() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("ws").join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::create_dir_all(temp_dir.path().join("home")).unwrap();
    fs::write(config_dir.join("config.toml"), SITE).unwrap();
    temp_dir
}

fn run(temp_dir: &TempDir, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_trellis");
    Command::new(bin)
        .env("HOME", temp_dir.path().join("home"))
        .env("XDG_CONFIG_HOME", temp_dir.path().join("xdg"))
        .env_remove("TRELLIS_ENV")
        .env_remove("TRELLIS_LOG")
        .env_remove("TRELLIS__SITE__NAME")
        .arg("--workspace")
        .arg(temp_dir.path().join("ws"))
        .arg("--quiet")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_show_json() {
    let temp_dir = workspace_with_config();
    let output = run(&temp_dir, &["show", "--format", "json"]);
    assert!(
        output.status.success(),
        "show should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["name"], "shop");
    assert_eq!(json["kind"], "site");
    assert_eq!(json["remembered"]["session"], "anonymous");
    assert_eq!(json["slots"]["title"], "Front page");
}

#[test]
fn test_show_text_table() {
    let temp_dir = workspace_with_config();
    let output = run(&temp_dir, &["show"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Site: shop (site)"));
    assert!(text.contains("status-message"));
    assert!(text.contains("Welcome back"));
}

#[test]
fn test_locate_and_slot() {
    let temp_dir = workspace_with_config();

    let output = run(&temp_dir, &["locate", "session"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "anonymous");

    let output = run(&temp_dir, &["locate", "session", "--depth", "-1"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "anonymous");

    let output = run(&temp_dir, &["slot", "title"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Front page");
}

#[test]
fn test_missing_capability_exits_nonzero() {
    let temp_dir = workspace_with_config();
    let output = run(&temp_dir, &["locate", "hand"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("capability 'hand' is not remembered"),
        "unexpected stderr: {}",
        stderr
    );

    let output = run(&temp_dir, &["slot", "footer"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("slot 'footer' is not filled"));
}

#[test]
fn test_explicit_config_file() {
    let temp_dir = workspace_with_config();
    let file = temp_dir.path().join("other.toml");
    fs::write(&file, "[site]\nname = \"other\"\n").unwrap();

    let output = run(
        &temp_dir,
        &["--config", file.to_str().unwrap(), "show", "--format", "toml"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("name = \"other\""));
}

#[test]
fn test_logging_to_file() {
    let temp_dir = workspace_with_config();
    let log_file = temp_dir.path().join("logs").join("trellis.log");
    let bin = env!("CARGO_BIN_EXE_trellis");
    let output = Command::new(bin)
        .env("HOME", temp_dir.path().join("home"))
        .env("XDG_CONFIG_HOME", temp_dir.path().join("xdg"))
        .env_remove("TRELLIS_LOG")
        .env_remove("TRELLIS_LOG_OUTPUT")
        .arg("--workspace")
        .arg(temp_dir.path().join("ws"))
        .arg("--log-file")
        .arg(&log_file)
        .arg("show")
        .output()
        .unwrap();

    assert!(output.status.success());
    let content = fs::read_to_string(&log_file).unwrap();
    assert!(content.contains("Trellis CLI starting"), "log content: {}", content);
}
