#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the CLI binary starts correctly and
//! rejects bad setup before any network traffic happens.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the developer's config, `.env` and API key.
#[allow(deprecated)]
fn gemini_chat(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gemini-chat").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("GOOGLE_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let dir = TempDir::new().unwrap();
    gemini_chat(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chat with Google Gemini"))
        .stdout(predicate::str::contains("--temperature"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--max-retries"));
}

#[test]
fn test_version_displays_version() {
    let dir = TempDir::new().unwrap();
    gemini_chat(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_models_lists_supported_models() {
    let dir = TempDir::new().unwrap();
    gemini_chat(&dir)
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-1.5-flash"))
        .stdout(predicate::str::contains("gemini-1.0-pro"));
}

#[test]
fn test_missing_api_key_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    gemini_chat(&dir)
        .args(["--temperature", "0.5"])
        .write_stdin("hello\n")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("GOOGLE_API_KEY"));
}

#[test]
fn test_blank_api_key_counts_as_missing() {
    let dir = TempDir::new().unwrap();
    gemini_chat(&dir)
        .env("GOOGLE_API_KEY", "   ")
        .write_stdin("")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("API key not found"));
}

#[test]
fn test_out_of_range_temperature_rejected() {
    let dir = TempDir::new().unwrap();
    gemini_chat(&dir)
        .env("GOOGLE_API_KEY", "test-key")
        .args(["--temperature", "1.5"])
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Temperature must be between 0 and 1"));
}

#[test]
fn test_unsupported_model_rejected() {
    let dir = TempDir::new().unwrap();
    gemini_chat(&dir)
        .env("GOOGLE_API_KEY", "test-key")
        .args(["chat", "--model", "bogus-model"])
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Unsupported model"));
}

#[test]
fn test_zero_max_retries_rejected() {
    let dir = TempDir::new().unwrap();
    gemini_chat(&dir)
        .env("GOOGLE_API_KEY", "test-key")
        .args(["--max-retries", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_retries must be at least 1"));
}

#[test]
fn test_malformed_config_file_reported() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("gemini-chat");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[chat\nmodel = ").unwrap();

    gemini_chat(&dir)
        .arg("models")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_configure_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("gemini-chat");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[chat]\nmodel = \"gemini-1.5-pro\"\ntemperature = 0.2\n",
    )
    .unwrap();

    gemini_chat(&dir)
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-1.5-pro"))
        .stdout(predicate::str::contains("0.2"))
        .stdout(predicate::str::contains("(not set)"));
}
