//! CLI integration tests
//!
//! These tests verify the command-line interface behavior, including:
//! - Command parsing
//! - Output formatting
//! - Exit codes
#![cfg(unix)]

mod support;

use confprobe::probe::cache_key::args_hash;
use std::path::Path;
use std::process::{Command, Output};
use support::{get_confprobe_binary, write_fake_curl_config, write_tool};
use tempfile::TempDir;

/// Runs confprobe with a scrubbed `CONFPROBE_*` environment
fn confprobe(dir: &Path, args: &[&str]) -> Output {
    Command::new(get_confprobe_binary())
        .args(args)
        .env("CONFPROBE_CACHE_DIR", dir.join("sconf"))
        .env_remove("CONFPROBE_CURL_CONFIG")
        .env_remove("CURL")
        .env_remove("CONFPROBE_DPKG_ARCHITECTURE")
        .env_remove("CONFPROBE_CACHE_MODE")
        .env_remove("CONFPROBE_MEMOIZE")
        .env_remove("CONFPROBE_LOG_FILE")
        .env_remove("CONFPROBE_LOG_LEVEL")
        .env_remove("CONFPROBE_LOG_JSON")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute confprobe")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = confprobe(dir.path(), &["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("curl-prefix"));
    assert!(text.contains("deb-arch"));
}

#[test]
fn test_key_prints_cache_path() {
    let dir = TempDir::new().unwrap();
    let output = confprobe(dir.path(), &["key", "/usr/bin/curl-config", "--libs"]);

    assert!(output.status.success());
    let expected = dir
        .path()
        .join("sconf")
        .join(format!("curl-config-{}.out", args_hash("--libs")));
    assert_eq!(stdout(&output), expected.display().to_string());
}

#[test]
fn test_curl_prefix_uses_configured_program() {
    let dir = TempDir::new().unwrap();
    let tool = write_fake_curl_config(&dir.path().join("bin"));

    let output = Command::new(get_confprobe_binary())
        .args(["curl-prefix"])
        .env("CONFPROBE_CACHE_DIR", dir.path().join("sconf"))
        .env("CURL", &tool)
        .env_remove("CONFPROBE_CURL_CONFIG")
        .env_remove("CONFPROBE_CACHE_MODE")
        .env_remove("CONFPROBE_LOG_FILE")
        .output()
        .expect("Failed to execute confprobe");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "CURL_PREFIX = /opt/curl");
    assert!(dir.path().join("sconf").join("config.log").is_file());
}

#[test]
fn test_run_json_output() {
    let dir = TempDir::new().unwrap();
    let tool = write_tool(&dir.path().join("bin"), "uname-ish", "echo ' x86_64 '");
    let tool_arg = tool.display().to_string();

    let output = confprobe(dir.path(), &["run", &tool_arg, "-m", "--format", "json"]);

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["output"], "x86_64");
}

#[test]
fn test_run_missing_program_exits_one() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("bin").join("nothing-here");
    let missing_arg = missing.display().to_string();

    let output = confprobe(dir.path(), &["run", &missing_arg, "--prefix"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).ends_with(": check failed"));
}

#[test]
fn test_deb_arch_not_on_path_exits_one() {
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty");
    std::fs::create_dir_all(&empty).unwrap();

    let output = Command::new(get_confprobe_binary())
        .args(["deb-arch", "--format", "json"])
        .env("CONFPROBE_CACHE_DIR", dir.path().join("sconf"))
        .env("PATH", &empty)
        .env_remove("CONFPROBE_DPKG_ARCHITECTURE")
        .env_remove("CONFPROBE_CACHE_MODE")
        .env_remove("CONFPROBE_LOG_FILE")
        .output()
        .expect("Failed to execute confprobe");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["check"], "DEB_BUILD_ARCH");
    assert_eq!(value["success"], false);
    assert_eq!(value["output"], "");

    let log = std::fs::read_to_string(dir.path().join("sconf").join("config.log")).unwrap();
    assert!(log.contains("dpkg-architecture not found"));
}

#[test]
fn test_invalid_log_level_is_config_error() {
    let dir = TempDir::new().unwrap();
    let output = confprobe(dir.path(), &["--log-level", "chatty", "config"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
}

#[test]
fn test_config_json_reflects_flags() {
    let dir = TempDir::new().unwrap();
    let output = confprobe(
        dir.path(),
        &["config", "--format", "json", "--mode", "cached", "--no-memo"],
    );

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["cache_mode"], "cached");
    assert_eq!(value["memoize"], false);
    assert_eq!(
        value["cache_dir"],
        dir.path().join("sconf").display().to_string()
    );
}

#[test]
fn test_run_on_path_honors_key() {
    let dir = TempDir::new().unwrap();
    let bin = dir.path().join("bin");
    write_tool(&bin, "arch-ish", "echo riscv64");

    let output = Command::new(get_confprobe_binary())
        .args(["run", "--on-path", "--key", "host", "arch-ish"])
        .env("CONFPROBE_CACHE_DIR", dir.path().join("sconf"))
        .env("PATH", &bin)
        .env_remove("CONFPROBE_CACHE_MODE")
        .env_remove("CONFPROBE_LOG_FILE")
        .output()
        .expect("Failed to execute confprobe");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "arch-ish = riscv64");
    assert!(dir.path().join("sconf").join("arch-ish-host.out").is_file());
}

#[test]
fn test_invalid_cache_mode_env_exits_two() {
    let dir = TempDir::new().unwrap();
    let tool = write_fake_curl_config(&dir.path().join("bin"));

    let output = Command::new(get_confprobe_binary())
        .args(["curl-prefix"])
        .env("CONFPROBE_CACHE_DIR", dir.path().join("sconf"))
        .env("CURL", &tool)
        .env("CONFPROBE_CACHE_MODE", "cahced")
        .env_remove("CONFPROBE_CURL_CONFIG")
        .env_remove("CONFPROBE_LOG_FILE")
        .output()
        .expect("Failed to execute confprobe");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cahced"));
    assert_eq!(support::run_count(&dir.path().join("bin")), 0);
}

#[test]
fn test_key_rejects_separator_in_override() {
    let dir = TempDir::new().unwrap();
    let output = confprobe(
        dir.path(),
        &["key", "--key", "../../escape", "curl-config", "--prefix"],
    );

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_log_level_env_controls_tracing() {
    let dir = TempDir::new().unwrap();

    let quiet = confprobe(dir.path(), &["config"]);
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("starting"));

    let output = Command::new(get_confprobe_binary())
        .args(["config"])
        .env("CONFPROBE_CACHE_DIR", dir.path().join("sconf"))
        .env("CONFPROBE_LOG_LEVEL", "debug")
        .env_remove("CONFPROBE_CACHE_MODE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute confprobe");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("starting"));
}
