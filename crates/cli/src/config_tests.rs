// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.poll_interval_secs, 30);
    assert!(config.sync_config().is_none());
}

#[test]
fn test_full_config() {
    let config = Config::parse(
        r#"
remote_url = "https://todo.example.com/api"
data_dir = "/var/lib/tock"
poll_interval_secs = 5
health_timeout_secs = 1
request_timeout_secs = 4
"#,
    )
    .unwrap();

    assert_eq!(config.db_path().unwrap(), PathBuf::from("/var/lib/tock/tock.db"));
    let sync = config.sync_config().unwrap();
    assert_eq!(sync.base_url, "https://todo.example.com/api");
    assert_eq!(sync.poll_interval, Duration::from_secs(5));
    assert_eq!(sync.health_timeout, Duration::from_secs(1));
    assert_eq!(sync.request_timeout, Duration::from_secs(4));
}

#[parameterized(
    bad_scheme = { "remote_url = \"ws://example.com\"" },
    zero_poll = { "poll_interval_secs = 0" },
    zero_health = { "health_timeout_secs = 0" },
    zero_request = { "request_timeout_secs = 0" },
    unknown_key = { "remote = \"http://example.com\"" },
    wrong_type = { "poll_interval_secs = \"soon\"" },
)]
fn test_invalid_config(content: &str) {
    let err = Config::parse(content).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load(Some(&temp.path().join("absent.toml"))).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_relative_data_dir_resolves_against_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "data_dir = \"state\"\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.data_dir().unwrap(), temp.path().join("state"));
}

#[test]
fn test_load_reports_file_in_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "poll_interval_secs = 0\n").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_default_config_path_ends_with_app_dir() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("tock/config.toml"));
    }
}
