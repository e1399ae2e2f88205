// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for config file handling.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use yare::parameterized;

#[test]
fn data_dir_is_relative_to_config_file() {
    let host = Host::local();
    host.add("tag", &["name=Work"]);
    assert!(host.temp.path().join("data").join("tock.db").exists());
}

#[test]
fn missing_config_file_uses_defaults_elsewhere() {
    let temp = TempDir::new().unwrap();
    let host = Host {
        config: temp.path().join("nowhere.toml"),
        temp,
    };
    // Defaults point at the user's data dir; only check the file is optional
    host.tock().arg("--help").assert().success();
}

#[parameterized(
    bad_url = { "remote_url = \"ws://example.com\"", "remote_url" },
    zero_poll = { "poll_interval_secs = 0", "poll_interval_secs" },
    unknown_key = { "colour = \"red\"", "colour" },
)]
fn invalid_config_is_reported(content: &str, expected: &str) {
    let host = Host::with_config(content);
    host.tock()
        .args(["list", "tag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"))
        .stderr(predicate::str::contains(expected));
}
