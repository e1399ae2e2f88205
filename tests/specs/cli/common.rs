// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use serde_json::Value;
pub use tempfile::TempDir;

/// A throwaway host: config file plus data directory in one temp dir.
pub struct Host {
    pub temp: TempDir,
    pub config: PathBuf,
}

impl Host {
    /// Host with no remote configured.
    pub fn local() -> Self {
        Self::with_config("")
    }

    /// Host pointed at `remote_url`.
    pub fn remote(remote_url: &str) -> Self {
        Self::with_config(&format!(
            "remote_url = \"{remote_url}\"\nhealth_timeout_secs = 1\nrequest_timeout_secs = 2\n"
        ))
    }

    pub fn with_config(extra: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, format!("data_dir = \"data\"\n{extra}")).unwrap();
        Host { temp, config }
    }

    /// `tock --config <this host's config>`.
    pub fn tock(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("tock");
        cmd.arg("--config").arg(&self.config).env_remove("RUST_LOG");
        cmd
    }

    /// Run `tock add` and return the printed entity.
    pub fn add(&self, kind: &str, fields: &[&str]) -> Value {
        let output = self
            .tock()
            .arg("add")
            .arg(kind)
            .args(fields)
            .output()
            .unwrap();
        assert!(output.status.success(), "add failed: {output:?}");
        serde_json::from_slice(&output.stdout).unwrap()
    }

    /// Run `tock list` and parse each line.
    pub fn list(&self, kind: &str) -> Vec<Value> {
        let output = self.tock().arg("list").arg(kind).output().unwrap();
        assert!(output.status.success(), "list failed: {output:?}");
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    pub fn id_of(entity: &Value) -> String {
        entity["id"].as_str().unwrap().to_string()
    }
}
