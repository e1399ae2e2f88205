// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Host configuration.
//!
//! Stored as TOML in `<config_dir>/tock/config.toml` unless `--config` names
//! another file. Every key is optional:
//! - `remote_url`: REST API base URL (absent = local-only mode, changes queue)
//! - `data_dir`: directory holding `tock.db`
//! - `poll_interval_secs`, `health_timeout_secs`, `request_timeout_secs`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tock_sync::{
    SyncConfig, DEFAULT_HEALTH_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "tock";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "tock.db";

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the remote REST API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    /// Directory for the database (absolute, or relative to the config file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_health_timeout_secs() -> u64 {
    DEFAULT_HEALTH_TIMEOUT_SECS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote_url: None,
            data_dir: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults. A relative `data_dir` is resolved
    /// against the directory containing the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut config = Config::parse(&content).map_err(|e| match e {
            Error::Config(message) => Error::Config(format!("{}: {message}", path.display())),
            other => other,
        })?;

        if let Some(data_dir) = config.data_dir.as_mut() {
            if data_dir.is_relative() {
                if let Some(parent) = path.parent() {
                    *data_dir = parent.join(&*data_dir);
                }
            }
        }
        Ok(config)
    }

    /// Parse and validate TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.remote_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "invalid remote_url '{url}': must start with http:// or https://"
                )));
            }
        }
        for (key, value) in [
            ("poll_interval_secs", self.poll_interval_secs),
            ("health_timeout_secs", self.health_timeout_secs),
            ("request_timeout_secs", self.request_timeout_secs),
        ] {
            if value == 0 {
                return Err(Error::Config(format!("{key} must be greater than 0")));
            }
        }
        Ok(())
    }

    /// Directory holding the database.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or_else(|| Error::Config("cannot determine data directory".to_string())),
        }
    }

    /// Path to the SQLite database shared by the local store and the queue.
    pub fn db_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(DB_FILE_NAME))
    }

    /// Settings for the orchestrator and the HTTP remote.
    pub fn sync_config(&self) -> Option<SyncConfig> {
        let base_url = self.remote_url.clone()?;
        Some(SyncConfig {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            health_timeout: Duration::from_secs(self.health_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..SyncConfig::new(base_url)
        })
    }

    /// Poll interval, also used when no remote is configured.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Default location of the config file.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| Error::Config("cannot determine config directory".to_string()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
