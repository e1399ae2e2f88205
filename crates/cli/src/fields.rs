// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `key=value` argument parsing.

use serde_json::Value;
use tock_core::Fields;

use crate::error::{Error, Result};

/// Parse `key=value` pairs into a field map.
///
/// Values are read as JSON when they parse (`3`, `true`, `null`, `[1]`),
/// otherwise kept as strings. Later duplicates win.
pub fn parse_assignments(args: &[String]) -> Result<Fields> {
    let mut fields = Fields::new();
    for arg in args {
        let (key, raw) = arg
            .split_once('=')
            .ok_or_else(|| Error::InvalidField(arg.clone()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidField(arg.clone()));
        }
        fields.insert(key.to_string(), parse_value(raw));
    }
    Ok(fields)
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
