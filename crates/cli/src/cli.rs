// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tock_core::EntityKind;

/// Parse an entity kind (`tag`, `todo`, or their plurals).
fn parse_kind(s: &str) -> Result<EntityKind, String> {
    s.parse::<EntityKind>()
        .map_err(|_| format!("unknown kind '{s}' (expected tag or todo)"))
}

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser, Debug)]
#[command(name = "tock")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Local-first tags and todos with offline sync")]
#[command(
    long_about = "Local-first tags and todos with offline sync.\n\n\
    Writes always land in the local database first. When the remote is \
    unreachable they are queued and replayed once it comes back."
)]
pub struct Cli {
    /// Config file (default: <config dir>/tock/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create a tag or todo
    #[command(after_help = "Examples:\n  \
        tock add tag name=Work color=red         Create a tag\n  \
        tock add todo title=\"Ship it\" done=false  Values parse as JSON when they can")]
    Add {
        /// Entity kind (tag or todo)
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        /// Fields as key=value
        #[arg(value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Change fields of a tag or todo
    #[command(arg_required_else_help = true)]
    Edit {
        /// Entity kind (tag or todo)
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        /// Entity ID
        #[arg(value_parser = non_empty_string)]
        id: String,

        /// Fields as key=value
        #[arg(required = true, value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Delete a tag or todo
    #[command(arg_required_else_help = true)]
    Rm {
        /// Entity kind (tag or todo)
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,

        /// Entity ID
        #[arg(value_parser = non_empty_string)]
        id: String,
    },

    /// List local tags or todos as JSON lines
    List {
        /// Entity kind (tag or todo)
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,
    },

    /// Show connection status and pending changes
    Status,

    /// Replay pending changes and resync from the remote now
    Sync,

    /// Stay running and sync whenever the remote comes back (Ctrl-C to stop)
    Run,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
