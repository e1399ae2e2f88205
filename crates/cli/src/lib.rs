// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tock_cli - Command-line host for the tock sync engine.
//!
//! Wires the configured remote, the local database and the sync
//! orchestrator together and exposes them as the `tock` command.
//!
//! # Main Components
//!
//! - [`Cli`] / [`Command`] - argument parsing
//! - [`Config`] - TOML host configuration (remote URL, data directory, timings)
//! - [`Error`] - error type for all commands
//! - [`logging`] - stderr log output
//!
//! ```rust,ignore
//! use tock_cli::{run, Cli};
//!
//! let cli = Cli::parse_from(["tock", "add", "tag", "name=Work"]);
//! run(cli)?;
//! ```

mod cli;
mod commands;
mod fields;
mod remote;

pub mod config;
pub mod error;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{Error, Result};

use commands::{entity, open_orchestrator};

/// Execute a parsed command line on a fresh runtime.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute(cli.command, &config))
}

/// Execute a command against an already loaded configuration.
pub async fn execute(command: Command, config: &Config) -> Result<()> {
    let on_sync_complete: Option<tock_sync::SyncCallback> = match command {
        Command::Run => Some(Box::new(|| tracing::info!("local data reloaded from remote"))),
        _ => None,
    };
    let orchestrator = open_orchestrator(config, on_sync_complete)?;
    let mut out = std::io::stdout().lock();

    let result = match command {
        Command::Add { kind, fields } => entity::add(&orchestrator, kind, &fields, &mut out).await,
        Command::Edit { kind, id, fields } => {
            entity::edit(&orchestrator, kind, &id, &fields, &mut out).await
        }
        Command::Rm { kind, id } => entity::rm(&orchestrator, kind, &id).await,
        Command::List { kind } => entity::list(&orchestrator, kind, &mut out),
        Command::Status => commands::status::run(&orchestrator, &mut out).await,
        Command::Sync => commands::sync::run(&orchestrator, &mut out).await,
        Command::Run => {
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "cannot listen for ctrl-c");
                    std::future::pending::<()>().await;
                }
            };
            commands::run::run(&orchestrator, shutdown, &mut out).await
        }
    };

    orchestrator.destroy();
    result
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
