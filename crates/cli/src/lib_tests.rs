// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use clap::Parser;
use tempfile::TempDir;
use tock_core::EntityKind;

fn detached_config(temp: &TempDir) -> Config {
    Config {
        data_dir: Some(temp.path().to_path_buf()),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_execute_persists_across_invocations() {
    let temp = TempDir::new().unwrap();
    let config = detached_config(&temp);

    execute(
        Command::Add {
            kind: EntityKind::Tag,
            fields: vec!["name=Work".into()],
        },
        &config,
    )
    .await
    .unwrap();

    let orchestrator = open_orchestrator(&config, None).unwrap();
    assert_eq!(orchestrator.local().count(EntityKind::Tag).unwrap(), 1);
    assert_eq!(orchestrator.pending_changes(), 1);
    orchestrator.destroy();
}

#[tokio::test]
async fn test_sync_requires_remote() {
    let temp = TempDir::new().unwrap();
    let err = execute(Command::Sync, &detached_config(&temp))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoRemote));
}

#[tokio::test]
async fn test_rm_missing_entity_is_noop() {
    let temp = TempDir::new().unwrap();
    execute(
        Command::Rm {
            kind: EntityKind::Todo,
            id: "todo-missing".into(),
        },
        &detached_config(&temp),
    )
    .await
    .unwrap();
}

#[test]
fn test_run_reports_bad_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "remote_url = \"ftp://example.com\"\n").unwrap();

    let cli = Cli::parse_from([
        "tock",
        "--config",
        path.to_str().unwrap(),
        "list",
        "tag",
    ]);
    let err = run(cli).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_run_list_on_fresh_database() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "data_dir = \"data\"\n").unwrap();

    let cli = Cli::parse_from(["tock", "--config", path.to_str().unwrap(), "list", "todo"]);
    run(cli).unwrap();
    assert!(temp.path().join("data").join("tock.db").exists());
}
