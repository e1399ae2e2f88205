// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `tock sync` against a mock REST server.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use httpmock::prelude::*;
use serde_json::json;

#[test]
fn sync_without_remote_fails() {
    let host = Host::local();
    host.tock()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no remote configured"));
}

#[test]
fn sync_replays_queue_and_adopts_remote_state() {
    let server = MockServer::start();
    let host = Host::remote(&server.base_url());

    // Queue two changes while the server refuses writes
    let mut refuse = server.mock(|when, then| {
        when.method(POST);
        then.status(503).body("maintenance");
    });
    let tag = host.add("tag", &["name=Work"]);
    host.add("todo", &["title=Ship"]);
    refuse.delete();

    let create_tag = server.mock(|when, then| {
        when.method(POST)
            .path("/tags")
            .json_body_partial(format!(r#"{{"id":"{}"}}"#, Host::id_of(&tag)));
        then.status(201);
    });
    let create_todo = server.mock(|when, then| {
        when.method(POST).path("/todos");
        then.status(201);
    });
    server.mock(|when, then| {
        when.method(GET).path("/tags");
        then.status(200)
            .json_body(json!([{"id": Host::id_of(&tag), "name": "Work"}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/todos");
        then.status(200).json_body(json!([
            {"id": "todo-remote", "title": "From elsewhere", "sortOrder": 1}
        ]));
    });

    host.tock()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 replayed, 0 rejected, 1 tags, 1 todos"));

    create_tag.assert();
    create_todo.assert();

    let todos = host.list("todo");
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["id"], "todo-remote");

    host.tock()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("pending: 0"));
}

#[test]
fn rejected_entries_do_not_block_sync() {
    let server = MockServer::start();
    let host = Host::remote(&server.base_url());

    let mut refuse = server.mock(|when, then| {
        when.method(POST);
        then.status(503);
    });
    host.add("tag", &["name=Conflicted"]);
    refuse.delete();

    server.mock(|when, then| {
        when.method(POST).path("/tags");
        then.status(409).body("conflict");
    });
    server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(json!([]));
    });

    host.tock()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 replayed, 1 rejected"));
    assert!(host.list("tag").is_empty());
}

#[test]
fn failed_resync_reports_error() {
    let server = MockServer::start();
    let host = Host::remote(&server.base_url());
    server.mock(|when, then| {
        when.method(GET).path("/tags");
        then.status(500).body("database unavailable");
    });

    host.tock()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sync failed"))
        .stderr(predicate::str::contains("database unavailable"));
}
