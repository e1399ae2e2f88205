// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `tock status`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;

#[test]
fn local_only_host_counts_pending_changes() {
    let host = Host::local();
    host.add("tag", &["name=Work"]);
    let todo = host.add("todo", &["title=Ship"]);
    host.tock()
        .args(["edit", "todo", &Host::id_of(&todo), "done=true"])
        .assert()
        .success();

    host.tock()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("status: offline"))
        .stdout(predicate::str::contains("pending: 3"))
        .stdout(predicate::str::contains("remote: no remote configured"));
}

#[test]
fn unreachable_remote_queues_writes() {
    // Nothing listens on the discard port
    let host = Host::remote("http://127.0.0.1:9");
    let tag = host.add("tag", &["name=Work"]);
    assert_eq!(tag["name"], "Work");

    host.tock()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("status: offline"))
        .stdout(predicate::str::contains("pending: 1"))
        .stdout(predicate::str::contains("(unreachable)"));
}

#[test]
fn fresh_host_with_remote_starts_online() {
    let host = Host::remote("http://127.0.0.1:9");
    host.tock()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("status: online"))
        .stdout(predicate::str::contains("pending: 0"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let host = Host::local();
    host.tock()
        .args(["-v", "list", "tag"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("DEBUG"));
}
