// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `tock add`, `edit`, `rm` and `list`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use yare::parameterized;

#[test]
fn add_prints_entity_with_generated_fields() {
    let host = Host::local();
    let tag = host.add("tag", &["name=Work", "color=red"]);

    assert!(Host::id_of(&tag).starts_with("tag-"));
    assert_eq!(tag["name"], "Work");
    assert_eq!(tag["color"], "red");
    assert!(tag["createdAt"].is_string());
    assert!(tag["updatedAt"].is_string());
}

#[test]
fn add_parses_json_values() {
    let host = Host::local();
    let todo = host.add("todo", &["title=Ship", "done=false", "estimate=3"]);

    assert_eq!(todo["done"], false);
    assert_eq!(todo["estimate"], 3);
    assert_eq!(todo["sortOrder"], 1);
}

#[test]
fn todos_list_in_sort_order() {
    let host = Host::local();
    host.add("todo", &["title=first"]);
    host.add("todo", &["title=second"]);
    host.add("todo", &["title=third"]);

    let titles: Vec<_> = host
        .list("todos")
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn edit_merges_fields() {
    let host = Host::local();
    let todo = host.add("todo", &["title=Ship", "done=false"]);
    let id = Host::id_of(&todo);

    host.tock()
        .args(["edit", "todo", &id, "done=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"done\":true"))
        .stdout(predicate::str::contains("\"title\":\"Ship\""));
}

#[test]
fn edit_missing_entity_fails() {
    let host = Host::local();
    host.tock()
        .args(["edit", "tag", "tag-nope", "name=x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("tag-nope"));
}

#[test]
fn rm_deletes_entity() {
    let host = Host::local();
    let keep = host.add("tag", &["name=Keep"]);
    let drop = host.add("tag", &["name=Drop"]);

    host.tock()
        .args(["rm", "tag", &Host::id_of(&drop)])
        .assert()
        .success();

    let tags = host.list("tag");
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["id"], keep["id"]);
}

#[test]
fn rm_missing_entity_succeeds() {
    let host = Host::local();
    host.tock()
        .args(["rm", "todo", "todo-nope"])
        .assert()
        .success();
}

#[parameterized(
    no_equals = { "title" },
    empty_key = { "=Ship" },
)]
fn add_rejects_malformed_fields(field: &str) {
    let host = Host::local();
    host.tock()
        .args(["add", "todo", field])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid field"));
}

#[test]
fn unknown_kind_is_usage_error() {
    let host = Host::local();
    host.tock()
        .args(["list", "notes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown kind"));
}

#[test]
fn list_empty_database() {
    let host = Host::local();
    host.tock()
        .args(["list", "tag"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
