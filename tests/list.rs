//! # List Command Tests
//!
//! Tests for the `hs list` command.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

mod common;

use std::fs;

use common::{setup_test_env, TestEnv};
use homestock::{
    commands::{self, ImportArgs, ListArgs},
    pantry::filter::SortBy,
    ImportMethod,
};

fn write_item(env: &TestEnv, dir: &str, id: &str, name: &str, expires: Option<&str>) {
    let dir = env.pantry_path().join(dir);
    fs::create_dir_all(&dir).unwrap();
    let expires = expires.map_or_else(String::new, |d| format!("expires_on: {d}\n"));
    fs::write(
        dir.join(format!("{id}-{}.md", name.to_lowercase())),
        format!(
            "---\nid: {id}\nname: {name}\nquantity: 1.0\n{expires}added_at: 2026-01-09T12:00:00Z\n---\n"
        ),
    )
    .unwrap();
}

#[test]
fn test_list_empty_pantry() {
    let _env = setup_test_env();

    commands::list(&ListArgs::default()).expect("list should succeed even if empty");
}

#[test]
fn test_list_after_import() {
    let env = setup_test_env();
    commands::import(&ImportArgs {
        method: Some(ImportMethod::Text),
        text: Some("milk, bread".to_string()),
        ..ImportArgs::default()
    })
    .unwrap();

    assert_eq!(env.list_items().len(), 2);
    commands::list(&ListArgs {
        sort: SortBy::Name,
        ..ListArgs::default()
    })
    .expect("list should succeed");
}

#[test]
fn test_list_with_filters_and_broken_file() {
    let env = setup_test_env();
    write_item(&env, "dairy", "260101-AAA", "Yogurt", Some("2026-01-12"));
    write_item(&env, "", "260102-BBB", "Salt", None);
    fs::write(env.pantry_path().join("broken.md"), "no frontmatter").unwrap();

    commands::list(&ListArgs {
        category: Some("dairy".to_string()),
        search: Some("yog".to_string()),
        expiring: Some(30),
        sort: SortBy::Expiry,
    })
    .expect("unreadable files are warnings, not errors");
}

#[test]
fn test_list_outside_household_fails() {
    let _env = TestEnv::new();

    assert!(commands::list(&ListArgs::default()).is_err());
}
