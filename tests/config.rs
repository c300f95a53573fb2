//! # Config Tests
//!
//! Tests for household initialization, global config handling, custom pantry
//! directories, ID patterns, and quick filters from `.homestock`.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

mod common;

use common::{setup_test_env, setup_with, GlobalConfigBuilder, TestEnv};
use homestock::{
    commands::{self, CatalogEntry, ImportArgs},
    config::GlobalConfig,
    Config, ImportMethod, PantryItem,
};

fn import_text(text: &str) -> ImportArgs {
    ImportArgs {
        method: Some(ImportMethod::Text),
        text: Some(text.to_string()),
        ..ImportArgs::default()
    }
}

// =============================================================================
// Init
// =============================================================================

#[test]
fn test_init_creates_household() {
    let env = TestEnv::new();

    commands::init().expect("init should succeed");

    assert!(env.project_config_path().exists());
    assert!(env.pantry_path().is_dir());
    let global = env.read_global_config();
    assert!(global.contains("interactive = true"), "{global}");
    assert!(global.contains("[converters]"), "{global}");
}

#[test]
fn test_init_twice_fails() {
    let _env = setup_test_env();

    let err = commands::init().unwrap_err();
    assert!(err.to_string().contains("already initialized"), "{err}");
}

#[test]
fn test_init_keeps_existing_global_config() {
    let env = TestEnv::new();
    env.write_global_config("interactive = false\n");

    commands::init().unwrap();

    assert_eq!(env.read_global_config(), "interactive = false\n");
}

// =============================================================================
// Global Config
// =============================================================================

#[test]
fn test_global_defaults_when_missing() {
    let _env = TestEnv::new();

    let config = GlobalConfig::load().unwrap();
    assert!(config.interactive);
    assert!(config.converters.voice.is_none());
}

#[test]
fn test_unknown_global_fields_are_reported() {
    let env = TestEnv::new();
    env.write_global_config("interactive = false\neditor = \"vim\"\n[converters]\nocr = \"x\"\n");

    let unknown = GlobalConfig::unknown_fields().unwrap();
    assert_eq!(unknown, vec!["editor", "converters.ocr"]);
}

#[test]
fn test_invalid_global_config_is_an_error() {
    let env = setup_test_env();
    env.write_global_config("interactive = \"sometimes\"");

    let err = commands::import(&import_text("milk, bread")).unwrap_err();
    assert!(format!("{err:#}").contains("global config"), "{err:#}");
    assert!(env.list_items().is_empty());
}

#[test]
fn test_custom_id_pattern() {
    let env = setup_with(&GlobalConfigBuilder::new().id_pattern("PX-%RRRR"));

    commands::import(&import_text("milk")).unwrap();

    let item = PantryItem::load(&env.list_items()[0]).unwrap();
    assert!(item.meta.id.starts_with("PX-"), "{}", item.meta.id);
    assert_eq!(item.meta.id.len(), 7);
}

// =============================================================================
// Project Config
// =============================================================================

#[test]
fn test_custom_pantry_dir() {
    let env = TestEnv::new();
    env.write_global_config(&GlobalConfigBuilder::new().build());
    env.write_project_config("pantry_dir = \"stock\"\n");

    commands::import(&import_text("rice, beans")).unwrap();

    assert!(env.project_path().join("stock").is_dir());
    assert!(env.list_items().is_empty());
    let config = Config::load().unwrap();
    assert_eq!(config.pantry_path(), env.project_path().join("stock"));
}

#[test]
fn test_project_quick_filters_replace_defaults() {
    let env = TestEnv::new();
    env.write_global_config(&GlobalConfigBuilder::new().build());
    env.write_project_config("[quick_filters]\nsnacks = [\"chips\", \"candy\"]\n");

    commands::import(&ImportArgs {
        filters: vec!["snacks".to_string()],
        ..import_text("chips, apples, candy bar")
    })
    .unwrap();
    assert_eq!(env.item_names(), vec!["apples"]);

    let err = commands::import(&ImportArgs {
        filters: vec!["bags".to_string()],
        ..import_text("paper bag")
    })
    .unwrap_err();
    assert!(err.to_string().contains("bags"), "{err}");
}

#[test]
fn test_catalog_file_lives_in_pantry() {
    let env = setup_test_env();

    commands::catalog::add(CatalogEntry {
        code: "4006381333931".to_string(),
        name: "Oat drink".to_string(),
        ..CatalogEntry::default()
    })
    .unwrap();

    let catalog = std::fs::read_to_string(env.pantry_path().join(".catalog.toml")).unwrap();
    assert!(catalog.contains("4006381333931"), "{catalog}");
    assert!(catalog.contains("Oat drink"), "{catalog}");
    assert!(env.list_items().is_empty());

    let err = commands::catalog::add(CatalogEntry {
        code: "40-06".to_string(),
        name: "Bad".to_string(),
        ..CatalogEntry::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("Invalid barcode"), "{err}");
}
