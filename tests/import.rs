//! # Import Command Tests
//!
//! Scripted `hs import` runs: every method, keyword filters, dry runs, and the
//! failure cases that must leave the pantry untouched.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

mod common;

use common::{setup_test_env, GlobalConfigBuilder, TestEnv};
use homestock::{
    commands::{self, CatalogEntry, ImportArgs},
    ImportMethod, PantryItem,
};

fn text_import(text: &str) -> ImportArgs {
    ImportArgs {
        method: Some(ImportMethod::Text),
        text: Some(text.to_string()),
        ..ImportArgs::default()
    }
}

fn load_all(env: &TestEnv) -> Vec<PantryItem> {
    env.list_items()
        .iter()
        .map(|p| PantryItem::load(p).expect("item should parse"))
        .collect()
}

// =============================================================================
// Text
// =============================================================================

#[test]
fn test_text_import_writes_items() {
    let env = setup_test_env();

    commands::import(&text_import("2 l milk, bread, 6 eggs")).expect("import should succeed");

    assert_eq!(env.item_names(), vec!["bread", "eggs", "milk"]);
    let milk = load_all(&env)
        .into_iter()
        .find(|i| i.meta.name == "milk")
        .unwrap();
    assert_eq!(milk.meta.quantity, 2.0);
    assert_eq!(milk.meta.unit.as_deref(), Some("l"));
    assert_eq!(milk.meta.source.as_deref(), Some("text"));
}

#[test]
fn test_text_import_from_file() {
    let env = setup_test_env();
    let list = env.create_test_file("list.txt", "- rice\n- [x] salt\n- 500g butter\n");

    commands::import(&ImportArgs {
        method: Some(ImportMethod::Text),
        file: Some(list),
        ..ImportArgs::default()
    })
    .expect("import should succeed");

    assert_eq!(env.item_names(), vec!["butter", "rice", "salt"]);
}

#[test]
fn test_short_text_is_rejected() {
    let env = setup_test_env();

    let err = commands::import(&text_import("ab")).unwrap_err();

    assert!(err.to_string().contains("at least"), "{err}");
    assert!(env.list_items().is_empty());
}

#[test]
fn test_text_import_without_input_fails() {
    let env = setup_test_env();

    let err = commands::import(&ImportArgs {
        method: Some(ImportMethod::Text),
        ..ImportArgs::default()
    })
    .unwrap_err();

    assert!(err.to_string().contains("--text"), "{err}");
    assert!(env.list_items().is_empty());
}

#[test]
fn test_missing_method_without_terminal_fails() {
    let env = setup_test_env();

    let err = commands::import(&ImportArgs::default()).unwrap_err();

    assert!(err.to_string().contains("--method"), "{err}");
    assert!(env.list_items().is_empty());
}

#[test]
fn test_import_outside_household_fails() {
    let env = TestEnv::new();
    env.write_global_config(&GlobalConfigBuilder::new().build());

    let err = commands::import(&text_import("milk, bread")).unwrap_err();
    assert!(err.to_string().contains(".homestock"), "{err}");
}

// =============================================================================
// Review Filters
// =============================================================================

#[test]
fn test_drop_keywords_remove_matching_items() {
    let env = setup_test_env();

    commands::import(&ImportArgs {
        drop: vec!["BAG".to_string()],
        ..text_import("apples, plastic bag, bread")
    })
    .expect("import should succeed");

    assert_eq!(env.item_names(), vec!["apples", "bread"]);
}

#[test]
fn test_named_quick_filter() {
    let env = setup_test_env();

    commands::import(&ImportArgs {
        filters: vec!["deposits".to_string()],
        ..text_import("water\nbottle deposit\npfand return\ncheese")
    })
    .expect("import should succeed");

    assert_eq!(env.item_names(), vec!["cheese", "water"]);
}

#[test]
fn test_unknown_quick_filter_fails_without_saving() {
    let env = setup_test_env();

    let err = commands::import(&ImportArgs {
        filters: vec!["snacks".to_string()],
        ..text_import("chips, salsa")
    })
    .unwrap_err();

    assert!(err.to_string().contains("snacks"), "{err}");
    assert!(env.list_items().is_empty());
}

#[test]
fn test_filter_removing_everything_saves_nothing() {
    let env = setup_test_env();

    commands::import(&ImportArgs {
        drop: vec!["bag".to_string()],
        ..text_import("paper bag, plastic bag")
    })
    .expect("empty import is not an error");

    assert!(env.list_items().is_empty());
}

#[test]
fn test_dry_run_saves_nothing() {
    let env = setup_test_env();

    commands::import(&ImportArgs {
        dry_run: true,
        ..text_import("milk, bread")
    })
    .expect("dry run should succeed");

    assert!(env.list_items().is_empty());
}

#[test]
fn test_repeated_imports_get_distinct_ids() {
    let env = setup_test_env();

    commands::import(&text_import("milk, bread")).unwrap();
    commands::import(&text_import("milk, bread")).unwrap();

    let mut ids: Vec<String> = load_all(&env).into_iter().map(|i| i.meta.id).collect();
    assert_eq!(ids.len(), 4);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

// =============================================================================
// Unconfigured Methods
// =============================================================================

#[test]
fn test_unconfigured_voice_is_unavailable() {
    let env = setup_test_env();
    let audio = env.create_test_file("note.wav", "RIFF");

    let err = commands::import(&ImportArgs {
        method: Some(ImportMethod::Voice),
        audio: Some(audio),
        ..ImportArgs::default()
    })
    .unwrap_err();

    assert!(err.to_string().contains("converters.voice"), "{err}");
    assert!(env.list_items().is_empty());
}

#[test]
fn test_unconfigured_receipt_is_unavailable() {
    let env = setup_test_env();

    let err = commands::import(&ImportArgs {
        method: Some(ImportMethod::DigitalReceipt),
        url: Some("https://shop.example/r/1".to_string()),
        ..ImportArgs::default()
    })
    .unwrap_err();

    assert!(err.to_string().contains("not available"), "{err}");
}

// =============================================================================
// Barcode
// =============================================================================

#[test]
fn test_barcode_import_uses_catalog() {
    let env = setup_test_env();
    commands::catalog::add(CatalogEntry {
        code: "4006381333931".to_string(),
        name: "Oat drink".to_string(),
        quantity: Some(1.0),
        unit: Some("l".to_string()),
        category: Some("drinks".to_string()),
    })
    .expect("catalog add should succeed");

    commands::import(&ImportArgs {
        method: Some(ImportMethod::Barcode),
        codes: vec!["4006381333931".to_string(), "1111111111111".to_string()],
        ..ImportArgs::default()
    })
    .expect("import should succeed");

    let items = load_all(&env);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].meta.name, "Oat drink");
    assert_eq!(items[0].meta.barcode.as_deref(), Some("4006381333931"));
    assert_eq!(items[0].meta.source.as_deref(), Some("barcode"));
    assert!(env.list_items()[0].starts_with(env.pantry_path().join("drinks")));
}

#[test]
fn test_barcode_import_with_only_unknown_codes_fails() {
    let env = setup_test_env();

    let err = commands::import(&ImportArgs {
        method: Some(ImportMethod::Barcode),
        codes: vec!["1111111111111".to_string()],
        ..ImportArgs::default()
    })
    .unwrap_err();

    assert!(err.to_string().contains("at least one item"), "{err}");
    assert!(env.list_items().is_empty());
}

#[test]
fn test_same_barcode_twice_adds_two_items() {
    let env = setup_test_env();
    commands::catalog::add(CatalogEntry {
        code: "4000417025005".to_string(),
        name: "Chocolate".to_string(),
        ..CatalogEntry::default()
    })
    .unwrap();

    commands::import(&ImportArgs {
        method: Some(ImportMethod::Barcode),
        codes: vec!["4000417025005".to_string(), "4000417025005".to_string()],
        ..ImportArgs::default()
    })
    .unwrap();

    assert_eq!(env.item_names(), vec!["Chocolate", "Chocolate"]);
}

// =============================================================================
// External Converters
// =============================================================================

#[cfg(unix)]
mod converters {
    use super::*;

    #[test]
    fn test_photo_batch_passes_all_files_and_type() {
        let env = TestEnv::new();
        let script = env.write_script(
            "photo.sh",
            r#"for f in "$@"; do echo "- name: $HOMESTOCK_IMPORT_TYPE $(basename "$f" .jpg)"; done"#,
        );
        env.write_global_config(
            &GlobalConfigBuilder::new()
                .converter("photo", &script)
                .build(),
        );
        commands::init().unwrap();
        let r1 = env.create_test_file("r1.jpg", "jpg");
        let r2 = env.create_test_file("r2.jpg", "jpg");

        commands::import(&ImportArgs {
            method: Some(ImportMethod::Photo),
            images: vec![r1, r2],
            import_type: Some("receipt".to_string()),
            ..ImportArgs::default()
        })
        .expect("import should succeed");

        assert_eq!(env.item_names(), vec!["receipt r1", "receipt r2"]);
    }

    #[test]
    fn test_single_photo_type_uses_first_file() {
        let env = TestEnv::new();
        let script = env.write_script(
            "photo.sh",
            r#"echo "- name: label $# $HOMESTOCK_IMPORT_TYPE""#,
        );
        env.write_global_config(
            &GlobalConfigBuilder::new()
                .converter("photo", &script)
                .build(),
        );
        commands::init().unwrap();
        let front = env.create_test_file("front.jpg", "jpg");

        commands::import(&ImportArgs {
            method: Some(ImportMethod::Photo),
            images: vec![front],
            import_type: Some("product".to_string()),
            ..ImportArgs::default()
        })
        .unwrap();

        assert_eq!(env.item_names(), vec!["label 1 product"]);
    }

    #[test]
    fn test_missing_image_file_fails_before_conversion() {
        let env = TestEnv::new();
        let marker = env.project_path().join("ran");
        let script = env.write_script(
            "photo.sh",
            &format!("touch '{}'\necho '- name: x'", marker.display()),
        );
        env.write_global_config(
            &GlobalConfigBuilder::new()
                .converter("photo", &script)
                .build(),
        );
        commands::init().unwrap();

        let err = commands::import(&ImportArgs {
            method: Some(ImportMethod::Photo),
            images: vec![env.project_path().join("missing.jpg")],
            ..ImportArgs::default()
        })
        .unwrap_err();

        assert!(err.to_string().contains("missing.jpg"), "{err}");
        assert!(!marker.exists());
        assert!(env.list_items().is_empty());
    }

    #[test]
    fn test_voice_converter_gets_audio_path() {
        let env = TestEnv::new();
        let script = env.write_script(
            "voice.sh",
            r#"echo "items:"
echo "  - name: heard $(basename "$1")""#,
        );
        env.write_global_config(
            &GlobalConfigBuilder::new()
                .converter("voice", &script)
                .build(),
        );
        commands::init().unwrap();
        let audio = env.create_test_file("memo.wav", "RIFF");

        commands::import(&ImportArgs {
            method: Some(ImportMethod::Voice),
            audio: Some(audio),
            ..ImportArgs::default()
        })
        .unwrap();

        assert_eq!(env.item_names(), vec!["heard memo.wav"]);
    }

    #[test]
    fn test_receipt_converter_and_invalid_url() {
        let env = TestEnv::new();
        let script = env.write_script(
            "receipt.sh",
            r#"echo '[{"name": "Coffee", "quantity": 2, "unit": "pack"}]'"#,
        );
        env.write_global_config(
            &GlobalConfigBuilder::new()
                .converter("receipt", &script)
                .build(),
        );
        commands::init().unwrap();

        let err = commands::import(&ImportArgs {
            method: Some(ImportMethod::DigitalReceipt),
            url: Some("not a url".to_string()),
            ..ImportArgs::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("URL"), "{err}");
        assert!(env.list_items().is_empty());

        commands::import(&ImportArgs {
            method: Some(ImportMethod::DigitalReceipt),
            url: Some("https://shop.example/r/42".to_string()),
            ..ImportArgs::default()
        })
        .unwrap();

        let items = load_all(&env);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].meta.name, "Coffee");
        assert_eq!(items[0].amount(), "2 pack");
        assert_eq!(items[0].meta.source.as_deref(), Some("receipt"));
    }

    #[test]
    fn test_nameless_converter_item_rejects_the_batch() {
        let env = TestEnv::new();
        let script = env.write_script(
            "receipt.sh",
            "printf -- '- name: Milk\\n- name: \"\"\\n'",
        );
        env.write_global_config(
            &GlobalConfigBuilder::new()
                .converter("receipt", &script)
                .build(),
        );
        commands::init().unwrap();

        let err = commands::import(&ImportArgs {
            method: Some(ImportMethod::DigitalReceipt),
            url: Some("https://shop.example/r/7".to_string()),
            ..ImportArgs::default()
        })
        .unwrap_err();

        assert!(format!("{err:#}").contains("without a name"), "{err:#}");
        assert!(env.list_items().is_empty());
    }

    #[test]
    fn test_failing_converter_saves_nothing() {
        let env = TestEnv::new();
        let script = env.write_script("text.sh", "echo 'recognizer offline' >&2\nexit 3");
        env.write_global_config(
            &GlobalConfigBuilder::new()
                .converter("text", &script)
                .build(),
        );
        commands::init().unwrap();

        let err = commands::import(&text_import("milk, bread")).unwrap_err();

        assert!(format!("{err:#}").contains("text import failed"), "{err:#}");
        assert!(env.list_items().is_empty());
    }

    #[test]
    fn test_text_converter_reads_stdin() {
        let env = TestEnv::new();
        let script = env.write_script(
            "text.sh",
            r#"while read -r line || [ -n "$line" ]; do echo "- name: parsed $line"; done"#,
        );
        env.write_global_config(
            &GlobalConfigBuilder::new()
                .converter("text", &script)
                .build(),
        );
        commands::init().unwrap();

        commands::import(&text_import("flour\nsugar")).unwrap();

        assert_eq!(env.item_names(), vec!["parsed flour", "parsed sugar"]);
    }

    #[test]
    fn test_barcode_converter_fallback() {
        let env = TestEnv::new();
        let script = env.write_script("lookup.sh", r#"echo "name: Product $1""#);
        env.write_global_config(
            &GlobalConfigBuilder::new()
                .converter("barcode", &script)
                .build(),
        );
        commands::init().unwrap();

        commands::import(&ImportArgs {
            method: Some(ImportMethod::Barcode),
            codes: vec!["12345678".to_string()],
            ..ImportArgs::default()
        })
        .unwrap();

        let items = load_all(&env);
        assert_eq!(items[0].meta.name, "Product 12345678");
        assert_eq!(items[0].meta.barcode.as_deref(), Some("12345678"));
    }
}
