//! # Storage
//!
//! File system operations for pantry items.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::{config::Config, constants::ITEM_FILE_EXTENSION, pantry::PantryItem};

/// Walks all item files in the pantry directory (one category level deep).
pub fn walk_items(config: &Config) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(config.pantry_path())
        .min_depth(1)
        .max_depth(2)
        .into_iter()
        .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == ITEM_FILE_EXTENSION)
        })
        .map(walkdir::DirEntry::into_path)
}

/// Loads every readable item; unreadable files are returned as warnings.
pub fn load_items(config: &Config) -> (Vec<PantryItem>, Vec<String>) {
    let mut items = Vec::new();
    let mut warnings = Vec::new();
    for path in walk_items(config) {
        match PantryItem::load(&path) {
            Ok(item) => items.push(item),
            Err(err) => warnings.push(format!("{err:#}")),
        }
    }
    (items, warnings)
}

/// IDs of items already in the pantry.
pub fn existing_ids(config: &Config) -> Vec<String> {
    load_items(config)
        .0
        .into_iter()
        .map(|item| item.meta.id)
        .collect()
}

/// Determines the target directory for an item based on its category.
pub fn target_directory(config: &Config, category: Option<&str>) -> PathBuf {
    category.map_or_else(|| config.pantry_path(), |cat| config.category_path(cat))
}

/// Writes a new item file and returns its path. Existing files are never
/// overwritten.
pub fn create_item(config: &Config, item: &PantryItem) -> Result<PathBuf> {
    let dir = target_directory(config, item.category());
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let path = dir.join(item.filename());
    let content = item.render()?;

    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .and_then(|mut file| std::io::Write::write_all(&mut file, content.as_bytes()))
        .with_context(|| format!("Failed to write item: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "item written");
    Ok(path)
}

/// Writes a batch of items. Either every item is written or, after the first
/// failure, the files written so far are removed again and the error returned.
pub fn create_items(config: &Config, items: &[PantryItem]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(items.len());
    for item in items {
        match create_item(config, item) {
            Ok(path) => written.push(path),
            Err(err) => {
                tracing::warn!(
                    written = written.len(),
                    "batch write failed, removing written items"
                );
                remove_all(&written);
                return Err(err.context(format!("Could not save \"{}\"", item.name())));
            }
        }
    }
    Ok(written)
}

fn remove_all(paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = fs::remove_file(path) {
            tracing::error!(path = %path.display(), %err, "could not remove item after failed batch");
        }
    }
}

/// Returns the item's category as stored in its path relative to the pantry.
pub fn category_from_path(config: &Config, path: &Path) -> Option<String> {
    let parent = path.parent()?;
    let relative = parent.strip_prefix(config.pantry_path()).ok()?;
    relative
        .to_str()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{GlobalConfig, ProjectConfig},
        pantry::ItemDraft,
        wizard::ImportMethod,
    };

    fn config(root: &Path) -> Config {
        Config {
            global: GlobalConfig::default(),
            project: ProjectConfig::default(),
            project_root: root.to_path_buf(),
        }
    }

    fn item(id: &str, name: &str, category: Option<&str>) -> PantryItem {
        PantryItem::from_draft(
            id.to_string(),
            ItemDraft {
                category: category.map(ToString::to_string),
                ..ItemDraft::named(name)
            },
            ImportMethod::Text,
        )
        .unwrap()
    }

    #[test]
    fn test_create_items_uses_category_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let config = config(temp.path());

        let paths = create_items(
            &config,
            &[item("A1", "Milk", Some("dairy")), item("A2", "Bread", None)],
        )
        .unwrap();

        assert_eq!(paths[0], temp.path().join("pantry/dairy/A1-milk.md"));
        assert_eq!(paths[1], temp.path().join("pantry/A2-bread.md"));
        assert_eq!(
            category_from_path(&config, &paths[0]).as_deref(),
            Some("dairy")
        );
        assert_eq!(category_from_path(&config, &paths[1]), None);

        let mut ids = existing_ids(&config);
        ids.sort();
        assert_eq!(ids, vec!["A1", "A2"]);
    }

    #[test]
    fn test_failed_batch_leaves_no_files() {
        let temp = tempfile::tempdir().unwrap();
        let config = config(temp.path());
        let blocker = temp.path().join("pantry/B2-eggs.md");
        fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        fs::write(&blocker, "occupied").unwrap();

        let err = create_items(
            &config,
            &[item("B1", "Milk", None), item("B2", "Eggs", None)],
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("Eggs"));
        assert!(!temp.path().join("pantry/B1-milk.md").exists());
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "occupied");
    }

    #[test]
    fn test_walk_skips_hidden_entries() {
        let temp = tempfile::tempdir().unwrap();
        let config = config(temp.path());
        create_item(&config, &item("C1", "Rice", None)).unwrap();
        fs::write(config.catalog_path(), "[products]\n").unwrap();
        fs::create_dir_all(config.pantry_path().join(".trash")).unwrap();
        fs::write(config.pantry_path().join(".trash/old.md"), "x").unwrap();

        let (items, warnings) = load_items(&config);
        assert_eq!(items.len(), 1);
        assert!(warnings.is_empty());
    }
}
