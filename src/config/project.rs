//! # Project Configuration
//!
//! Handles the household-level configuration stored at `.homestock` in the
//! project root.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CATALOG_FILE, DEFAULT_PANTRY_DIR, PROJECT_CONFIG_FILENAME};

/// Project configuration stored at .homestock in project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Directory name for storing pantry items (default: "pantry")
    #[serde(default = "default_pantry_dir")]
    pub pantry_dir: String,

    /// Barcode catalog path relative to the project root
    /// (default: "<pantry_dir>/.catalog.toml")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<String>,

    /// ID pattern override (uses global default if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_pattern: Option<String>,

    /// Named keyword sets for the review quick filter
    #[serde(default = "default_quick_filters")]
    pub quick_filters: BTreeMap<String, Vec<String>>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            pantry_dir: default_pantry_dir(),
            catalog_file: None,
            id_pattern: None,
            quick_filters: default_quick_filters(),
        }
    }
}

fn default_pantry_dir() -> String {
    DEFAULT_PANTRY_DIR.to_string()
}

fn default_quick_filters() -> BTreeMap<String, Vec<String>> {
    let set = |words: &[&str]| words.iter().map(ToString::to_string).collect();
    BTreeMap::from([
        ("bags".to_string(), set(&["bag", "tüte", "tuete"])),
        ("deposits".to_string(), set(&["deposit", "pfand"])),
        (
            "discounts".to_string(),
            set(&["discount", "rabatt", "coupon"]),
        ),
    ])
}

impl ProjectConfig {
    /// Finds the project root by searching for .homestock file upward
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = env::current_dir().ok()?;

        loop {
            if current.join(PROJECT_CONFIG_FILENAME).exists() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the path to the project config file
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_FILENAME)
    }

    /// Loads the project config from .homestock in the given directory
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path(project_root);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read project config: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse project config: {}", path.display()))
    }

    /// Saves the project config to .homestock
    pub fn save(&self, project_root: &Path) -> Result<()> {
        let path = Self::path(project_root);
        let content = toml::to_string_pretty(self).context("Failed to serialize project config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write project config: {}", path.display()))
    }

    /// Returns the full path to the pantry directory
    pub fn pantry_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.pantry_dir)
    }

    /// Returns the full path to the barcode catalog
    pub fn catalog_path(&self, project_root: &Path) -> PathBuf {
        self.catalog_file.as_ref().map_or_else(
            || self.pantry_path(project_root).join(DEFAULT_CATALOG_FILE),
            |file| project_root.join(file),
        )
    }
}
