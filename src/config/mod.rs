//! # Configuration
//!
//! Merged configuration combining global (~/.config/homestock/config) and
//! project (.homestock) settings.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod global;
pub mod project;

use std::path::{Path, PathBuf};

use anyhow::Result;

pub use self::{
    global::{set_home_override, Converters, GlobalConfig},
    project::ProjectConfig,
};

/// Merged configuration with project settings overriding global
#[derive(Debug, Clone)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,

    /// Project configuration
    pub project: ProjectConfig,

    /// Resolved project root path
    pub project_root: PathBuf,
}

impl Config {
    /// Loads configuration from both global and project sources
    pub fn load() -> Result<Self> {
        let global = GlobalConfig::load()?;

        let project_root = ProjectConfig::find_project_root().ok_or_else(|| {
            anyhow::anyhow!("Not in a homestock household (no .homestock file found)")
        })?;

        let project = ProjectConfig::load(&project_root)?;

        Ok(Self {
            global,
            project,
            project_root,
        })
    }

    /// Creates a config for initialization (no existing project required)
    pub fn for_init() -> Result<Self> {
        let global = GlobalConfig::load()?;
        let project_root = std::env::current_dir()
            .map_err(|e| anyhow::anyhow!("Cannot get current directory: {e}"))?;

        Ok(Self {
            global,
            project: ProjectConfig::default(),
            project_root,
        })
    }

    /// Returns the effective ID pattern (project overrides global)
    pub fn id_pattern(&self) -> &str {
        self.project
            .id_pattern
            .as_deref()
            .unwrap_or(&self.global.id_pattern)
    }

    /// Whether the interactive wizard is enabled
    pub const fn interactive(&self) -> bool {
        self.global.interactive
    }

    pub const fn converters(&self) -> &Converters {
        &self.global.converters
    }

    /// Returns the pantry directory path
    pub fn pantry_path(&self) -> PathBuf {
        self.project.pantry_path(&self.project_root)
    }

    /// Returns the barcode catalog path
    pub fn catalog_path(&self) -> PathBuf {
        self.project.catalog_path(&self.project_root)
    }

    /// Returns path to a category subdirectory within the pantry
    pub fn category_path(&self, category: &str) -> PathBuf {
        self.pantry_path().join(category)
    }

    /// Returns the keywords of a named quick filter
    pub fn quick_filter(&self, name: &str) -> Option<&[String]> {
        self.project.quick_filters.get(name).map(Vec::as_slice)
    }

    /// Returns path relative to project root
    pub fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.project_root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}
