//! # Init Command
//!
//! Initializes a homestock household in the current directory.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::fs;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::config::{Config, GlobalConfig, ProjectConfig};

/// Executes the init command.
pub fn execute() -> Result<()> {
    let config = Config::for_init()?;

    let config_path = ProjectConfig::path(&config.project_root);
    if config_path.exists() {
        anyhow::bail!(
            "Household already initialized (found {})",
            config_path.display()
        );
    }

    let project_config = ProjectConfig::default();
    project_config.save(&config.project_root)?;

    let pantry_path = project_config.pantry_path(&config.project_root);
    fs::create_dir_all(&pantry_path).with_context(|| {
        format!(
            "Failed to create pantry directory: {}",
            pantry_path.display()
        )
    })?;

    let created_global = GlobalConfig::create_default_if_missing()?;
    tracing::info!(root = %config.project_root.display(), "household initialized");

    println!("{} Initialized homestock household", "✓".green());
    println!("  {} {}", "Config:".dimmed(), config_path.display());
    println!("  {} {}", "Pantry:".dimmed(), pantry_path.display());
    if created_global {
        if let Some(path) = GlobalConfig::path() {
            println!(
                "  {} {} (configure converters here)",
                "Global:".dimmed(),
                path.display()
            );
        }
    }

    Ok(())
}
