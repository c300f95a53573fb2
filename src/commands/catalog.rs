//! # Catalog Command
//!
//! Maintains the household barcode catalog consulted by barcode imports.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::fs;

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;

use crate::{
    config::Config,
    pantry::{catalog::Catalog, ItemDraft},
    ui,
};

/// A product to remember under a barcode.
#[derive(Debug, Clone, Default)]
pub struct CatalogEntry {
    pub code: String,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
}

/// Adds or replaces a catalog product.
pub fn add(entry: CatalogEntry) -> Result<()> {
    let code = entry.code.trim().to_string();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        bail!("Invalid barcode '{}'", entry.code);
    }
    if entry.name.trim().is_empty() {
        bail!("Product name cannot be empty");
    }

    let config = Config::load()?;
    let path = config.catalog_path();
    let mut catalog = Catalog::load(&path)?;
    let replaced = catalog.lookup(&code).is_some();

    catalog.insert(
        code.clone(),
        ItemDraft {
            quantity: entry.quantity,
            unit: entry.unit,
            category: entry.category,
            ..ItemDraft::named(entry.name.trim())
        },
    );

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    catalog.save(&path)?;
    tracing::info!(%code, replaced, "catalog product saved");

    let verb = if replaced { "Updated" } else { "Added" };
    println!("{} {verb} {} [{code}]", "✓".green(), entry.name.trim());
    Ok(())
}

/// Prints every catalog product.
pub fn list() -> Result<()> {
    let config = Config::load()?;
    let catalog = Catalog::load(&config.catalog_path())?;

    if catalog.is_empty() {
        println!("{}", "The barcode catalog is empty.".dimmed());
        return Ok(());
    }
    for (code, draft) in catalog.products() {
        let amount = match (draft.quantity, draft.unit.as_deref()) {
            (Some(q), Some(u)) => format!("{q} {u}"),
            (Some(q), None) => q.to_string(),
            (None, Some(u)) => u.to_string(),
            (None, None) => String::new(),
        };
        println!(
            "{} {} {amount}",
            ui::pad(code, 15).dimmed(),
            ui::pad(&ui::truncate(&draft.name, 40), 40)
        );
    }
    Ok(())
}
