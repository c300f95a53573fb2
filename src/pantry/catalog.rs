//! # Barcode Catalog
//!
//! Household-maintained product catalog consulted before any external
//! barcode lookup. Stored as TOML, keyed by barcode:
//!
//! ```toml
//! [products.4006381333931]
//! name = "Oat drink"
//! quantity = 1
//! unit = "l"
//! category = "drinks"
//! ```
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{collections::BTreeMap, fmt, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::ItemDraft;

/// A product resolved from a barcode.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub code: String,
    pub draft: ItemDraft,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.draft.name, self.code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    products: BTreeMap<String, ItemDraft>,
}

impl Catalog {
    /// Loads the catalog; a missing file is an empty catalog.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read barcode catalog: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse barcode catalog: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize barcode catalog")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write barcode catalog: {}", path.display()))
    }

    pub fn lookup(&self, code: &str) -> Option<Product> {
        self.products.get(code.trim()).map(|draft| Product {
            code: code.trim().to_string(),
            draft: ItemDraft {
                barcode: draft.barcode.clone().or_else(|| Some(code.trim().to_string())),
                ..draft.clone()
            },
        })
    }

    pub fn insert(&mut self, code: impl Into<String>, draft: ItemDraft) {
        self.products.insert(code.into(), draft);
    }

    /// Products ordered by barcode.
    pub fn products(&self) -> impl Iterator<Item = (&str, &ItemDraft)> {
        self.products.iter().map(|(code, draft)| (code.as_str(), draft))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
