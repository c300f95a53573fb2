//! # Pantry
//!
//! The household pantry: items stored as Markdown files with YAML
//! frontmatter, and the host module that plugs them into the import wizard.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod catalog;
pub mod devices;
pub mod document;
pub mod filter;
pub mod host;
pub mod slug;
pub mod text;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use self::{
    host::{PantryHost, SavedPaths},
    slug::slugify,
};
use crate::{
    constants::ITEM_FILE_EXTENSION,
    wizard::{Column, FieldError, ImportMethod, StagedRecord},
};

/// Date format for `expires_on`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const COLUMNS: &[Column] = &[
    Column::new("name", "Name", 28),
    Column::new("quantity", "Qty", 6),
    Column::new("unit", "Unit", 6),
    Column::new("category", "Category", 12),
    Column::new("expires_on", "Expires", 10),
    Column::new("barcode", "Barcode", 13),
    Column::new("notes", "Notes", 20),
];

const fn default_quantity() -> f64 {
    1.0
}

/// YAML frontmatter of a pantry item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub id: String,

    pub name: String,

    #[serde(default = "default_quantity")]
    pub quantity: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Category (matches parent subdirectory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    /// Import method that produced the item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub added_at: DateTime<Utc>,
}

/// Item as produced by a converter or the barcode catalog, before it has an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(alias = "title")]
    pub name: String,

    #[serde(default, alias = "qty", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// `YYYY-MM-DD`; anything else is dropped when the item is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ItemDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A pantry item with frontmatter and notes body
#[derive(Debug, Clone, PartialEq)]
pub struct PantryItem {
    pub meta: ItemMeta,

    /// Markdown body
    pub notes: String,

    /// File path (if loaded from disk)
    pub path: Option<PathBuf>,
}

impl PantryItem {
    /// Creates an item from a draft. Blank names are rejected; invalid
    /// quantities fall back to 1 and unparseable dates are dropped.
    pub fn from_draft(id: String, draft: ItemDraft, source: ImportMethod) -> Result<Self> {
        let name = draft.name.trim();
        if name.is_empty() {
            anyhow::bail!("Item without a name");
        }

        let quantity = draft
            .quantity
            .filter(|q| q.is_finite() && *q > 0.0)
            .unwrap_or(1.0);
        let expires_on = draft
            .expires_on
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok());
        let category = non_empty(draft.category.as_deref()).filter(|c| is_valid_category(c));

        Ok(Self {
            meta: ItemMeta {
                id,
                name: name.to_string(),
                quantity,
                unit: non_empty(draft.unit.as_deref()),
                category,
                expires_on,
                barcode: non_empty(draft.barcode.as_deref()),
                source: Some(source.key().to_string()),
                added_at: Utc::now(),
            },
            notes: draft.notes.unwrap_or_default().trim().to_string(),
            path: None,
        })
    }

    /// Loads an item from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read item: {}", path.display()))?;

        let (meta, notes) = document::parse(&content)
            .with_context(|| format!("Failed to parse item: {}", path.display()))?;

        Ok(Self {
            meta,
            notes,
            path: Some(path.to_path_buf()),
        })
    }

    /// Renders the item as a Markdown document
    pub fn render(&self) -> Result<String> {
        document::render(&self.meta, &self.notes)
    }

    /// Returns the filename for this item: `{id}-{slug}.md`
    pub fn filename(&self) -> String {
        let slug = slugify(&self.meta.name);
        if slug.is_empty() {
            format!("{}.{ITEM_FILE_EXTENSION}", self.meta.id)
        } else {
            format!("{}-{slug}.{ITEM_FILE_EXTENSION}", self.meta.id)
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn category(&self) -> Option<&str> {
        self.meta.category.as_deref()
    }

    /// Quantity with unit, e.g. `1.5 kg`
    pub fn amount(&self) -> String {
        let quantity = format_quantity(self.meta.quantity);
        match &self.meta.unit {
            Some(unit) => format!("{quantity} {unit}"),
            None => quantity,
        }
    }
}

impl fmt::Display for PantryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.meta.name, self.amount())
    }
}

impl StagedRecord for PantryItem {
    fn id(&self) -> &str {
        &self.meta.id
    }

    fn display_name(&self) -> &str {
        &self.meta.name
    }

    fn field(&self, key: &str) -> Option<String> {
        let meta = &self.meta;
        Some(match key {
            "id" => meta.id.clone(),
            "name" => meta.name.clone(),
            "quantity" => format_quantity(meta.quantity),
            "unit" => meta.unit.clone().unwrap_or_default(),
            "category" => meta.category.clone().unwrap_or_default(),
            "expires_on" => meta
                .expires_on
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            "barcode" => meta.barcode.clone().unwrap_or_default(),
            "source" => meta.source.clone().unwrap_or_default(),
            "notes" => self.notes.clone(),
            _ => return None,
        })
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        let value = value.trim();
        let meta = &mut self.meta;
        match key {
            "id" | "source" => return Err(FieldError::ReadOnly(key.to_string())),
            "name" => {
                if value.is_empty() {
                    return Err(FieldError::invalid(key, "name must not be empty"));
                }
                meta.name = value.to_string();
            }
            "quantity" => {
                meta.quantity = parse_quantity(value)
                    .filter(|q| *q > 0.0)
                    .ok_or_else(|| FieldError::invalid(key, "expected a positive number"))?;
            }
            "unit" => meta.unit = non_empty(Some(value)),
            "category" => {
                if !value.is_empty() && !is_valid_category(value) {
                    return Err(FieldError::invalid(key, "must be a single directory name"));
                }
                meta.category = non_empty(Some(value));
            }
            "expires_on" => {
                meta.expires_on = if value.is_empty() {
                    None
                } else {
                    Some(
                        NaiveDate::parse_from_str(value, DATE_FORMAT)
                            .map_err(|_| FieldError::invalid(key, "expected YYYY-MM-DD"))?,
                    )
                };
            }
            "barcode" => {
                if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(FieldError::invalid(key, "letters and digits only"));
                }
                meta.barcode = non_empty(Some(value));
            }
            "notes" => self.notes = value.to_string(),
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Categories become subdirectories, so they must be a single path segment.
fn is_valid_category(category: &str) -> bool {
    !category.starts_with('.') && !category.contains(['/', '\\'])
}

/// Parses `2`, `1.5`, `1,5`, `1/2`, or `1 1/2`.
pub fn parse_quantity(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let fraction = |s: &str| -> Option<f64> {
        let (num, den) = s.split_once('/')?;
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        (den != 0.0).then(|| num / den)
    };

    let value = if let Some((whole, rest)) = input.split_once(' ') {
        whole.parse::<f64>().ok()? + fraction(rest.trim())?
    } else if input.contains('/') {
        fraction(input)?
    } else {
        input.replace(',', ".").parse().ok()?
    };

    value.is_finite().then_some(value)
}

/// Renders a quantity without trailing zeros (`2`, `1.5`, `0.333`).
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{quantity:.0}")
    } else {
        let s = format!("{quantity:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
