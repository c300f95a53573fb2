//! # UI Utilities
//!
//! Plain-terminal output shared by the commands: interactive mode
//! resolution, success/warning lines, and the pantry item table.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{io::IsTerminal, path::Path};

use owo_colors::OwoColorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    config::Config,
    constants::{UI_COL_CATEGORY_WIDTH, UI_COL_ID_WIDTH, UI_COL_QTY_WIDTH, UI_NAME_TRUNCATE_LEN},
    pantry::PantryItem,
};

// =============================================================================
// Interactive Mode Resolution
// =============================================================================

/// The `--interactive` / `--no-interactive` flag pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveArgs {
    pub interactive: bool,
    pub no_interactive: bool,
}

impl InteractiveArgs {
    /// Priority: `--interactive` > `--no-interactive` > config default
    pub const fn resolve(&self, config_default: bool) -> bool {
        if self.interactive {
            true
        } else if self.no_interactive {
            false
        } else {
            config_default
        }
    }

    /// Resolved mode, and only when stdout is a terminal.
    pub fn should_run(&self, config: &Config) -> bool {
        self.resolve(config.interactive()) && std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Prints `✓ {verb}: {relative_path}`.
pub fn print_success(verb: &str, config: &Config, path: &Path) {
    println!(
        "{} {verb}: {}",
        "✓".green(),
        config.relative_path(path).display()
    );
}

pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{} {warning}", "warning:".yellow());
    }
}

// =============================================================================
// Item Table
// =============================================================================

/// Truncates to `max` terminal columns, ending with `…` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// Left-aligns to `width` terminal columns.
pub fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Header line of the item table.
pub fn item_table_header() -> String {
    format!(
        "{} {} {} {} {}",
        pad("ID", UI_COL_ID_WIDTH),
        pad("Name", UI_NAME_TRUNCATE_LEN),
        pad("Qty", UI_COL_QTY_WIDTH),
        pad("Category", UI_COL_CATEGORY_WIDTH),
        "Expires"
    )
}

/// One item as a table row: ID | Name | Qty | Category | Expires.
pub fn item_table_row(item: &PantryItem) -> String {
    let expires = item
        .meta
        .expires_on
        .map(|d| d.to_string())
        .unwrap_or_default();
    format!(
        "{} {} {} {} {expires}",
        pad(&truncate(&item.meta.id, UI_COL_ID_WIDTH), UI_COL_ID_WIDTH),
        pad(&truncate(item.name(), UI_NAME_TRUNCATE_LEN), UI_NAME_TRUNCATE_LEN),
        pad(&truncate(&item.amount(), UI_COL_QTY_WIDTH), UI_COL_QTY_WIDTH),
        pad(
            &truncate(item.category().unwrap_or("-"), UI_COL_CATEGORY_WIDTH),
            UI_COL_CATEGORY_WIDTH
        ),
    )
    .trim_end()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pantry::ItemDraft, wizard::ImportMethod};

    #[test]
    fn test_truncate_counts_columns() {
        assert_eq!(truncate("Milk", 10), "Milk");
        assert_eq!(truncate("Buttermilch", 6), "Butte…");
        assert_eq!(truncate("日本語のお茶", 7), "日本語…");
    }

    #[test]
    fn test_row_contains_amount_and_category() {
        let item = PantryItem::from_draft(
            "260101-ABCD".to_string(),
            ItemDraft {
                quantity: Some(1.5),
                unit: Some("kg".to_string()),
                category: Some("baking".to_string()),
                ..ItemDraft::named("Flour")
            },
            ImportMethod::Text,
        )
        .unwrap();

        let row = item_table_row(&item);
        assert!(row.starts_with("260101-ABCD"));
        assert!(row.contains("1.5 kg"));
        assert!(row.ends_with("baking"));
    }

    #[test]
    fn test_interactive_flag_priority() {
        let forced = InteractiveArgs {
            interactive: true,
            no_interactive: true,
        };
        assert!(forced.resolve(false));
        let off = InteractiveArgs {
            interactive: false,
            no_interactive: true,
        };
        assert!(!off.resolve(true));
        assert!(InteractiveArgs::default().resolve(true));
    }
}
