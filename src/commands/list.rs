//! # List Command
//!
//! Lists pantry items with filtering and sorting options.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use crate::{
    config::Config,
    pantry::filter::{self, FilterCriteria, SortBy},
    storage, ui,
};

/// Options for `hs list`.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub category: Option<String>,
    pub search: Option<String>,
    pub expiring: Option<u64>,
    pub sort: SortBy,
}

/// Executes the list command.
pub fn execute(args: &ListArgs) -> Result<()> {
    let config = Config::load()?;
    let (mut items, warnings) = storage::load_items(&config);
    ui::print_warnings(&warnings);

    let criteria = FilterCriteria {
        search: args.search.clone().unwrap_or_default(),
        category: args.category.clone(),
        expiring_within: args.expiring,
    };
    let today = Local::now().date_naive();
    items.retain(|item| criteria.matches(item, today));
    filter::sort_items(&mut items, args.sort);

    if items.is_empty() {
        println!("{}", "No items found.".dimmed());
        return Ok(());
    }

    println!("{}", ui::item_table_header().bold());
    for item in &items {
        let row = ui::item_table_row(item);
        match item.meta.expires_on {
            Some(date) if date < today => println!("{}", row.red()),
            _ => println!("{row}"),
        }
    }
    println!("{}", format!("{} item(s)", items.len()).dimmed());
    Ok(())
}
