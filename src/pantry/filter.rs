//! # Search and Filter
//!
//! Pantry item filtering and sorting used by `hs list`.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};

use super::PantryItem;

/// Filter criteria; empty/None fields match everything.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Matches name, ID, barcode, and notes (case-insensitive).
    pub search: String,
    /// Category (case-insensitive); "uncategorized" matches items without one.
    pub category: Option<String>,
    /// Only items expiring on or before `today + days`.
    pub expiring_within: Option<u64>,
}

/// Sort order for item lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortBy {
    /// Alphabetical by name
    Name,
    /// Most recently added first
    #[default]
    Date,
    /// Soonest expiry first; items without a date last
    Expiry,
}

impl FilterCriteria {
    pub fn matches(&self, item: &PantryItem, today: NaiveDate) -> bool {
        if !self.search.is_empty() && !matches_search(item, &self.search) {
            return false;
        }
        if let Some(category) = &self.category {
            if !matches_category(item.category(), category) {
                return false;
            }
        }
        if let Some(days) = self.expiring_within {
            let Some(expires) = item.meta.expires_on else {
                return false;
            };
            let limit = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
            if expires > limit {
                return false;
            }
        }
        true
    }
}

fn matches_search(item: &PantryItem, query: &str) -> bool {
    let query = query.to_lowercase();
    let meta = &item.meta;
    meta.name.to_lowercase().contains(&query)
        || meta.id.to_lowercase().contains(&query)
        || meta.barcode.as_deref().is_some_and(|b| b.contains(&query))
        || item.notes.to_lowercase().contains(&query)
}

fn matches_category(item_category: Option<&str>, filter: &str) -> bool {
    item_category.map_or_else(
        || filter.eq_ignore_ascii_case("uncategorized"),
        |cat| cat.eq_ignore_ascii_case(filter),
    )
}

/// Sorts items in place.
pub fn sort_items(items: &mut [PantryItem], by: SortBy) {
    match by {
        SortBy::Name => items.sort_by_key(|i| i.meta.name.to_lowercase()),
        SortBy::Date => items.sort_by(|a, b| b.meta.added_at.cmp(&a.meta.added_at)),
        SortBy::Expiry => items.sort_by(|a, b| match (a.meta.expires_on, b.meta.expires_on) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.meta.name.cmp(&b.meta.name),
        }),
    }
}
