//! # Commands
//!
//! CLI command implementations for homestock.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod catalog;
pub mod completions;
pub mod import;
pub mod init;
pub mod list;

pub use self::{
    catalog::CatalogEntry,
    completions::execute as completions,
    import::{execute as import, ImportArgs},
    init::execute as init,
    list::{execute as list, ListArgs},
};
