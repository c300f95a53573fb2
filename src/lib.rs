//! # homestock
//!
//! A household pantry tracker built around a multi-method import wizard.
//!
//! Pantry items are stored as plain Markdown files with YAML frontmatter,
//! making them human-readable, grep-friendly, and easy to keep in Git.
//!
//! ## Features
//!
//! - **Import Wizard**: Text, voice, photo, barcode, and digital receipt input,
//!   reviewed in one table before anything is saved
//! - **Pluggable Converters**: Recognition runs external commands
//! - **Barcode Catalog**: Household products remembered by barcode
//! - **Markdown Storage**: One file per item, organized by category
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod commands;
pub mod config;
pub mod constants;
pub mod converter;
pub mod id;
pub mod logging;
pub mod pantry;
pub mod storage;
pub mod tui;
pub mod ui;
pub mod wizard;

pub use config::{set_home_override, Config};
pub use pantry::{PantryHost, PantryItem};
pub use wizard::{ImportHost, ImportMethod, ImportWizard};
