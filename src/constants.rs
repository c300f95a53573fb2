//! # Constants
//!
//! Centralized constants for magic values used throughout homestock.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

// =============================================================================
// Import Wizard
// =============================================================================

/// Minimum number of non-whitespace characters accepted by text import.
pub const MIN_TEXT_LENGTH: usize = 3;

/// Environment variable carrying the import type to image converters.
pub const IMPORT_TYPE_ENV: &str = "HOMESTOCK_IMPORT_TYPE";

/// Environment variable controlling the log filter (`tracing` directives).
pub const LOG_FILTER_ENV: &str = "HOMESTOCK_LOG";

/// Default log filter when `LOG_FILTER_ENV` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

// =============================================================================
// UI Display
// =============================================================================

/// Maximum length for name display in lists (truncated with ellipsis).
pub const UI_NAME_TRUNCATE_LEN: usize = 40;

/// Column width for ID in list display.
pub const UI_COL_ID_WIDTH: usize = 15;

/// Column width for quantity in list display.
pub const UI_COL_QTY_WIDTH: usize = 10;

/// Column width for category in list display.
pub const UI_COL_CATEGORY_WIDTH: usize = 14;

// =============================================================================
// Item Format
// =============================================================================

/// Maximum slug length in characters (not bytes).
pub const MAX_SLUG_LENGTH: usize = 50;

/// YAML frontmatter delimiter.
pub const FRONTMATTER_DELIMITER: &str = "---";

// =============================================================================
// File System
// =============================================================================

/// File extension for item files.
pub const ITEM_FILE_EXTENSION: &str = "md";

/// Default directory name for storing pantry items.
pub const DEFAULT_PANTRY_DIR: &str = "pantry";

/// Barcode catalog file name (inside the pantry directory).
pub const DEFAULT_CATALOG_FILE: &str = ".catalog.toml";

/// Project configuration file name.
pub const PROJECT_CONFIG_FILENAME: &str = ".homestock";

/// Global configuration directory name (inside user's config directory).
pub const GLOBAL_CONFIG_DIR: &str = "homestock";

/// Global configuration file name (inside `GLOBAL_CONFIG_DIR`).
pub const GLOBAL_CONFIG_FILENAME: &str = "config";

/// Log directory name (inside `GLOBAL_CONFIG_DIR`).
pub const LOG_DIR: &str = "logs";

/// Log file prefix; the daily appender adds the date suffix.
pub const LOG_FILE_PREFIX: &str = "homestock.log";
