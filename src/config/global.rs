//! # Global Configuration
//!
//! Handles the global user configuration stored at `~/.config/homestock/config`.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{GLOBAL_CONFIG_DIR, GLOBAL_CONFIG_FILENAME, LOG_DIR},
    id::DEFAULT_PATTERN,
};

/// Valid top-level keys in the global config file.
const VALID_FIELDS: &[&str] = &["interactive", "id_pattern", "converters"];

/// Valid keys in the `[converters]` table.
const VALID_CONVERTERS: &[&str] = &["text", "voice", "photo", "receipt", "barcode", "record", "scan"];

thread_local! {
    /// Thread-local override for the home directory path.
    /// Used by integration tests to redirect config to a temp directory
    /// without modifying environment variables.
    static HOME_OVERRIDE: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Sets a thread-local override for the home directory.
pub fn set_home_override(path: Option<PathBuf>) {
    HOME_OVERRIDE.with(|cell| {
        *cell.borrow_mut() = path;
    });
}

fn get_home_override() -> Option<PathBuf> {
    HOME_OVERRIDE.with(|cell| cell.borrow().clone())
}

/// External commands standing in for transcription, OCR, and lookup services.
///
/// Each value is a shell-style command line. Artifact paths or URLs are
/// appended as trailing arguments when the command runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Converters {
    /// Parses free text from stdin (built-in line parser when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Transcribes and parses an audio file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Parses one or more image files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Fetches and parses a digital receipt URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,

    /// Resolves a barcode not found in the project catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    /// Records audio until stopped; receives the output file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,

    /// Reads one barcode from a camera and prints it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan: Option<String>,
}

/// Global configuration stored at ~/.config/homestock/config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Whether `hs import` opens the interactive wizard
    #[serde(default = "default_true")]
    pub interactive: bool,

    /// ID pattern for generating unique identifiers
    #[serde(default = "default_id_pattern")]
    pub id_pattern: String,

    #[serde(default)]
    pub converters: Converters,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            id_pattern: DEFAULT_PATTERN.to_string(),
            converters: Converters::default(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)] // serde default functions can't be const
fn default_true() -> bool {
    true
}

fn default_id_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl GlobalConfig {
    /// Returns the path to the global config directory (~/.config/homestock)
    ///
    /// Checks for a thread-local home override first (used by tests),
    /// then falls back to $HOME/.config (XDG Base Directory).
    pub fn dir() -> Option<PathBuf> {
        if let Some(home) = get_home_override() {
            return Some(home.join(".config").join(GLOBAL_CONFIG_DIR));
        }
        dirs::home_dir().map(|home| home.join(".config").join(GLOBAL_CONFIG_DIR))
    }

    /// Returns the path to the global config file (~/.config/homestock/config)
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|dir| dir.join(GLOBAL_CONFIG_FILENAME))
    }

    /// Returns the log directory (~/.config/homestock/logs)
    pub fn log_dir() -> Option<PathBuf> {
        Self::dir().map(|dir| dir.join(LOG_DIR))
    }

    /// Loads the global config. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            anyhow::bail!("Could not determine home directory");
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read global config: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config: {}", path.display()))
    }

    /// Creates the global config with default values and comments.
    /// Returns true if created, false if already exists.
    pub fn create_default_if_missing() -> Result<bool> {
        let Some(path) = Self::path() else {
            anyhow::bail!("Could not determine config directory");
        };

        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        Self::save_with_comments(&path, &Self::default())?;
        Ok(true)
    }

    fn save_with_comments(path: &Path, config: &Self) -> Result<()> {
        let converter_line = |value: &Option<String>, key: &str, example: &str| {
            value.as_ref().map_or_else(
                || format!("# {key} = \"{example}\""),
                |v| format!("{key} = {}", toml::Value::String(v.clone())),
            )
        };
        let c = &config.converters;

        let content = format!(
            r#"# homestock Global Configuration
# Location: ~/.config/homestock/config

# Whether `hs import` opens the interactive import wizard.
# Set to false for scripting; pass flags such as --method and --text instead.
# Default: true
interactive = {interactive}

# Pattern for generating item IDs.
# Tokens: %y %m %d %j (date), %T (time as Base32), %R (random Base32), %% (literal)
# Default: "%y%m%d-%T%RRR" (e.g., "260109-0A2BK4M")
id_pattern = "{id_pattern}"

# External converter commands. Each command prints a YAML or JSON list of
# items on stdout, e.g. [{{name: "Milk", quantity: 2, unit: "l"}}].
# Artifact paths and URLs are appended as arguments. Photo converters get the
# import type (receipt, groceries, product) in $HOMESTOCK_IMPORT_TYPE.
[converters]
{text}
{voice}
{photo}
{receipt}
{barcode}
{record}
{scan}
"#,
            interactive = config.interactive,
            id_pattern = config.id_pattern,
            text = converter_line(&c.text, "text", "my-llm-parse"),
            voice = converter_line(&c.voice, "voice", "whisper-to-items"),
            photo = converter_line(&c.photo, "photo", "ocr-to-items"),
            receipt = converter_line(&c.receipt, "receipt", "fetch-receipt"),
            barcode = converter_line(&c.barcode, "barcode", "lookup-ean"),
            record = converter_line(&c.record, "record", "arecord -f cd"),
            scan = converter_line(&c.scan, "scan", "zbarcam --oneshot --raw"),
        );

        fs::write(path, content)
            .with_context(|| format!("Failed to write global config: {}", path.display()))
    }

    /// Returns the names of unrecognized keys in the global config file.
    pub fn unknown_fields() -> Result<Vec<String>> {
        let Some(path) = Self::path() else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read global config: {}", path.display()))?;
        let table: toml::Table = toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config: {}", path.display()))?;

        let mut unknown: Vec<String> = table
            .keys()
            .filter(|key| !VALID_FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();
        if let Some(toml::Value::Table(converters)) = table.get("converters") {
            unknown.extend(
                converters
                    .keys()
                    .filter(|key| !VALID_CONVERTERS.contains(&key.as_str()))
                    .map(|key| format!("converters.{key}")),
            );
        }
        Ok(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert!(config.interactive);
        assert_eq!(config.id_pattern, DEFAULT_PATTERN);
        assert_eq!(config.converters, Converters::default());
    }

    #[test]
    fn test_parse_converters() {
        let toml = r#"
interactive = false

[converters]
photo = "ocr-items --lang de"
scan = "zbarcam --oneshot"
"#;
        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert!(!config.interactive);
        assert_eq!(
            config.converters.photo.as_deref(),
            Some("ocr-items --lang de")
        );
        assert_eq!(config.converters.scan.as_deref(), Some("zbarcam --oneshot"));
        assert!(config.converters.text.is_none());
    }

    #[test]
    fn test_home_override() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let expected_path = temp
            .path()
            .join(".config")
            .join("homestock")
            .join("config");

        set_home_override(Some(temp.path().to_path_buf()));
        assert_eq!(GlobalConfig::path().unwrap(), expected_path);
        assert_eq!(
            GlobalConfig::log_dir().unwrap(),
            temp.path().join(".config").join("homestock").join("logs")
        );

        set_home_override(None);
        let path = GlobalConfig::path();
        assert!(path.is_some());
        assert_ne!(path.unwrap(), expected_path);
    }

    #[test]
    fn test_commented_default_round_trips() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        set_home_override(Some(temp.path().to_path_buf()));

        assert!(GlobalConfig::create_default_if_missing().unwrap());
        assert!(!GlobalConfig::create_default_if_missing().unwrap());
        let loaded = GlobalConfig::load().unwrap();
        assert!(loaded.interactive);
        assert!(GlobalConfig::unknown_fields().unwrap().is_empty());

        set_home_override(None);
    }

    #[test]
    fn test_unknown_fields_reported() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        set_home_override(Some(temp.path().to_path_buf()));
        let path = GlobalConfig::path().unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "editor = \"vi\"\n[converters]\nocr = \"x\"\n").unwrap();

        let unknown = GlobalConfig::unknown_fields().unwrap();
        assert_eq!(unknown, vec!["editor".to_string(), "converters.ocr".to_string()]);

        set_home_override(None);
    }
}
