//! # Staged Records
//!
//! The minimal capability the wizard needs from a host record type: a stable
//! identifier, a display name, and field access through column descriptors.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use super::error::FieldError;

/// Column descriptor used to render and edit a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Field key passed to [`StagedRecord::field`] / [`StagedRecord::set_field`]
    pub key: &'static str,
    /// Header label
    pub label: &'static str,
    /// Preferred display width in terminal cells
    pub width: u16,
    /// Whether the review stage may edit this field
    pub editable: bool,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str, width: u16) -> Self {
        Self {
            key,
            label,
            width,
            editable: true,
        }
    }

    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }
}

/// A client-side, not yet persisted record produced by an import method.
pub trait StagedRecord: Clone + Send + Sync {
    /// Stable, session-unique identifier
    fn id(&self) -> &str;

    /// Name shown in lists and matched by the quick filter
    fn display_name(&self) -> &str;

    /// Current value of a field, formatted for editing
    fn field(&self, key: &str) -> Option<String>;

    /// Replaces one field from user input
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// Columns shown by the review table
    fn columns() -> &'static [Column];
}

/// Checks if a record's display name contains any of the keywords (case-insensitive).
///
/// Empty keywords never match.
pub fn matches_any_keyword<K: AsRef<str>>(name: &str, keywords: &[K]) -> bool {
    let name_lower = name.to_lowercase();
    keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty())
        .any(|k| name_lower.contains(&k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert!(matches_any_keyword("Milk 2%", &["milk"]));
        assert!(matches_any_keyword("Oat milk", &["MILK"]));
        assert!(!matches_any_keyword("Bread", &["milk"]));
    }

    #[test]
    fn test_keywords_are_matched_verbatim() {
        assert!(!matches_any_keyword("Milk 2%", &[" milk"]));
        assert!(matches_any_keyword("Oat milk", &[" milk"]));
    }

    #[test]
    fn test_empty_keywords_never_match() {
        assert!(!matches_any_keyword("Bread", &[""]));
        let none: [&str; 0] = [];
        assert!(!matches_any_keyword("Bread", &none));
    }

    #[test]
    fn test_any_of_several_keywords() {
        assert!(matches_any_keyword("Plastic bag", &["deposit", "bag"]));
    }
}
