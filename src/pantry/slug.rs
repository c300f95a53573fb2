//! # Slugification
//!
//! Turns item names into filesystem-friendly file name parts. Common
//! German and French letters are transliterated before everything outside
//! ASCII alphanumerics collapses into single hyphens.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use crate::constants::MAX_SLUG_LENGTH;

fn transliterate(c: char) -> Option<&'static str> {
    Some(match c {
        'ä' | 'Ä' => "ae",
        'ö' | 'Ö' => "oe",
        'ü' | 'Ü' => "ue",
        'ß' => "ss",
        'à' | 'á' | 'â' | 'À' | 'Á' | 'Â' => "a",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ò' | 'ó' | 'ô' => "o",
        'ù' | 'ú' | 'û' => "u",
        'ç' | 'Ç' => "c",
        'ñ' | 'Ñ' => "n",
        _ => return None,
    })
}

/// Converts an item name into a slug.
///
/// ```
/// use homestock::pantry::slug::slugify;
/// assert_eq!(slugify("Äpfel (Braeburn) 1kg"), "aepfel-braeburn-1kg");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        let part = if c.is_ascii_alphanumeric() {
            c.to_ascii_lowercase().to_string()
        } else if let Some(ascii) = transliterate(c) {
            ascii.to_string()
        } else {
            pending_hyphen = true;
            continue;
        };
        if pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        pending_hyphen = false;
        slug.push_str(&part);
    }

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        // Prefer cutting at a word boundary
        if let Some(cut) = slug.rfind('-').filter(|&cut| cut > MAX_SLUG_LENGTH / 2) {
            slug.truncate(cut);
        }
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("Whole Milk 3.5%"), "whole-milk-3-5");
    }

    #[test]
    fn test_transliteration() {
        assert_eq!(slugify("Räucherlachs"), "raeucherlachs");
        assert_eq!(slugify("Crème fraîche"), "creme-fraiche");
        assert_eq!(slugify("Weißbrot"), "weissbrot");
    }

    #[test]
    fn test_leading_trailing_separators() {
        assert_eq!(slugify("  --Eggs--  "), "eggs");
    }

    #[test]
    fn test_truncation_at_word_boundary() {
        let slug = slugify("Organic free range eggs from the farm down the road near the river");
        assert!(slug.len() <= MAX_SLUG_LENGTH);
        assert!(!slug.ends_with('-'));
        assert!(slug.starts_with("organic-free-range-eggs"));
    }

    #[test]
    fn test_only_symbols() {
        assert_eq!(slugify("!@#$%"), "");
        assert_eq!(slugify(""), "");
    }
}
