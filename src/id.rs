//! # ID Generation
//!
//! Client-side identifiers for staged pantry items, generated from a
//! configurable pattern. Default pattern: `%y%m%d-%T%RRR` (e.g., `260109-02F7K9M`)
//!
//! ## Tokens
//! - `%y`, `%m`, `%d`: Year, Month, Day (2 digits)
//! - `%j`: Day of year (001-366)
//! - `%T`: Crockford Base32 time (4 chars, seconds since midnight UTC)
//! - `%R`: Crockford Base32 random (count of R determines length)
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{collections::HashSet, fmt::Write};

use chrono::{DateTime, Datelike, Timelike, Utc};
use rand::Rng;

/// Default ID pattern: YYMMDD-TTTTRRR
pub const DEFAULT_PATTERN: &str = "%y%m%d-%T%RRR";

/// Crockford's Base32 alphabet (excludes I, L, O, U for readability)
const CROCKFORD: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Attempts before a collision-prone pattern is widened with extra random chars.
const MAX_ATTEMPTS: usize = 16;

fn base32_char(index: u64) -> char {
    char::from(CROCKFORD[(index % 32) as usize])
}

/// Fixed-width Base32 rendering of a number, left-padded with '0'.
fn encode_base32(mut value: u64, width: usize) -> String {
    let mut digits = vec!['0'; width];
    for slot in digits.iter_mut().rev() {
        *slot = base32_char(value);
        value /= 32;
    }
    digits.into_iter().collect()
}

/// Generates an ID from the given pattern at the current time.
pub fn generate(pattern: &str) -> String {
    generate_at(pattern, Utc::now())
}

fn generate_at(pattern: &str, now: DateTime<Utc>) -> String {
    let mut result = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    let mut rng = rand::rng();

    while let Some(c) = chars.next() {
        if c != '%' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('y') => {
                let _ = write!(result, "{:02}", now.year() % 100);
            }
            Some('m') => {
                let _ = write!(result, "{:02}", now.month());
            }
            Some('d') => {
                let _ = write!(result, "{:02}", now.day());
            }
            Some('j') => {
                let _ = write!(result, "{:03}", now.ordinal());
            }
            Some('T') => {
                let seconds = u64::from(now.num_seconds_from_midnight());
                result.push_str(&encode_base32(seconds, 4));
            }
            Some('R') => {
                let mut count = 1;
                while chars.peek() == Some(&'R') {
                    chars.next();
                    count += 1;
                }
                for _ in 0..count {
                    result.push(base32_char(rng.random_range(0..32)));
                }
            }
            Some('%') | None => result.push('%'),
            Some(other) => {
                // Unknown token, keep as-is
                result.push('%');
                result.push(other);
            }
        }
    }

    result
}

/// Hands out IDs that are unique within one import session.
///
/// Items staged in the same second share the date and time part, so every
/// issued ID is remembered and a colliding candidate is regenerated. Patterns
/// without random tokens get random characters appended after repeated
/// collisions.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    pattern: String,
    taken: HashSet<String>,
}

impl IdAllocator {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            taken: HashSet::new(),
        }
    }

    /// Marks IDs as unavailable (e.g. those already in the pantry).
    pub fn reserve<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taken.extend(ids.into_iter().map(Into::into));
    }

    pub fn next_id(&mut self) -> String {
        let mut pattern = self.pattern.clone();
        loop {
            for _ in 0..MAX_ATTEMPTS {
                let candidate = generate(&pattern);
                if self.taken.insert(candidate.clone()) {
                    return candidate;
                }
            }
            pattern.push_str("%R");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_default_pattern_format() {
        let id = generate(DEFAULT_PATTERN);
        // YYMMDD-TTTTRRR
        assert_eq!(id.len(), 14);
        assert_eq!(&id[6..7], "-");
    }

    #[test]
    fn test_fixed_time_tokens() {
        let at = Utc.with_ymd_and_hms(2026, 1, 9, 0, 0, 32).unwrap();
        assert_eq!(generate_at("%y%m%d-%j-%T", at), "260109-009-0010");
    }

    #[test]
    fn test_random_length_and_alphabet() {
        let id = generate("%RRRRRR");
        assert_eq!(id.len(), 6);
        assert!(id.chars().all(|c| CROCKFORD.contains(&(c as u8))));
        assert!(!id.contains(['I', 'L', 'O', 'U']));
    }

    #[test]
    fn test_literal_and_escape() {
        assert_eq!(generate("100%%"), "100%");
        assert_eq!(generate("a%qb"), "a%qb");
    }

    #[test]
    fn test_encode_base32_width() {
        assert_eq!(encode_base32(0, 4), "0000");
        assert_eq!(encode_base32(32, 4), "0010");
        assert_eq!(encode_base32(86399, 4).len(), 4);
    }

    #[test]
    fn test_allocator_never_repeats() {
        let mut ids = IdAllocator::new("item");
        ids.reserve(["item"]);
        let issued: HashSet<String> = (0..50).map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 50);
        assert!(!issued.contains("item"));
    }
}
