//! Built-in shopping-list parser used when no text converter is configured.
//!
//! One item per line (or per comma on a single line). List markers such as
//! `-`, `*`, `1.` and `[x]` are dropped. A leading amount is recognized in the
//! forms `2 eggs`, `2x eggs`, `1.5 kg flour`, `1/2 l cream`, and `500g butter`.

use super::{parse_quantity, ItemDraft};

const UNITS: &[&str] = &[
    "kg", "g", "mg", "l", "ml", "cl", "dl", "lb", "lbs", "oz", "pcs", "pc", "pack", "packs",
    "can", "cans", "jar", "jars", "bottle", "bottles", "box", "boxes", "bag", "bags", "bunch",
    "dozen", "stk", "st",
];

/// Parses free text into item drafts.
pub fn parse(text: &str) -> Vec<ItemDraft> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let entries: Vec<&str> = if lines.len() == 1 {
        lines[0].split([',', ';']).collect()
    } else {
        lines
    };

    entries
        .into_iter()
        .map(strip_marker)
        .filter(|e| !e.is_empty())
        .filter_map(parse_entry)
        .collect()
}

fn strip_marker(entry: &str) -> &str {
    let mut s = entry.trim();
    for marker in ["[ ]", "[x]", "[X]"] {
        if let Some(rest) = s.strip_prefix(marker) {
            s = rest.trim_start();
        }
    }
    for bullet in ['-', '*', '•', '+'] {
        if let Some(rest) = s.strip_prefix(bullet) {
            s = rest.trim_start();
            break;
        }
    }
    // Checkbox after bullet: "- [ ] milk"
    for marker in ["[ ]", "[x]", "[X]"] {
        if let Some(rest) = s.strip_prefix(marker) {
            s = rest.trim_start();
        }
    }
    // Numbered list: "1. milk" or "2) milk"
    if let Some(pos) = s.find(['.', ')']) {
        let (head, rest) = s.split_at(pos);
        if !head.is_empty()
            && head.chars().all(|c| c.is_ascii_digit())
            && rest[1..].starts_with(' ')
        {
            s = rest[1..].trim_start();
        }
    }
    s
}

fn parse_entry(entry: &str) -> Option<ItemDraft> {
    let words: Vec<&str> = entry.split_whitespace().collect();
    let (quantity, unit, consumed) = leading_amount(&words);

    let name = words[consumed..].join(" ");
    let name = name.trim_matches(|c: char| c == ',' || c == '.' || c.is_whitespace());
    if name.is_empty() {
        return None;
    }

    Some(ItemDraft {
        quantity,
        unit,
        ..ItemDraft::named(name)
    })
}

/// Returns quantity, unit, and how many words they used.
fn leading_amount(words: &[&str]) -> (Option<f64>, Option<String>, usize) {
    let Some(&first) = words.first() else {
        return (None, None, 0);
    };

    // "2x" or "x2"
    let bare = first
        .strip_suffix(['x', 'X'])
        .or_else(|| first.strip_prefix(['x', 'X']))
        .unwrap_or(first);

    let (quantity, mut used, glued_unit) = if let Some(q) = parse_quantity(bare) {
        // "1 1/2"
        match words.get(1).filter(|w| w.contains('/')) {
            Some(frac) => match parse_quantity(&format!("{bare} {frac}")) {
                Some(q) => (q, 2, None),
                None => (q, 1, None),
            },
            None => (q, 1, None),
        }
    } else if let Some((q, unit)) = split_glued(first) {
        (q, 1, Some(unit))
    } else {
        return (None, None, 0);
    };

    if words.len() <= used {
        // A bare number is a name, not an amount
        return (None, None, 0);
    }

    let mut unit = glued_unit;
    if unit.is_none() {
        if let Some(candidate) = words.get(used).map(|w| w.to_lowercase()) {
            let candidate = candidate.trim_end_matches('.');
            if UNITS.contains(&candidate) && words.len() > used + 1 {
                unit = Some(candidate.to_string());
                used += 1;
            }
        }
    }
    // "2 x milk"
    if words.get(used).is_some_and(|w| w.eq_ignore_ascii_case("x")) && words.len() > used + 1 {
        used += 1;
    }

    (Some(quantity), unit, used)
}

/// Splits `500g` into `(500.0, "g")` when the suffix is a known unit.
fn split_glued(word: &str) -> Option<(f64, String)> {
    let split = word.find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))?;
    let (number, unit) = word.split_at(split);
    let unit = unit.to_lowercase();
    if number.is_empty() || !UNITS.contains(&unit.as_str()) {
        return None;
    }
    Some((parse_quantity(number)?, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(drafts: &[ItemDraft]) -> Vec<(String, Option<f64>, Option<String>)> {
        drafts
            .iter()
            .map(|d| (d.name.clone(), d.quantity, d.unit.clone()))
            .collect()
    }

    #[test]
    fn test_lines_with_markers() {
        let drafts = parse("- 2 milk\n* [x] bread\n3. 6x eggs\n\n- [ ] 500g butter\n");
        assert_eq!(
            summary(&drafts),
            vec![
                ("milk".to_string(), Some(2.0), None),
                ("bread".to_string(), None, None),
                ("eggs".to_string(), Some(6.0), None),
                ("butter".to_string(), Some(500.0), Some("g".to_string())),
            ]
        );
    }

    #[test]
    fn test_single_line_commas() {
        let drafts = parse("milk, 1.5 kg flour, 1 1/2 l cream");
        assert_eq!(
            summary(&drafts),
            vec![
                ("milk".to_string(), None, None),
                ("flour".to_string(), Some(1.5), Some("kg".to_string())),
                ("cream".to_string(), Some(1.5), Some("l".to_string())),
            ]
        );
    }

    #[test]
    fn test_multiplier_forms() {
        let drafts = parse("2 x apples\nx3 lemons");
        assert_eq!(
            summary(&drafts),
            vec![
                ("apples".to_string(), Some(2.0), None),
                ("lemons".to_string(), Some(3.0), None),
            ]
        );
    }

    #[test]
    fn test_number_only_is_a_name() {
        let drafts = parse("7up\n42");
        assert_eq!(drafts[0].name, "7up");
        assert_eq!(drafts[1].name, "42");
        assert_eq!(drafts[1].quantity, None);
    }

    #[test]
    fn test_unit_word_needs_a_name_after_it() {
        let drafts = parse("2 bags");
        assert_eq!(summary(&drafts), vec![("bags".to_string(), Some(2.0), None)]);
    }

    #[test]
    fn test_blank_input() {
        assert!(parse("  \n - \n").is_empty());
    }
}
