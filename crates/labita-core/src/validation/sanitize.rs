//! Keystroke-level input cleanup and blur-time formatting.

use super::field::parse_number;
use super::rules::{FieldRule, ValidationRules};

/// Strip everything but digits, one decimal point and one leading minus.
///
/// - Extra decimal points are dropped; the first one stays where it was.
/// - With several minus signs, all are removed and a single one is put back
///   at the front only if the input started with a minus.
/// - A lone minus anywhere but the front is removed.
pub fn sanitize_numeric(raw: &str) -> String {
    let trimmed = raw.trim();

    let mut out = String::with_capacity(trimmed.len());
    let mut seen_point = false;
    for c in trimmed.chars() {
        match c {
            '0'..='9' | '-' => out.push(c),
            '.' if !seen_point => {
                seen_point = true;
                out.push(c);
            }
            _ => {}
        }
    }

    let minus_count = out.matches('-').count();
    if minus_count > 1 {
        let digits = out.replace('-', "");
        if trimmed.starts_with('-') {
            format!("-{digits}")
        } else {
            digits
        }
    } else if minus_count == 1 && !out.starts_with('-') {
        out.replacen('-', "", 1)
    } else {
        out
    }
}

/// Re-render a numeric string with at most `rule.max_decimals` fractional
/// digits, trailing zeros trimmed. Non-numeric input is returned unchanged.
pub fn format_numeric(value: &str, rule: &FieldRule) -> String {
    if value.is_empty() {
        return String::new();
    }
    let Some(number) = parse_number(value) else {
        return value.to_string();
    };

    // A zero precision falls back to one decimal.
    let precision = rule.max_decimals.filter(|d| *d > 0).unwrap_or(1) as usize;
    let fixed = format!("{number:.precision$}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

impl ValidationRules {
    /// Sanitize `raw` for the field `name`. Fields without a numeric rule
    /// are returned untouched.
    pub fn sanitize_input(&self, raw: &str, name: &str) -> String {
        match self.rule_named(name) {
            Some(_) => sanitize_numeric(raw),
            None => raw.to_string(),
        }
    }

    /// Format `value` for display in the field `name`.
    pub fn format_value(&self, value: &str, name: &str) -> String {
        match self.rule_named(name) {
            Some((_, rule)) => format_numeric(value, rule),
            None => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_points_and_strips_minus() {
        // "1.2.3-4-5" -> "1.23-4-5" -> no leading minus, so all are stripped.
        assert_eq!(sanitize_numeric("1.2.3-4-5"), "1.2345");
    }

    #[test]
    fn test_multiple_minus_with_leading_minus() {
        assert_eq!(sanitize_numeric("-1-2"), "-12");
        assert_eq!(sanitize_numeric("--5.5"), "-5.5");
    }

    #[test]
    fn test_single_trailing_minus_removed() {
        assert_eq!(sanitize_numeric("12-"), "12");
        assert_eq!(sanitize_numeric("-12"), "-12");
    }

    #[test]
    fn test_strips_letters_and_spaces() {
        assert_eq!(sanitize_numeric(" 4a5,6 "), "456");
        assert_eq!(sanitize_numeric("L*=65.3"), "65.3");
    }

    #[test]
    fn test_unknown_field_untouched() {
        let rules = ValidationRules::default();
        assert_eq!(rules.sanitize_input("a-b.c.d", "comment"), "a-b.c.d");
        assert_eq!(rules.sanitize_input("1.2.3", "lValue1"), "1.23");
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        let rules = ValidationRules::default();
        assert_eq!(rules.format_value("65.50", "lValue1"), "65.5");
        assert_eq!(rules.format_value("100", "lValue1"), "100");
        assert_eq!(rules.format_value("12.345", "bValue1"), "12.35");
        assert_eq!(rules.format_value("-0.001", "bValue1"), "0");
        assert_eq!(rules.format_value("", "bValue1"), "");
        assert_eq!(rules.format_value("abc", "bValue1"), "abc");
    }

    #[test]
    fn test_format_is_idempotent() {
        let rules = ValidationRules::default();
        for raw in ["0", "1.5", "99.99", "-128", "-0.25", "7.10", "42."] {
            let once = rules.format_value(raw, "bValue2");
            let twice = rules.format_value(&once, "bValue2");
            assert_eq!(once, twice, "{raw}");
        }
    }
}
