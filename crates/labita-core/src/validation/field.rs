//! Single-field validation.
//!
//! Check order:
//! 1. empty input against `required` (stops here)
//! 2. numeric parse (stops here)
//! 3. decimal places, sign, range, zero (all accumulated)

use crate::field::FieldName;
use crate::message::Message;
use crate::outcome::Outcome;

use super::rules::{FieldRule, ValidationRules};

/// Result of validating one field: the parsed value (`None` for an empty
/// optional field) or every problem found.
pub type ValidationResult = Outcome<Option<f64>>;

/// Parse a trimmed numeric string. Non-finite values are not numbers.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Count fractional digits as typed (`"1.50"` has two).
pub(crate) fn decimal_places(raw: &str) -> u32 {
    raw.trim()
        .split_once('.')
        .map_or(0, |(_, frac)| frac.chars().count() as u32)
}

/// Validate `raw` against `rule`. Never fails; problems are returned as data.
pub fn validate_value(rule: &FieldRule, field: FieldName, raw: &str) -> ValidationResult {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return if rule.required {
            Outcome::error(vec![Message::Required])
        } else {
            Outcome::ok(None)
        };
    }

    let Some(value) = parse_number(trimmed) else {
        return Outcome::error(vec![Message::InvalidNumber]);
    };

    let mut errors = Vec::new();

    if let Some(max_decimals) = rule.max_decimals
        && decimal_places(trimmed) > max_decimals
    {
        errors.push(Message::TooManyDecimals(max_decimals));
    }

    if !rule.allow_negative && value < 0.0 {
        errors.push(Message::NegativeNotAllowed);
    }

    let below = rule.min.is_some_and(|min| value < min);
    let above = rule.max.is_some_and(|max| value > max);
    if below || above {
        errors.push(rule.range_message(field.channel));
    }

    if rule.reject_zero && value == 0.0 {
        errors.push(Message::ZeroB);
    }

    Outcome::from_errors(Some(value), errors)
}

impl ValidationRules {
    /// Validate a field by its form identifier. Fields without a rule are
    /// always valid.
    pub fn validate_field(&self, name: &str, raw: &str) -> ValidationResult {
        match self.rule_named(name) {
            Some((field, rule)) => validate_value(rule, field, raw),
            None => Outcome::ok(parse_number(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Channel;

    fn rules() -> ValidationRules {
        ValidationRules::default()
    }

    #[test]
    fn test_required_stops_further_checks() {
        let result = rules().validate_field("bValue1", "   ");
        assert_eq!(result.errors(), &[Message::Required]);
    }

    #[test]
    fn test_non_numeric_stops_further_checks() {
        let result = rules().validate_field("lValue1", "abc");
        assert_eq!(result.errors(), &[Message::InvalidNumber]);
    }

    #[test]
    fn test_non_finite_is_not_a_number() {
        for raw in ["inf", "NaN", "-infinity"] {
            let result = rules().validate_field("bValue1", raw);
            assert_eq!(result.errors(), &[Message::InvalidNumber], "{raw}");
        }
    }

    #[test]
    fn test_l_star_out_of_range_message() {
        let result = rules().validate_field("lValue", "150");
        assert_eq!(
            result.errors(),
            &[Message::ChannelRange {
                channel: Channel::L,
                min: 0.0,
                max: 100.0
            }]
        );
    }

    #[test]
    fn test_violations_accumulate() {
        // Negative, out of range and too precise all at once.
        let result = rules().validate_field("lValue2", "-5.123");
        assert_eq!(
            result.errors(),
            &[
                Message::TooManyDecimals(2),
                Message::NegativeNotAllowed,
                Message::ChannelRange {
                    channel: Channel::L,
                    min: 0.0,
                    max: 100.0
                },
            ]
        );
    }

    #[test]
    fn test_legacy_b_rejects_zero_but_slot_b_does_not() {
        assert_eq!(rules().validate_field("bValue", "0").errors(), &[Message::ZeroB]);
        assert_eq!(rules().validate_field("bValue1", "0").value(), Some(&Some(0.0)));
    }

    #[test]
    fn test_valid_value_is_returned() {
        let result = rules().validate_field("bValue3", " -12.5 ");
        assert_eq!(result.value(), Some(&Some(-12.5)));
    }

    #[test]
    fn test_unknown_field_is_valid() {
        assert!(rules().validate_field("notes", "anything").is_ok());
    }

    #[test]
    fn test_optional_empty_is_valid() {
        let rule = FieldRule {
            required: false,
            ..FieldRule::ranged(0.0, 1.0)
        };
        let result = validate_value(&rule, FieldName::legacy(Channel::L), "");
        assert_eq!(result, Outcome::ok(None));
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places("12"), 0);
        assert_eq!(decimal_places("12."), 0);
        assert_eq!(decimal_places("1.50"), 2);
        assert_eq!(decimal_places("-0.125"), 3);
    }
}
