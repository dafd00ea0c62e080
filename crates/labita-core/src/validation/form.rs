//! Whole-form validation: the three-slot measurement form and the legacy
//! single-measurement form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{FieldName, Slot};
use crate::measurement::Measurement;
use crate::message::Message;
use crate::outcome::Outcome;

use super::field::{ValidationResult, validate_value};
use super::rules::ValidationRules;

/// Raw form contents: field identifier → text as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Text for `field`, empty when absent.
    pub fn get(&self, field: FieldName) -> &str {
        self.0
            .get(&field.to_string())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when the field holds anything but whitespace.
    fn has_content(&self, field: FieldName) -> bool {
        !self.get(field).trim().is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Result of validating the multi-measurement form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    pub is_valid: bool,
    /// Per-field results in form order.
    pub fields: BTreeMap<FieldName, ValidationResult>,
    /// Every problem, in form order. A pair-completeness problem is listed
    /// once per pair even though both fields carry it.
    pub errors: Vec<Message>,
    /// Pairs whose fields both passed, in slot order.
    pub valid_measurements: Vec<Measurement>,
    /// Slots that were filled in at all; slot 1 always counts.
    pub measurement_count: usize,
}

/// Result of validating an arbitrary set of fields independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsValidation {
    pub is_valid: bool,
    pub fields: BTreeMap<String, ValidationResult>,
    pub errors: Vec<Message>,
}

impl ValidationRules {
    /// Validate up to three L*/b* pairs.
    ///
    /// Slot 1 is validated unconditionally. For slots 2 and 3: both fields
    /// empty is valid, exactly one filled marks both fields with the pair
    /// message, both filled runs ordinary field validation.
    pub fn validate_multiple_measurements(&self, form: &FormData) -> FormValidation {
        let mut fields = BTreeMap::new();
        let mut errors = Vec::new();
        let mut valid_measurements = Vec::new();
        let mut measurement_count = 0;

        for slot in Slot::all() {
            let [l_field, b_field] = FieldName::pair(slot);
            let l_filled = form.has_content(l_field);
            let b_filled = form.has_content(b_field);

            if slot.is_mandatory() || l_filled || b_filled {
                measurement_count += 1;
            }

            let (l_result, b_result) = if slot.is_mandatory() || (l_filled && b_filled) {
                let l_result = validate_value(self.rule(l_field), l_field, form.get(l_field));
                let b_result = validate_value(self.rule(b_field), b_field, form.get(b_field));
                errors.extend_from_slice(l_result.errors());
                errors.extend_from_slice(b_result.errors());
                (l_result, b_result)
            } else if l_filled || b_filled {
                let incomplete = Message::PairIncomplete(slot);
                errors.push(incomplete.clone());
                (
                    Outcome::error(vec![incomplete.clone()]),
                    Outcome::error(vec![incomplete]),
                )
            } else {
                (Outcome::ok(None), Outcome::ok(None))
            };

            if let (Some(Some(l)), Some(Some(b))) = (l_result.value(), b_result.value()) {
                valid_measurements.push(Measurement::new(*l, *b));
            }

            fields.insert(l_field, l_result);
            fields.insert(b_field, b_result);
        }

        tracing::debug!(
            measurement_count,
            valid = valid_measurements.len(),
            errors = errors.len(),
            "validated measurement form"
        );

        FormValidation {
            is_valid: errors.is_empty(),
            fields,
            errors,
            valid_measurements,
            measurement_count,
        }
    }

    /// Validate every field present in `form` on its own.
    pub fn validate_form(&self, form: &FormData) -> FieldsValidation {
        let mut fields = BTreeMap::new();
        let mut errors = Vec::new();

        for (name, value) in form.iter() {
            let result = self.validate_field(name, value);
            errors.extend_from_slice(result.errors());
            fields.insert(name.to_string(), result);
        }

        FieldsValidation {
            is_valid: errors.is_empty(),
            fields,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Channel;

    fn slot(n: u8) -> Slot {
        Slot::new(n).unwrap()
    }

    fn field(name: &str) -> FieldName {
        name.parse().unwrap()
    }

    #[test]
    fn test_first_slot_only() {
        let form = FormData::new().with("lValue1", "70").with("bValue1", "20");
        let result = ValidationRules::default().validate_multiple_measurements(&form);

        assert!(result.is_valid);
        assert_eq!(result.valid_measurements, vec![Measurement::new(70.0, 20.0)]);
        assert_eq!(result.measurement_count, 1);
        // Empty optional slots are valid and empty.
        assert_eq!(result.fields[&field("lValue2")], Outcome::ok(None));
        assert_eq!(result.fields[&field("bValue3")], Outcome::ok(None));
    }

    #[test]
    fn test_first_slot_missing_b() {
        let form = FormData::new().with("lValue1", "70").with("bValue1", "");
        let result = ValidationRules::default().validate_multiple_measurements(&form);

        assert!(!result.is_valid);
        assert_eq!(result.fields[&field("bValue1")].errors(), &[Message::Required]);
        assert_eq!(result.errors, vec![Message::Required]);
        assert!(result.valid_measurements.is_empty());
    }

    #[test]
    fn test_half_filled_pair_marks_both_fields() {
        let form = FormData::new()
            .with("lValue1", "70")
            .with("bValue1", "20")
            .with("lValue2", "60");
        let result = ValidationRules::default().validate_multiple_measurements(&form);

        let expected = Message::PairIncomplete(slot(2));
        assert!(!result.is_valid);
        assert_eq!(result.fields[&field("lValue2")].errors(), &[expected.clone()]);
        assert_eq!(result.fields[&field("bValue2")].errors(), &[expected.clone()]);
        assert_eq!(result.errors, vec![expected]);
        assert_eq!(result.measurement_count, 2);
        assert_eq!(result.valid_measurements, vec![Measurement::new(70.0, 20.0)]);
    }

    #[test]
    fn test_all_three_slots() {
        let form = FormData::from_iter([
            ("lValue1", "70"),
            ("bValue1", "20"),
            ("lValue2", "60"),
            ("bValue2", "10"),
            ("lValue3", "55.5"),
            ("bValue3", "-3"),
        ]);
        let result = ValidationRules::default().validate_multiple_measurements(&form);

        assert!(result.is_valid);
        assert_eq!(result.measurement_count, 3);
        assert_eq!(
            result.valid_measurements,
            vec![
                Measurement::new(70.0, 20.0),
                Measurement::new(60.0, 10.0),
                Measurement::new(55.5, -3.0),
            ]
        );
    }

    #[test]
    fn test_invalid_optional_pair_is_excluded() {
        let form = FormData::from_iter([
            ("lValue1", "70"),
            ("bValue1", "20"),
            ("lValue3", "150"),
            ("bValue3", "5"),
        ]);
        let result = ValidationRules::default().validate_multiple_measurements(&form);

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![Message::ChannelRange {
                channel: Channel::L,
                min: 0.0,
                max: 100.0
            }]
        );
        assert_eq!(result.valid_measurements.len(), 1);
        // Slot 3's b* was fine on its own.
        assert!(result.fields[&field("bValue3")].is_ok());
    }

    #[test]
    fn test_slot_b_zero_is_allowed() {
        let form = FormData::new().with("lValue1", "50").with("bValue1", "0");
        let result = ValidationRules::default().validate_multiple_measurements(&form);
        assert!(result.is_valid);
    }

    #[test]
    fn test_validate_form_legacy_fields() {
        let form = FormData::from_iter([("lValue", "65"), ("aValue", "10"), ("bValue", "0")]);
        let result = ValidationRules::default().validate_form(&form);

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![Message::ZeroB]);
        assert!(result.fields["lValue"].is_ok());
    }

    #[test]
    fn test_form_data_deserializes_from_object() {
        let form: FormData = serde_json::from_str(r#"{ "lValue1": "70", "bValue1": "20" }"#).unwrap();
        assert_eq!(form.get(field("lValue1")), "70");
        assert_eq!(form.get(field("lValue2")), "");
    }
}
