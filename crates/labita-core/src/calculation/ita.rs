//! ITA° computation for a single Lab measurement.
//!
//! ITA = atan2(L* − 50, b*) × 180/π, rounded to one decimal place. The
//! two-argument arctangent is defined for b* = 0 (±90°, or 0° at L* = 50)
//! and keeps the quadrant over the full −180°…180° range. The legacy
//! plain-arctangent form atan((L* − 50) / b*) is kept behind
//! [`ItaFormula::LegacyAtan`] and refuses b* = 0.

use serde::Serialize;

use crate::config::LabItaConfig;
use crate::field::Channel;
use crate::message::Message;
use crate::outcome::Outcome;
use crate::validation::field::parse_number;
use crate::validation::rules::{FieldRule, ValidationRules};

use super::classify::{
    SkinTypeClassification, SkinTypeDefinition, SkinTypeInfo, SkinTypeTable, Suitability,
    SuitabilityAdvice,
};

/// Which arctangent the caller wants. Always chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItaFormula {
    /// `atan2(L* − 50, b*)`.
    #[default]
    Atan2,
    /// `atan((L* − 50) / b*)`. Undefined at b* = 0.
    LegacyAtan,
}

/// A channel input before it has been checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawLab {
    /// Absent or blank.
    Missing,
    /// Present but not a finite number.
    NotANumber,
    Number(f64),
}

/// Anything the calculator accepts as an L*, a* or b* input.
///
/// Strings are trimmed and parsed strictly, so `"70"` and `70.0` are the
/// same measurement while `""` and `"abc"` report different problems.
pub trait LabValue {
    fn to_raw(&self) -> RawLab;
}

impl LabValue for f64 {
    fn to_raw(&self) -> RawLab {
        if self.is_nan() {
            RawLab::NotANumber
        } else {
            RawLab::Number(*self)
        }
    }
}

impl LabValue for f32 {
    fn to_raw(&self) -> RawLab {
        f64::from(*self).to_raw()
    }
}

impl LabValue for str {
    fn to_raw(&self) -> RawLab {
        if self.trim().is_empty() {
            return RawLab::Missing;
        }
        match parse_number(self) {
            Some(v) => RawLab::Number(v),
            None => RawLab::NotANumber,
        }
    }
}

impl LabValue for String {
    fn to_raw(&self) -> RawLab {
        self.as_str().to_raw()
    }
}

impl<T: LabValue> LabValue for Option<T> {
    fn to_raw(&self) -> RawLab {
        self.as_ref().map_or(RawLab::Missing, LabValue::to_raw)
    }
}

impl<T: LabValue + ?Sized> LabValue for &T {
    fn to_raw(&self) -> RawLab {
        (**self).to_raw()
    }
}

/// Round half up to one decimal place. Never returns `-0.0`.
pub fn round_to_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0 + 0.5).floor() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// The Lab values a successful calculation was made from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabValues {
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    pub b: f64,
}

/// The successful part of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItaReading {
    pub ita: f64,
    pub skin_type: SkinTypeClassification,
}

/// Result of one ITA calculation. Failures are carried, never raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// 1-based position inside a batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_values: Option<LabValues>,
    #[serde(flatten)]
    pub outcome: Outcome<ItaReading>,
}

impl CalculationResult {
    fn failed(errors: Vec<Message>) -> Self {
        Self {
            measurement_number: None,
            lab_values: None,
            outcome: Outcome::error(errors),
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn ita(&self) -> Option<f64> {
        self.outcome.value().map(|r| r.ita)
    }

    pub fn skin_type(&self) -> Option<&SkinTypeClassification> {
        self.outcome.value().map(|r| &r.skin_type)
    }

    pub fn errors(&self) -> &[Message] {
        self.outcome.errors()
    }
}

/// Computes and classifies ITA values. Re-checks its inputs against the
/// configured bounds so it can be used without the validator in front.
#[derive(Debug, Clone)]
pub struct ItaCalculator {
    rules: ValidationRules,
    table: SkinTypeTable,
}

impl ItaCalculator {
    pub fn new(config: &LabItaConfig) -> Self {
        Self {
            rules: config.rules.clone(),
            table: config.skin_types.clone(),
        }
    }

    pub fn table(&self) -> &SkinTypeTable {
        &self.table
    }

    /// ITA from L* and b* using `atan2`.
    pub fn calculate_ita(&self, l: impl LabValue, b: impl LabValue) -> CalculationResult {
        self.evaluate(ItaFormula::Atan2, l.to_raw(), None, b.to_raw())
    }

    /// The legacy `{L, a, b}` entry point using the plain arctangent.
    /// a* is range-checked but does not enter the formula.
    pub fn calculate_ita_legacy(
        &self,
        l: impl LabValue,
        a: impl LabValue,
        b: impl LabValue,
    ) -> CalculationResult {
        self.calculate_ita_with(ItaFormula::LegacyAtan, l, a, b)
    }

    pub fn calculate_ita_with(
        &self,
        formula: ItaFormula,
        l: impl LabValue,
        a: impl LabValue,
        b: impl LabValue,
    ) -> CalculationResult {
        self.evaluate(formula, l.to_raw(), Some(a.to_raw()), b.to_raw())
    }

    fn evaluate(
        &self,
        formula: ItaFormula,
        l: RawLab,
        a: Option<RawLab>,
        b: RawLab,
    ) -> CalculationResult {
        let inputs = [(Channel::L, Some(l)), (Channel::A, a), (Channel::B, Some(b))];
        let present = || {
            inputs
                .iter()
                .filter_map(|(channel, raw)| raw.map(|raw| (*channel, raw)))
        };

        let missing: Vec<Message> = present()
            .filter(|(_, raw)| *raw == RawLab::Missing)
            .map(|(channel, _)| Message::MissingValue(channel))
            .collect();
        if !missing.is_empty() {
            return CalculationResult::failed(missing);
        }

        let not_numbers: Vec<Message> = present()
            .filter(|(_, raw)| *raw == RawLab::NotANumber)
            .map(|(channel, _)| Message::NotANumber(channel))
            .collect();
        if !not_numbers.is_empty() {
            return CalculationResult::failed(not_numbers);
        }

        let number = |raw: RawLab| match raw {
            RawLab::Number(v) => v,
            RawLab::Missing | RawLab::NotANumber => f64::NAN,
        };
        let values = LabValues {
            l: number(l),
            a: a.map(number),
            b: number(b),
        };

        let mut errors = Vec::new();
        errors.extend(bounds_error(&self.rules.l_star, Channel::L, values.l));
        if let Some(a) = values.a {
            errors.extend(bounds_error(&self.rules.a_star, Channel::A, a));
        }
        // The {L, a, b} contract is bounded by the legacy b* field's rule.
        let b_rule = match values.a {
            Some(_) => &self.rules.b_star,
            None => &self.rules.b_star_slot,
        };
        errors.extend(bounds_error(b_rule, Channel::B, values.b));
        if !errors.is_empty() {
            return CalculationResult::failed(errors);
        }

        let degrees = match formula {
            ItaFormula::Atan2 => (values.l - 50.0).atan2(values.b).to_degrees(),
            ItaFormula::LegacyAtan => {
                if values.b == 0.0 {
                    return CalculationResult::failed(vec![Message::ZeroB]);
                }
                ((values.l - 50.0) / values.b).atan().to_degrees()
            }
        };
        if !degrees.is_finite() {
            tracing::error!(?formula, l = values.l, b = values.b, "ITA calculation produced {degrees}");
            return CalculationResult::failed(vec![Message::CalculationFailed]);
        }

        let ita = round_to_tenth(degrees);
        let skin_type = self.table.classify(ita);
        tracing::debug!(ita, skin_type = %skin_type.label, "calculated ITA");

        CalculationResult {
            measurement_number: None,
            lab_values: Some(values),
            outcome: Outcome::ok(ItaReading { ita, skin_type }),
        }
    }

    pub fn classify_skin_type(&self, ita: f64) -> SkinTypeClassification {
        self.table.classify(ita)
    }

    pub fn skin_type_info(&self, ita: f64) -> SkinTypeInfo {
        self.table.info(ita)
    }

    /// The configured rows in scan order.
    pub fn all_skin_types(&self) -> &[SkinTypeDefinition] {
        &self.table.types
    }

    pub fn suitability_advice(&self, suitability: Suitability) -> &SuitabilityAdvice {
        self.table.advice(suitability)
    }
}

impl Default for ItaCalculator {
    fn default() -> Self {
        Self::new(&LabItaConfig::default())
    }
}

/// Calculator-side range check. Zero is not a range problem here.
fn bounds_error(rule: &FieldRule, channel: Channel, value: f64) -> Option<Message> {
    let below = rule.min.is_some_and(|min| value < min);
    let above = rule.max.is_some_and(|max| value > max);
    if !(below || above) {
        return None;
    }
    Some(match (rule.min, rule.max) {
        (Some(min), Some(max)) => Message::InvalidChannel { channel, min, max },
        _ => Message::OutOfRange,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_reference_reading() {
        let calc = ItaCalculator::default();
        let result = calc.calculate_ita(70.0, 20.0);
        assert!(result.success());
        assert!((result.ita().unwrap() - 45.0).abs() < EPSILON);
        assert_eq!(result.skin_type().unwrap().label, "İyi");
        assert_eq!(
            result.lab_values,
            Some(LabValues { l: 70.0, a: None, b: 20.0 })
        );
    }

    #[test]
    fn test_zero_b_with_atan2() {
        let calc = ItaCalculator::default();

        let flat = calc.calculate_ita(50.0, 0.0);
        assert_eq!(flat.ita(), Some(0.0));
        assert_eq!(flat.skin_type().unwrap().label, "Riskli");

        let up = calc.calculate_ita(80.0, 0.0);
        assert_eq!(up.ita(), Some(90.0));
        let down = calc.calculate_ita(20.0, 0.0);
        assert_eq!(down.ita(), Some(-90.0));
    }

    #[test]
    fn test_atan2_keeps_quadrant() {
        let calc = ItaCalculator::default();
        let result = calc.calculate_ita(70.0, -20.0);
        assert_eq!(result.ita(), Some(135.0));
        let legacy = calc.calculate_ita_legacy(70.0, 0.0, -20.0);
        assert_eq!(legacy.ita(), Some(-45.0));
    }

    #[test]
    fn test_legacy_rejects_zero_b() {
        let calc = ItaCalculator::default();
        let result = calc.calculate_ita_legacy("50", "0", "0");
        assert!(!result.success());
        assert_eq!(result.errors(), &[Message::ZeroB]);
        assert!(result.lab_values.is_none());
    }

    #[test]
    fn test_legacy_matches_atan2_for_positive_b() {
        let calc = ItaCalculator::default();
        let legacy = calc.calculate_ita_legacy(70.0, 5.0, 20.0);
        let modern = calc.calculate_ita_with(ItaFormula::Atan2, 70.0, 5.0, 20.0);
        assert_eq!(legacy.ita(), modern.ita());
        assert_eq!(legacy.lab_values.unwrap().a, Some(5.0));
    }

    #[test]
    fn test_missing_values_stop_early() {
        let calc = ItaCalculator::default();
        let result = calc.calculate_ita_legacy("", "abc", None::<f64>);
        assert_eq!(
            result.errors(),
            &[Message::MissingValue(Channel::L), Message::MissingValue(Channel::B)]
        );
        assert_eq!(result.errors()[0].to_string(), "Bu alan zorunludur (L*)");
    }

    #[test]
    fn test_not_a_number_stops_before_range() {
        let calc = ItaCalculator::default();
        let result = calc.calculate_ita("abc", f64::NAN);
        assert_eq!(
            result.errors(),
            &[Message::NotANumber(Channel::L), Message::NotANumber(Channel::B)]
        );
    }

    #[test]
    fn test_range_errors_accumulate() {
        let calc = ItaCalculator::default();
        let result = calc.calculate_ita_legacy(150.0, -200.0, 130.0);
        let codes: Vec<_> = result.errors().iter().map(Message::code).collect();
        assert_eq!(codes, ["invalid_l", "invalid_a", "invalid_b"]);
        assert_eq!(
            result.errors()[0].to_string(),
            "Geçersiz L* değeri - 0 ile 100 arasında bir sayı girin"
        );
    }

    #[test]
    fn test_legacy_entry_uses_legacy_b_bounds() {
        let config = LabItaConfig::from_json_str(r#"{ "rules": { "bStar": { "max": 50 } } }"#)
            .unwrap();
        let calc = ItaCalculator::new(&config);

        let legacy = calc.calculate_ita_legacy(70.0, 0.0, 60.0);
        let codes: Vec<_> = legacy.errors().iter().map(Message::code).collect();
        assert_eq!(codes, ["invalid_b"]);
        let explicit = calc.calculate_ita_with(ItaFormula::Atan2, 70.0, 0.0, 60.0);
        assert!(!explicit.success());

        assert!(calc.calculate_ita(70.0, 60.0).success());
    }

    #[test]
    fn test_infinity_is_out_of_range() {
        let calc = ItaCalculator::default();
        let result = calc.calculate_ita(f64::INFINITY, 10.0);
        assert_eq!(result.errors()[0].code(), "invalid_l");
    }

    #[test]
    fn test_round_to_tenth() {
        assert!((round_to_tenth(45.04) - 45.0).abs() < EPSILON);
        assert!((round_to_tenth(45.06) - 45.1).abs() < 1e-6);
        assert!((round_to_tenth(-12.35) - -12.3).abs() < 1e-6);
        assert!(round_to_tenth(-0.04).is_sign_positive());
    }

    #[test]
    fn test_str_inputs() {
        assert_eq!(" 12.5 ".to_raw(), RawLab::Number(12.5));
        assert_eq!("   ".to_raw(), RawLab::Missing);
        assert_eq!("1e999".to_raw(), RawLab::NotANumber);
        assert_eq!(String::from("x").to_raw(), RawLab::NotANumber);
        assert_eq!(Some(3.0f32).to_raw(), RawLab::Number(3.0));
    }

    #[test]
    fn test_failed_result_serialization() {
        let calc = ItaCalculator::default();
        let json = serde_json::to_value(calc.calculate_ita("", 10.0)).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["errors"][0]["code"], "empty_field");
        assert!(json.get("labValues").is_none());
    }

    #[test]
    fn test_successful_result_serialization() {
        let calc = ItaCalculator::default();
        let json = serde_json::to_value(calc.calculate_ita(70.0, 20.0)).unwrap();
        assert_eq!(json["kind"], "ok");
        assert_eq!(json["value"]["ita"], 45.0);
        assert_eq!(json["value"]["skinType"]["suitability"], "safe");
        assert_eq!(json["labValues"]["L"], 70.0);
    }

    #[test]
    fn test_accessors() {
        let calc = ItaCalculator::default();
        assert_eq!(calc.all_skin_types().len(), 4);
        assert_eq!(calc.suitability_advice(Suitability::Danger).icon, "❌");
        let info = calc.skin_type_info(25.0);
        assert!(info.is_not_recommended);
        assert_eq!(calc.classify_skin_type(60.0).label, "Mükemmel");
    }
}
