//! Per-field validation rules.

use serde::{Deserialize, Deserializer, Serialize};

use crate::field::{Channel, FieldName};
use crate::message::Message;

/// Configuration for one form field. Immutable once the rule set is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    /// Empty input is an error.
    pub required: bool,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Maximum number of fractional digits accepted.
    pub max_decimals: Option<u32>,
    pub allow_negative: bool,
    /// Reject an exact zero (legacy single-measurement b* only).
    pub reject_zero: bool,
}

impl Default for FieldRule {
    fn default() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
            max_decimals: Some(2),
            allow_negative: true,
            reject_zero: false,
        }
    }
}

impl FieldRule {
    /// Bounded numeric rule with two decimals.
    pub fn ranged(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            allow_negative: min < 0.0,
            ..Self::default()
        }
    }

    pub fn rejecting_zero(mut self) -> Self {
        self.reject_zero = true;
        self
    }

    /// Message for a range violation on `channel`: the channel-specific text
    /// when both bounds are configured, the generic one otherwise.
    pub fn range_message(&self, channel: Channel) -> Message {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Message::ChannelRange { channel, min, max },
            _ => Message::OutOfRange,
        }
    }

    /// Whether a parsed value satisfies the range and zero policy.
    pub fn admits(&self, value: f64) -> bool {
        if self.min.is_some_and(|min| value < min) {
            return false;
        }
        if self.max.is_some_and(|max| value > max) {
            return false;
        }
        !(self.reject_zero && value == 0.0)
    }

    /// Short hint shown under the input, e.g. `Aralık: 0-100`.
    pub fn help_text(&self) -> String {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return String::new();
        };
        let mut text = if min < 0.0 {
            format!("Aralık: {min} ile +{max}")
        } else {
            format!("Aralık: {min}-{max}")
        };
        if self.reject_zero {
            text.push_str(" (sıfır olamaz)");
        }
        text
    }
}

/// A partial [`FieldRule`] read from config. Keys it names replace the
/// built-in rule's values; everything else is kept. Bounds can be moved but
/// not removed.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FieldRuleOverride {
    required: Option<bool>,
    min: Option<f64>,
    max: Option<f64>,
    max_decimals: Option<u32>,
    allow_negative: Option<bool>,
    reject_zero: Option<bool>,
}

impl FieldRuleOverride {
    fn apply(self, base: FieldRule) -> FieldRule {
        FieldRule {
            required: self.required.unwrap_or(base.required),
            min: self.min.or(base.min),
            max: self.max.or(base.max),
            max_decimals: self.max_decimals.or(base.max_decimals),
            allow_negative: self.allow_negative.unwrap_or(base.allow_negative),
            reject_zero: self.reject_zero.unwrap_or(base.reject_zero),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RulesOverride {
    l_star: FieldRuleOverride,
    a_star: FieldRuleOverride,
    b_star: FieldRuleOverride,
    b_star_slot: FieldRuleOverride,
}

/// The rule table for every known field.
///
/// L* rules are shared by the legacy field and the slots. b* differs: only
/// the legacy single-measurement field rejects zero, because only the legacy
/// plain-arctangent formula divides by b*.
///
/// Deserializing patches the built-in table, so `{"lStar": {"max": 90}}`
/// keeps L*'s lower bound and sign rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    pub l_star: FieldRule,
    pub a_star: FieldRule,
    pub b_star: FieldRule,
    pub b_star_slot: FieldRule,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            l_star: FieldRule::ranged(0.0, 100.0),
            a_star: FieldRule::ranged(-128.0, 127.0),
            b_star: FieldRule::ranged(-128.0, 127.0).rejecting_zero(),
            b_star_slot: FieldRule::ranged(-128.0, 127.0),
        }
    }
}

impl<'de> Deserialize<'de> for ValidationRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let patch = RulesOverride::deserialize(deserializer)?;
        let base = Self::default();
        Ok(Self {
            l_star: patch.l_star.apply(base.l_star),
            a_star: patch.a_star.apply(base.a_star),
            b_star: patch.b_star.apply(base.b_star),
            b_star_slot: patch.b_star_slot.apply(base.b_star_slot),
        })
    }
}

impl ValidationRules {
    pub fn rule(&self, field: FieldName) -> &FieldRule {
        match (field.channel, field.slot) {
            (Channel::L, _) => &self.l_star,
            (Channel::A, _) => &self.a_star,
            (Channel::B, None) => &self.b_star,
            (Channel::B, Some(_)) => &self.b_star_slot,
        }
    }

    /// Rule lookup by form identifier. Unknown names have no rule.
    pub fn rule_named(&self, name: &str) -> Option<(FieldName, &FieldRule)> {
        let field: FieldName = name.parse().ok()?;
        Some((field, self.rule(field)))
    }
}
