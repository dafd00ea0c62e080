//! Skin phototype classification by ITA° range.
//!
//! The built-in table is scanned in order and the first inclusive range that
//! contains the angle wins:
//!
//! ```text
//! 1  Mükemmel  [55.1, +∞)   safe
//! 2  İyi       [40, 55]     safe
//! 3  Dikkat    [30, 39.9]   caution
//! 4  Riskli    (−∞, 29.9]   danger
//! ```
//!
//! The table leaves (29.9, 30), (39.9, 40) and (55, 55.1) uncovered. Angles
//! there fall through to the "Unknown"/caution fallback. ITA values are
//! rounded to one decimal before classification, so only direct calls with
//! finer values can land in a gap.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Treatment-risk tier of a phototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suitability {
    Safe,
    Caution,
    Danger,
}

/// What the frontend shows for a tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityAdvice {
    pub icon: String,
    pub title: String,
    /// May contain line breaks.
    pub description: String,
}

impl SuitabilityAdvice {
    fn new(icon: &str, title: &str, description: &str) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceTable {
    pub safe: SuitabilityAdvice,
    pub caution: SuitabilityAdvice,
    pub danger: SuitabilityAdvice,
}

impl AdviceTable {
    pub fn get(&self, suitability: Suitability) -> &SuitabilityAdvice {
        match suitability {
            Suitability::Safe => &self.safe,
            Suitability::Caution => &self.caution,
            Suitability::Danger => &self.danger,
        }
    }
}

impl Default for AdviceTable {
    fn default() -> Self {
        Self {
            safe: SuitabilityAdvice::new(
                "✅",
                "LAZER İÇİN UYGUN",
                "Alexandrite lazer güvenli\nNormal ayarlarla tedavi yapılabilir",
            ),
            caution: SuitabilityAdvice::new(
                "⚠️",
                "DİKKAT GEREKİR",
                "Düşük enerji ayarları kullanın\nTest yaması zorunludur",
            ),
            danger: SuitabilityAdvice::new(
                "❌",
                "RİSKLİ",
                "Alexandrite lazer önerilmez\nAlternatif yöntem düşünün",
            ),
        }
    }
}

/// Inclusive ITA° interval. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItaRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ItaRange {
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, ita: f64) -> bool {
        ita >= self.lower() && ita <= self.upper()
    }

    fn lower(&self) -> f64 {
        self.min.unwrap_or(f64::NEG_INFINITY)
    }

    fn upper(&self) -> f64 {
        self.max.unwrap_or(f64::INFINITY)
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinTypeDefinition {
    pub label: String,
    pub description: String,
    /// Label with its range, e.g. `İyi (40-55°)`.
    pub full_description: String,
    pub range: ItaRange,
    pub suitability: Suitability,
    pub recommendation: String,
}

impl SkinTypeDefinition {
    fn new(
        label: &str,
        description: &str,
        full_description: &str,
        range: ItaRange,
        suitability: Suitability,
    ) -> Self {
        Self {
            label: label.to_string(),
            description: description.to_string(),
            full_description: full_description.to_string(),
            range,
            suitability,
            recommendation: label.to_string(),
        }
    }
}

/// The classification handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinTypeClassification {
    pub label: String,
    pub description: String,
    pub full_description: String,
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
    pub suitability: Suitability,
    pub recommendation: String,
    pub advice: SuitabilityAdvice,
    #[serde(skip)]
    matched: bool,
}

impl SkinTypeClassification {
    /// True for the fallback returned when no range matched.
    pub fn is_unknown(&self) -> bool {
        !self.matched
    }
}

/// A classification with convenience flags for the result card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinTypeInfo {
    #[serde(flatten)]
    pub classification: SkinTypeClassification,
    pub ita: f64,
    pub formatted_ita: String,
    pub is_laser_suitable: bool,
    pub requires_caution: bool,
    pub is_not_recommended: bool,
}

/// An open ITA° interval covered by no table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItaGap {
    pub above: f64,
    pub below: f64,
}

/// Ordered classification table plus the fallback and advice texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkinTypeTable {
    pub types: Vec<SkinTypeDefinition>,
    pub fallback: SkinTypeDefinition,
    pub advice: AdviceTable,
}

impl Default for SkinTypeTable {
    fn default() -> Self {
        Self {
            types: vec![
                SkinTypeDefinition::new(
                    "Mükemmel",
                    "Çok Güvenli",
                    "Mükemmel (>55°)",
                    ItaRange::new(Some(55.1), None),
                    Suitability::Safe,
                ),
                SkinTypeDefinition::new(
                    "İyi",
                    "Güvenli",
                    "İyi (40-55°)",
                    ItaRange::new(Some(40.0), Some(55.0)),
                    Suitability::Safe,
                ),
                SkinTypeDefinition::new(
                    "Dikkat",
                    "Dikkatli Olun",
                    "Dikkat (30-40°)",
                    ItaRange::new(Some(30.0), Some(39.9)),
                    Suitability::Caution,
                ),
                SkinTypeDefinition::new(
                    "Riskli",
                    "Yüksek Risk",
                    "Riskli (<30°)",
                    ItaRange::new(None, Some(29.9)),
                    Suitability::Danger,
                ),
            ],
            fallback: SkinTypeDefinition {
                label: "Unknown".to_string(),
                description: "Bilinmeyen".to_string(),
                full_description: "Bilinmeyen Cilt Tipi".to_string(),
                range: ItaRange::default(),
                suitability: Suitability::Caution,
                recommendation: "Değerlendirme Gerekli".to_string(),
            },
            advice: AdviceTable::default(),
        }
    }
}

impl SkinTypeTable {
    /// First row whose range contains `ita`, or the fallback.
    pub fn classify(&self, ita: f64) -> SkinTypeClassification {
        match self.types.iter().find(|t| t.range.contains(ita)) {
            Some(definition) => self.describe(definition, true),
            None => {
                tracing::debug!(ita, "ITA outside every configured range");
                self.describe(&self.fallback, false)
            }
        }
    }

    /// Classification plus the suitability flags.
    pub fn info(&self, ita: f64) -> SkinTypeInfo {
        let classification = self.classify(ita);
        let suitability = classification.suitability;
        SkinTypeInfo {
            classification,
            ita,
            formatted_ita: super::summary::format_ita_value(Some(ita)),
            is_laser_suitable: suitability == Suitability::Safe,
            requires_caution: suitability == Suitability::Caution,
            is_not_recommended: suitability == Suitability::Danger,
        }
    }

    pub fn advice(&self, suitability: Suitability) -> &SuitabilityAdvice {
        self.advice.get(suitability)
    }

    fn describe(&self, definition: &SkinTypeDefinition, matched: bool) -> SkinTypeClassification {
        SkinTypeClassification {
            label: definition.label.clone(),
            description: definition.description.clone(),
            full_description: definition.full_description.clone(),
            range_min: definition.range.min,
            range_max: definition.range.max,
            suitability: definition.suitability,
            recommendation: definition.recommendation.clone(),
            advice: self.advice(definition.suitability).clone(),
            matched,
        }
    }

    /// Intervals of the real line that no row covers, in ascending order.
    pub fn gaps(&self) -> Vec<ItaGap> {
        let mut ranges: Vec<(f64, f64)> = self
            .types
            .iter()
            .map(|t| (t.range.lower(), t.range.upper()))
            .collect();
        ranges.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut gaps = Vec::new();
        let mut reach = f64::NEG_INFINITY;
        for (lower, upper) in ranges {
            if lower > reach {
                gaps.push(ItaGap {
                    above: reach,
                    below: lower,
                });
            }
            reach = reach.max(upper);
        }
        if reach < f64::INFINITY {
            gaps.push(ItaGap {
                above: reach,
                below: f64::INFINITY,
            });
        }
        gaps
    }

    /// Reject tables that cannot classify anything sensibly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.types.is_empty() {
            return Err(ConfigError::InvalidTable("no skin types defined".into()));
        }
        for t in &self.types {
            let (lower, upper) = (t.range.lower(), t.range.upper());
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(ConfigError::InvalidTable(format!(
                    "range of {} is empty",
                    t.label
                )));
            }
        }
        Ok(())
    }
}
