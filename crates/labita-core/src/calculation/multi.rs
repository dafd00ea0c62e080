//! Batch calculation over up to three measurements with partial-failure
//! semantics.

use serde::Serialize;

use crate::measurement::Measurement;
use crate::message::Message;
use crate::outcome::Outcome;

use super::classify::SkinTypeClassification;
use super::ita::{CalculationResult, ItaCalculator, ItaReading, round_to_tenth};

/// Per-measurement results plus the classified mean ITA.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiMeasurementResult {
    pub individual_results: Vec<CalculationResult>,
    pub measurement_count: usize,
    pub valid_measurement_count: usize,
    /// The average reading, or why there is none.
    #[serde(flatten)]
    pub outcome: Outcome<ItaReading>,
    /// Individual failures that did not sink the batch.
    pub warnings: Vec<Message>,
}

impl MultiMeasurementResult {
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn average_ita(&self) -> Option<f64> {
        self.outcome.value().map(|r| r.ita)
    }

    pub fn average_skin_type(&self) -> Option<&SkinTypeClassification> {
        self.outcome.value().map(|r| &r.skin_type)
    }

    pub fn errors(&self) -> &[Message] {
        self.outcome.errors()
    }

    /// Results that produced an ITA, in input order.
    pub fn successful_results(&self) -> impl Iterator<Item = &CalculationResult> {
        self.individual_results.iter().filter(|r| r.success())
    }
}

impl ItaCalculator {
    /// Calculate every measurement independently and classify the rounded
    /// mean of the ones that succeeded. A failing measurement never stops
    /// the rest of the batch.
    pub fn calculate_multiple_ita(&self, measurements: &[Measurement]) -> MultiMeasurementResult {
        if measurements.is_empty() {
            return MultiMeasurementResult {
                individual_results: Vec::new(),
                measurement_count: 0,
                valid_measurement_count: 0,
                outcome: Outcome::error(vec![Message::NoMeasurements]),
                warnings: Vec::new(),
            };
        }

        let mut individual_results = Vec::with_capacity(measurements.len());
        let mut item_errors = Vec::new();
        let mut itas = Vec::new();

        for (index, measurement) in measurements.iter().enumerate() {
            let number = index + 1;
            let mut result = self.calculate_ita(measurement.l, measurement.b);
            result.measurement_number = Some(number);

            match result.ita() {
                Some(ita) => itas.push(ita),
                None => item_errors.extend(
                    result
                        .errors()
                        .iter()
                        .map(|e| Message::for_measurement(number, e.clone())),
                ),
            }
            individual_results.push(result);
        }

        let valid_measurement_count = itas.len();
        if itas.is_empty() {
            tracing::warn!(count = measurements.len(), "no measurement in the batch succeeded");
            let mut errors = vec![Message::NoValidMeasurement];
            errors.extend(item_errors);
            return MultiMeasurementResult {
                individual_results,
                measurement_count: measurements.len(),
                valid_measurement_count,
                outcome: Outcome::error(errors),
                warnings: Vec::new(),
            };
        }

        let mean = itas.iter().sum::<f64>() / itas.len() as f64;
        let ita = round_to_tenth(mean);
        let skin_type = self.classify_skin_type(ita);
        tracing::debug!(
            ita,
            valid = valid_measurement_count,
            total = measurements.len(),
            "averaged ITA"
        );

        MultiMeasurementResult {
            individual_results,
            measurement_count: measurements.len(),
            valid_measurement_count,
            outcome: Outcome::ok(ItaReading { ita, skin_type }),
            warnings: item_errors,
        }
    }
}
