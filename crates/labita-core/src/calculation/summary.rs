//! Human-readable recaps of calculation results.

use crate::message::SUMMARY_FAILED;

use super::ita::CalculationResult;
use super::multi::MultiMeasurementResult;

/// `45.0°`, or `--` when there is no value.
pub fn format_ita_value(ita: Option<f64>) -> String {
    match ita {
        Some(v) if !v.is_nan() => format!("{v:.1}°"),
        _ => "--".to_string(),
    }
}

/// One-line recap, e.g. `L:70 b:20 → ITA:45.0° (İyi (40-55°))`.
pub fn generate_summary(result: &CalculationResult) -> String {
    let (Some(reading), Some(lab)) = (result.outcome.value(), result.lab_values) else {
        return SUMMARY_FAILED.to_string();
    };
    let a = lab.a.map(|a| format!(" a:{a}")).unwrap_or_default();
    format!(
        "L:{}{a} b:{} → ITA:{} ({})",
        lab.l,
        lab.b,
        format_ita_value(Some(reading.ita)),
        reading.skin_type.full_description
    )
}

/// The multi-line clipboard recap of a batch.
pub fn generate_multi_summary(result: &MultiMeasurementResult) -> String {
    if !result.success() {
        return SUMMARY_FAILED.to_string();
    }
    let individual: String = result
        .individual_results
        .iter()
        .enumerate()
        .filter_map(|(index, r)| {
            let lab = r.lab_values?;
            let number = r.measurement_number.unwrap_or(index + 1);
            Some(format!("{number}. L*:{} b*:{}\n", lab.l, lab.b))
        })
        .collect();
    format!(
        "Çoklu Ölçüm Sonuçları:\nÖlçüm Sayısı: {}\nOrtalama ITA: {}\n\nBireysel Ölçümler:\n{individual}",
        result.measurement_count,
        format_ita_value(result.average_ita()),
    )
}
