//! ITA° calculation, skin-type classification, batch averaging and
//! summaries.

pub mod classify;
pub mod ita;
pub mod multi;
pub mod summary;

pub use classify::{
    SkinTypeClassification, SkinTypeInfo, SkinTypeTable, Suitability, SuitabilityAdvice,
};
pub use ita::{CalculationResult, ItaCalculator, ItaFormula, ItaReading, LabValue, LabValues};
pub use multi::MultiMeasurementResult;
pub use summary::{format_ita_value, generate_multi_summary, generate_summary};
