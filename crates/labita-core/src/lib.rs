//! LabITA Core — Lab* measurement validation and ITA° skin typing.
//!
//! Raw form strings go through the [`Validator`] (sanitize, per-field rules,
//! pair completeness), valid pairs go to the [`ItaCalculator`] (ITA°, skin
//! type, batch average). Both report problems as [`Message`] data inside an
//! [`Outcome`]. No rendering, storage or network access.

pub mod calculation;
pub mod config;
pub mod error;
pub mod field;
pub mod measurement;
pub mod message;
pub mod outcome;
pub mod validation;

// Re-exports for convenience.
pub use calculation::{
    CalculationResult, ItaCalculator, ItaFormula, MultiMeasurementResult, SkinTypeClassification,
    Suitability,
};
pub use config::LabItaConfig;
pub use error::{ConfigError, ScheduleError};
pub use field::{Channel, FieldName, Slot};
pub use measurement::Measurement;
pub use message::Message;
pub use outcome::Outcome;
pub use validation::{FormData, FormValidation, ValidationResult, Validator};
