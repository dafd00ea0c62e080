//! Form input validation, including debounced validation-as-you-type.

pub mod field;
pub mod form;
pub mod realtime;
pub mod rules;
pub mod sanitize;
mod validator;

pub use field::ValidationResult;
pub use form::{FieldsValidation, FormData, FormValidation};
pub use realtime::Debouncer;
pub use rules::{FieldRule, ValidationRules};
pub use validator::Validator;
