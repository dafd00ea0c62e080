//! The frontend-facing validator: rule table plus the debounce timers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::LabItaConfig;
use crate::error::ScheduleError;

use super::field::ValidationResult;
use super::form::{FieldsValidation, FormData, FormValidation};
use super::realtime::Debouncer;
use super::rules::{FieldRule, ValidationRules};

/// Validates raw form input. All checks are pure functions of the shared
/// [`ValidationRules`]; the only mutable state is the per-field debounce map.
#[derive(Debug)]
pub struct Validator {
    rules: Arc<ValidationRules>,
    debouncer: Debouncer,
}

impl Validator {
    pub fn new(config: &LabItaConfig) -> Self {
        Self::with_rules(config.rules.clone(), config.debounce_delay())
    }

    pub fn with_rules(rules: ValidationRules, debounce: Duration) -> Self {
        Self {
            rules: Arc::new(rules),
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn validate_field(&self, name: &str, raw: &str) -> ValidationResult {
        self.rules.validate_field(name, raw)
    }

    pub fn sanitize_input(&self, raw: &str, name: &str) -> String {
        self.rules.sanitize_input(raw, name)
    }

    pub fn format_value(&self, value: &str, name: &str) -> String {
        self.rules.format_value(value, name)
    }

    pub fn validate_multiple_measurements(&self, form: &FormData) -> FormValidation {
        self.rules.validate_multiple_measurements(form)
    }

    pub fn validate_form(&self, form: &FormData) -> FieldsValidation {
        self.rules.validate_form(form)
    }

    /// Validate `value` once the field has been quiet for the debounce
    /// delay, then hand the result to `callback`. A newer call for the same
    /// field discards this one.
    pub fn validate_field_real_time<F>(
        &self,
        name: &str,
        value: &str,
        callback: F,
    ) -> Result<(), ScheduleError>
    where
        F: FnOnce(String, ValidationResult) + Send + 'static,
    {
        let rules = Arc::clone(&self.rules);
        let field = name.to_string();
        let value = value.to_string();
        self.debouncer.schedule(name, move || {
            let result = rules.validate_field(&field, &value);
            callback(field, result);
        })
    }

    /// Cancel every pending real-time validation.
    pub fn clear_all_timers(&self) {
        self.debouncer.cancel_all();
    }

    /// Real-time validations scheduled but not yet run.
    pub fn pending_validations(&self) -> usize {
        self.debouncer.pending()
    }

    /// The rule behind a field, for UI hints. `None` for unknown fields.
    pub fn field_constraints(&self, name: &str) -> Option<&FieldRule> {
        self.rules.rule_named(name).map(|(_, rule)| rule)
    }

    pub fn field_help_text(&self, name: &str) -> String {
        self.field_constraints(name)
            .map(FieldRule::help_text)
            .unwrap_or_default()
    }

    /// Whether `value` parses and satisfies the field's range and zero
    /// policy. Unknown fields accept anything.
    pub fn is_in_range(&self, name: &str, value: &str) -> bool {
        let Some(rule) = self.field_constraints(name) else {
            return true;
        };
        super::field::parse_number(value).is_some_and(|v| rule.admits(v))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&LabItaConfig::default())
    }
}
