//! The tagged result shape shared by the validator and the calculator.

use serde::Serialize;

use crate::message::Message;

/// Either a value or the ordered list of problems that prevented it.
///
/// Serializes as `{"kind":"ok","value":…}` or `{"kind":"error","errors":[…]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ok { value: T },
    Error { errors: Vec<Message> },
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self::Ok { value }
    }

    /// An error outcome. `errors` should not be empty.
    pub fn error(errors: Vec<Message>) -> Self {
        Self::Error { errors }
    }

    /// `Ok` when `errors` is empty, otherwise the accumulated errors.
    pub fn from_errors(value: T, errors: Vec<Message>) -> Self {
        if errors.is_empty() {
            Self::ok(value)
        } else {
            Self::error(errors)
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok { value } => Some(value),
            Self::Error { .. } => None,
        }
    }

    /// Problems in order; empty for `Ok`.
    pub fn errors(&self) -> &[Message] {
        match self {
            Self::Ok { .. } => &[],
            Self::Error { errors } => errors,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Ok { value } => Outcome::ok(f(value)),
            Self::Error { errors } => Outcome::error(errors),
        }
    }

    pub fn into_result(self) -> Result<T, Vec<Message>> {
        match self {
            Self::Ok { value } => Ok(value),
            Self::Error { errors } => Err(errors),
        }
    }
}
