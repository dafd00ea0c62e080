//! A single L*/b* reading.

use palette::Lab;
use palette::white_point::D65;
use serde::{Deserialize, Serialize};

/// One skin reading as used by the ITA formula. a* is not needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Lightness, 0–100.
    #[serde(rename = "L")]
    pub l: f64,
    /// Blue–yellow axis, −128–127.
    pub b: f64,
}

impl Measurement {
    pub const fn new(l: f64, b: f64) -> Self {
        Self { l, b }
    }

    /// Take L* and b* from a CIELAB color (D65), dropping a*.
    pub fn from_lab(lab: Lab<D65, f64>) -> Self {
        Self::new(lab.l, lab.b)
    }
}

impl From<Lab<D65, f64>> for Measurement {
    fn from(lab: Lab<D65, f64>) -> Self {
        Self::from_lab(lab)
    }
}
