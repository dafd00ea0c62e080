//! User-facing message catalog.
//!
//! Validation and calculation problems are returned as data, never raised.
//! Each [`Message`] has a stable `code` for the frontend and a Turkish
//! rendering through `Display`.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::field::{Channel, Slot};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Message {
    #[error("Bu alan zorunludur")]
    Required,

    #[error("Lütfen geçerli bir sayı girin")]
    InvalidNumber,

    #[error("Değer geçerli aralık dışında")]
    OutOfRange,

    /// Field-specific range message, e.g. the L* 0–100 bound.
    #[error("{} değeri {} ile {} arasında olmalıdır", .channel, .min, .max)]
    ChannelRange { channel: Channel, min: f64, max: f64 },

    #[error("b* değeri sıfır olamaz (sıfıra bölme hatası)")]
    ZeroB,

    #[error("En fazla {0} ondalık basamak kullanın")]
    TooManyDecimals(u32),

    #[error("Negatif değer giremezsiniz")]
    NegativeNotAllowed,

    /// Exactly one field of an optional measurement pair was filled in.
    #[error("{0}. ölçüm için L* ve b* değerlerinin ikisi de gereklidir")]
    PairIncomplete(Slot),

    /// Calculator-side: missing input for a channel.
    #[error("Bu alan zorunludur ({0})")]
    MissingValue(Channel),

    /// Calculator-side: unparseable input for a channel.
    #[error("Lütfen geçerli bir sayı girin ({0})")]
    NotANumber(Channel),

    /// Calculator-side range failure.
    #[error("Geçersiz {} değeri - {} ile {} arasında bir sayı girin", .channel, .min, .max)]
    InvalidChannel { channel: Channel, min: f64, max: f64 },

    #[error("Hesaplama hatası - değerlerinizi kontrol edin")]
    CalculationFailed,

    #[error("En az bir ölçüm gereklidir")]
    NoMeasurements,

    #[error("Geçerli ölçüm bulunamadı")]
    NoValidMeasurement,

    /// An individual failure inside a batch, prefixed with its 1-based index.
    #[error("Ölçüm {index}: {message}")]
    Measurement { index: usize, message: Box<Message> },
}

impl Message {
    /// Stable identifier the frontend can key translations on.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidNumber => "invalid_number",
            Self::OutOfRange => "out_of_range",
            Self::ChannelRange { channel, .. } => match channel {
                Channel::L => "l_star_range",
                Channel::A => "a_star_range",
                Channel::B => "b_star_range",
            },
            Self::ZeroB => "b_star_zero",
            Self::TooManyDecimals(_) => "too_many_decimals",
            Self::NegativeNotAllowed => "negative_not_allowed",
            Self::PairIncomplete(_) => "pair_incomplete",
            Self::MissingValue(_) => "empty_field",
            Self::NotANumber(_) => "not_a_number",
            Self::InvalidChannel { channel, .. } => match channel {
                Channel::L => "invalid_l",
                Channel::A => "invalid_a",
                Channel::B => "invalid_b",
            },
            Self::CalculationFailed => "calculation_error",
            Self::NoMeasurements => "no_measurements",
            Self::NoValidMeasurement => "no_valid_measurement",
            Self::Measurement { .. } => "measurement_error",
        }
    }

    /// Wrap a per-item failure with its position in a batch.
    pub fn for_measurement(index: usize, message: Message) -> Self {
        Self::Measurement {
            index,
            message: Box::new(message),
        }
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Message", 2)?;
        s.serialize_field("code", self.code())?;
        s.serialize_field("message", &self.to_string())?;
        s.end()
    }
}

/// Shown by the summary helpers when a calculation did not succeed.
pub const SUMMARY_FAILED: &str = "Hesaplama başarısız";
