//! Form field identifiers.
//!
//! The frontend names its inputs `lValue`, `aValue`, `bValue` for the legacy
//! single measurement and `lValue1`..`lValue3`, `bValue1`..`bValue3` for the
//! three measurement slots. [`FieldName`] is the typed form of those strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of measurement slots on the multi-measurement form.
pub const SLOT_COUNT: u8 = 3;

/// A Lab* axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Lightness, 0–100.
    L,
    /// Green–red axis.
    A,
    /// Blue–yellow axis.
    B,
}

impl Channel {
    /// Label used in messages, e.g. `L*`.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::L => "L*",
            Self::A => "a*",
            Self::B => "b*",
        }
    }

    const fn prefix(&self) -> &'static str {
        match self {
            Self::L => "lValue",
            Self::A => "aValue",
            Self::B => "bValue",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A measurement slot on the form, `1..=SLOT_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Slot(u8);

impl Slot {
    /// The mandatory first slot.
    pub const FIRST: Slot = Slot(1);

    /// Returns `None` outside `1..=SLOT_COUNT`.
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= SLOT_COUNT {
            Some(Self(n))
        } else {
            None
        }
    }

    /// 1-based slot number.
    pub const fn number(&self) -> u8 {
        self.0
    }

    /// Every slot in form order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (1..=SLOT_COUNT).map(Slot)
    }

    /// Only the first slot is required unconditionally.
    pub const fn is_mandatory(&self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A form field: one Lab* channel, either on the legacy single-measurement
/// form (`slot == None`) or in a measurement slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldName {
    // Declared slot-first so ordering follows the form: legacy fields, then
    // slot 1 L*/b*, slot 2 L*/b*, ...
    pub slot: Option<Slot>,
    pub channel: Channel,
}

impl FieldName {
    /// Legacy single-measurement field (`lValue`, `aValue`, `bValue`).
    pub const fn legacy(channel: Channel) -> Self {
        Self { channel, slot: None }
    }

    /// Field inside a measurement slot (`lValue2`, `bValue3`, ...).
    pub const fn slotted(channel: Channel, slot: Slot) -> Self {
        Self {
            channel,
            slot: Some(slot),
        }
    }

    /// The L*/b* pair of a slot, in form order.
    pub const fn pair(slot: Slot) -> [Self; 2] {
        [Self::slotted(Channel::L, slot), Self::slotted(Channel::B, slot)]
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Some(slot) => write!(f, "{}{}", self.channel.prefix(), slot),
            None => f.write_str(self.channel.prefix()),
        }
    }
}

/// Returned when a string is not a known field identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field name: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownField(s.to_string());

        let channel = [Channel::L, Channel::A, Channel::B]
            .into_iter()
            .find(|c| s.starts_with(c.prefix()))
            .ok_or_else(unknown)?;

        match &s[channel.prefix().len()..] {
            "" => Ok(Self::legacy(channel)),
            // Slots only exist for L* and b*; a* is a legacy-only field.
            digits if channel != Channel::A && digits.len() == 1 => digits
                .parse::<u8>()
                .ok()
                .and_then(Slot::new)
                .map(|slot| Self::slotted(channel, slot))
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl Serialize for FieldName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_fields() {
        assert_eq!("lValue".parse(), Ok(FieldName::legacy(Channel::L)));
        assert_eq!("aValue".parse(), Ok(FieldName::legacy(Channel::A)));
        assert_eq!("bValue".parse(), Ok(FieldName::legacy(Channel::B)));
    }

    #[test]
    fn test_parse_slotted_fields() {
        let slot2 = Slot::new(2).unwrap();
        assert_eq!("bValue2".parse(), Ok(FieldName::slotted(Channel::B, slot2)));
        assert_eq!("lValue1".parse(), Ok(FieldName::slotted(Channel::L, Slot::FIRST)));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for name in ["", "cValue", "lValue0", "lValue4", "aValue1", "lValueX", "LVALUE"] {
            assert!(name.parse::<FieldName>().is_err(), "{name} should not parse");
        }
    }

    #[test]
    fn test_display_matches_form_ids() {
        for name in ["lValue", "aValue", "bValue", "lValue1", "bValue3"] {
            let field: FieldName = name.parse().unwrap();
            assert_eq!(field.to_string(), name);
        }
    }

    #[test]
    fn test_only_first_slot_is_mandatory() {
        let mandatory: Vec<bool> = Slot::all().map(|s| s.is_mandatory()).collect();
        assert_eq!(mandatory, vec![true, false, false]);
    }
}
