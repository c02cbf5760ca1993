use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ScalarError, WireScalar, leading};

/// Device power level.
///
/// The protocol only defines standby (0) and enabled (65535), but devices
/// accept and report the raw 16-bit value, so any `u16` is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PowerLevel(pub u16);

impl PowerLevel {
    pub const STANDBY: PowerLevel = PowerLevel(0);
    pub const ENABLED: PowerLevel = PowerLevel(u16::MAX);

    pub fn is_on(self) -> bool {
        self.0 != 0
    }
}

impl From<u16> for PowerLevel {
    fn from(value: u16) -> Self {
        PowerLevel(value)
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PowerLevel::STANDBY => write!(f, "standby"),
            PowerLevel::ENABLED => write!(f, "enabled"),
            PowerLevel(level) => write!(f, "{level}"),
        }
    }
}

impl WireScalar for PowerLevel {
    const LEN: usize = 2;
    const NAME: &'static str = "power level";

    fn decode(bytes: &[u8]) -> Result<Self, ScalarError> {
        let bytes = leading::<Self>(bytes)?;
        Ok(PowerLevel(u16::from_le_bytes([bytes[0], bytes[1]])))
    }

    fn encode(&self) -> Result<Vec<u8>, ScalarError> {
        Ok(self.0.to_le_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::PowerLevel;
    use crate::protocols::scalar::{ScalarError, WireScalar};

    #[test]
    fn standby_and_enabled_survive_decode_then_encode() {
        for bytes in [[0x00, 0x00], [0xFF, 0xFF]] {
            let level = PowerLevel::decode(&bytes).unwrap();
            assert_eq!(level.encode().unwrap(), bytes.to_vec());
        }
        assert_eq!(PowerLevel::decode(&[0xFF, 0xFF]).unwrap(), PowerLevel::ENABLED);
        assert_eq!(PowerLevel::decode(&[0x00, 0x00]).unwrap(), PowerLevel::STANDBY);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let level = PowerLevel::decode(&[0x34, 0x12, 0xAA]).unwrap();
        assert_eq!(level, PowerLevel(0x1234));
    }

    #[test]
    fn decode_short_input() {
        let err = PowerLevel::decode(&[0x01]).unwrap_err();
        assert!(matches!(err, ScalarError::TooShort { needed: 2, actual: 1, .. }));
    }

    #[test]
    fn display_names_known_levels() {
        assert_eq!(PowerLevel::ENABLED.to_string(), "enabled");
        assert_eq!(PowerLevel::STANDBY.to_string(), "standby");
        assert_eq!(PowerLevel(42).to_string(), "42");
        assert!(PowerLevel(42).is_on());
    }
}
