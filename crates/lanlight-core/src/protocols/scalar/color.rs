use serde::{Deserialize, Serialize};

use super::{ScalarError, WireScalar, leading};

const HUE_RANGE: std::ops::Range<usize> = 0..2;
const SATURATION_RANGE: std::ops::Range<usize> = 2..4;
const BRIGHTNESS_RANGE: std::ops::Range<usize> = 4..6;
const KELVIN_RANGE: std::ops::Range<usize> = 6..8;

/// Hue, saturation, brightness and white-point (HSBK) colour.
///
/// Hue, saturation and brightness use the full `u16` range (hue wraps at
/// 65536 = 360°). Kelvin must lie in [`Color::KELVIN_MIN`]..=[`Color::KELVIN_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub hue: u16,
    pub saturation: u16,
    pub brightness: u16,
    pub kelvin: u16,
}

impl Color {
    pub const KELVIN_MIN: u16 = 2500;
    pub const KELVIN_MAX: u16 = 9000;

    /// Neutral white at the given brightness.
    pub fn white(brightness: u16, kelvin: u16) -> Self {
        Self {
            hue: 0,
            saturation: 0,
            brightness,
            kelvin,
        }
    }

    /// Hue in degrees (0.0..360.0).
    pub fn hue_degrees(&self) -> f32 {
        self.hue as f32 * 360.0 / 65536.0
    }

    fn validate(&self) -> Result<(), ScalarError> {
        if !(Self::KELVIN_MIN..=Self::KELVIN_MAX).contains(&self.kelvin) {
            return Err(ScalarError::KelvinOutOfRange {
                kelvin: self.kelvin,
                min: Self::KELVIN_MIN,
                max: Self::KELVIN_MAX,
            });
        }
        Ok(())
    }
}

fn field(bytes: &[u8], range: std::ops::Range<usize>) -> u16 {
    u16::from_le_bytes([bytes[range.start], bytes[range.start + 1]])
}

impl WireScalar for Color {
    const LEN: usize = 8;
    const NAME: &'static str = "color";

    fn decode(bytes: &[u8]) -> Result<Self, ScalarError> {
        let bytes = leading::<Self>(bytes)?;
        let color = Color {
            hue: field(bytes, HUE_RANGE),
            saturation: field(bytes, SATURATION_RANGE),
            brightness: field(bytes, BRIGHTNESS_RANGE),
            kelvin: field(bytes, KELVIN_RANGE),
        };
        color.validate()?;
        Ok(color)
    }

    fn encode(&self) -> Result<Vec<u8>, ScalarError> {
        self.validate()?;
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&self.hue.to_le_bytes());
        out.extend_from_slice(&self.saturation.to_le_bytes());
        out.extend_from_slice(&self.brightness.to_le_bytes());
        out.extend_from_slice(&self.kelvin.to_le_bytes());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;
    use crate::protocols::scalar::{ScalarError, WireScalar};

    #[test]
    fn decode_packed_fields() {
        let bytes = [0x55, 0x55, 0xFF, 0xFF, 0x00, 0x80, 0xAC, 0x0D];
        let color = Color::decode(&bytes).unwrap();
        assert_eq!(
            color,
            Color {
                hue: 0x5555,
                saturation: 0xFFFF,
                brightness: 0x8000,
                kelvin: 3500,
            }
        );
        assert_eq!(color.encode().unwrap(), bytes.to_vec());
    }

    #[test]
    fn kelvin_bounds_are_inclusive() {
        assert!(Color::white(0, Color::KELVIN_MIN).encode().is_ok());
        assert!(Color::white(0, Color::KELVIN_MAX).encode().is_ok());
    }

    #[test]
    fn decode_rejects_kelvin_out_of_range() {
        let bytes = [0u8; 8];
        let err = Color::decode(&bytes).unwrap_err();
        assert_eq!(
            err,
            ScalarError::KelvinOutOfRange {
                kelvin: 0,
                min: 2500,
                max: 9000
            }
        );
    }

    #[test]
    fn encode_rejects_kelvin_out_of_range() {
        let err = Color::white(100, 9001).encode().unwrap_err();
        assert!(err.to_string().contains("kelvin out of range"));
    }

    #[test]
    fn hue_degrees_wraps_below_360() {
        let color = Color {
            hue: u16::MAX,
            ..Color::white(0, 3500)
        };
        assert!(color.hue_degrees() < 360.0);
        assert_eq!(Color { hue: 0x8000, ..color }.hue_degrees(), 180.0);
    }
}
