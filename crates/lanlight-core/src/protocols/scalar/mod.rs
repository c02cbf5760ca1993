//! Shared scalar value types.
//!
//! Payload layouts embed a handful of small values with their own
//! fixed-length wire form. Each lives in its own module and implements
//! [`WireScalar`], so the per-message codecs only place them at an offset.
//!
//! | Scalar | Length | Form |
//! |---|---|---|
//! | [`PowerLevel`] | 2 | u16 LE |
//! | [`Label`] | 32 | UTF-8, zero padded, truncated |
//! | [`Color`] | 8 | hue, saturation, brightness, kelvin as u16 LE |
//! | [`Timestamp`] | 8 | i64 LE, nanoseconds since the Unix epoch |

pub mod color;
pub mod error;
pub mod label;
pub mod power;
pub mod timestamp;

pub use color::Color;
pub use error::ScalarError;
pub use label::Label;
pub use power::PowerLevel;
pub use timestamp::Timestamp;

/// Fixed-length binary codec contract shared by the scalar types.
///
/// `decode` reads exactly `LEN` bytes from the front of the slice and ignores
/// the rest; `encode` always returns exactly `LEN` bytes.
pub trait WireScalar: Sized {
    const LEN: usize;
    const NAME: &'static str;

    fn decode(bytes: &[u8]) -> Result<Self, ScalarError>;

    fn encode(&self) -> Result<Vec<u8>, ScalarError>;
}

/// Take the leading `T::LEN` bytes or report which scalar came up short.
pub(crate) fn leading<T: WireScalar>(bytes: &[u8]) -> Result<&[u8], ScalarError> {
    bytes.get(..T::LEN).ok_or(ScalarError::TooShort {
        scalar: T::NAME,
        needed: T::LEN,
        actual: bytes.len(),
    })
}
