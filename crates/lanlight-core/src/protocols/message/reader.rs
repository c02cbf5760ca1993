use std::ops::Range;

use crate::protocols::common::reader::LeReader;
use crate::protocols::scalar::WireScalar;

use super::error::MessageError;

/// Bounds-checked reader over one message payload.
///
/// Errors name the message being decoded so a truncated datagram is easy to
/// trace back to its type.
pub struct PayloadReader<'a> {
    message: &'static str,
    inner: LeReader<'a>,
}

impl<'a> PayloadReader<'a> {
    pub fn new(message: &'static str, payload: &'a [u8]) -> Self {
        Self {
            message,
            inner: LeReader::new(payload),
        }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), MessageError> {
        self.inner
            .require_len(needed)
            .map_err(|short| MessageError::truncated(self.message, short))
    }

    pub fn read_u16_le(&self, range: Range<usize>) -> Result<u16, MessageError> {
        self.inner
            .read_u16_le(range)
            .map_err(|short| MessageError::truncated(self.message, short))
    }

    pub fn read_u32_le(&self, range: Range<usize>) -> Result<u32, MessageError> {
        self.inner
            .read_u32_le(range)
            .map_err(|short| MessageError::truncated(self.message, short))
    }

    pub fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], MessageError> {
        self.inner
            .read_array(range)
            .map_err(|short| MessageError::truncated(self.message, short))
    }

    /// Decode an embedded scalar from its field range.
    pub fn read_scalar<T: WireScalar>(&self, range: Range<usize>) -> Result<T, MessageError> {
        let bytes = self
            .inner
            .read_slice(range)
            .map_err(|short| MessageError::truncated(self.message, short))?;
        Ok(T::decode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::PayloadReader;
    use crate::protocols::message::MessageError;
    use crate::protocols::scalar::{Color, PowerLevel, ScalarError};

    #[test]
    fn truncation_names_the_message() {
        let payload = [0u8; 5];
        let reader = PayloadReader::new("LightSetPower", &payload);
        let err = reader.require_len(6).unwrap_err();
        assert_eq!(
            err,
            MessageError::TruncatedBuffer {
                message: "LightSetPower",
                needed: 6,
                actual: 5
            }
        );
        assert!(err.to_string().starts_with("LightSetPower payload too short"));
    }

    #[test]
    fn scalar_errors_are_wrapped() {
        let payload = [0u8; 9];
        let reader = PayloadReader::new("LightSetColor", &payload);
        let err = reader.read_scalar::<Color>(1..9).unwrap_err();
        assert!(matches!(
            err,
            MessageError::MalformedScalar(ScalarError::KelvinOutOfRange { .. })
        ));
    }

    #[test]
    fn reads_scalar_from_field_range() {
        let payload = [0xAA, 0xFF, 0xFF];
        let reader = PayloadReader::new("test", &payload);
        assert_eq!(
            reader.read_scalar::<PowerLevel>(1..3).unwrap(),
            PowerLevel::ENABLED
        );
    }
}
