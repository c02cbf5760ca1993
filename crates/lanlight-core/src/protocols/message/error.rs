use thiserror::Error;

use crate::protocols::common::reader::ShortRead;
use crate::protocols::header::HeaderError;
use crate::protocols::scalar::ScalarError;

/// Errors returned by message decoding and encoding.
///
/// # Examples
/// ```
/// use lanlight_core::protocols::message::MessageError;
///
/// let err = MessageError::UnsupportedType { code: 0xFFFF };
/// assert_eq!(err.to_string(), "unsupported message type: 65535");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Frame header could not be decoded.
    #[error(transparent)]
    Header(#[from] HeaderError),
    /// Discriminator outside the known request set.
    #[error("unsupported message type: {code}")]
    UnsupportedType { code: u16 },
    /// Payload shorter than the fixed length of its message type.
    #[error("{message} payload too short: need {needed} bytes, got {actual}")]
    TruncatedBuffer {
        message: &'static str,
        needed: usize,
        actual: usize,
    },
    /// Embedded scalar failed its own decode or encode.
    #[error(transparent)]
    MalformedScalar(#[from] ScalarError),
}

impl MessageError {
    pub(crate) fn truncated(message: &'static str, short: ShortRead) -> Self {
        MessageError::TruncatedBuffer {
            message,
            needed: short.needed,
            actual: short.actual,
        }
    }
}
