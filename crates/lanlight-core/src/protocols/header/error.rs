use thiserror::Error;

use crate::protocols::common::reader::ShortRead;

/// Errors returned by frame header decoding.
///
/// # Examples
/// ```
/// use lanlight_core::protocols::header::HeaderError;
///
/// let err = HeaderError::InvalidProtocol { value: 1 };
/// assert!(err.to_string().contains("invalid protocol number"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("header too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("invalid protocol number: {value}")]
    InvalidProtocol { value: u16 },
}

impl From<ShortRead> for HeaderError {
    fn from(value: ShortRead) -> Self {
        HeaderError::TooShort {
            needed: value.needed,
            actual: value.actual,
        }
    }
}
