use thiserror::Error;

/// Errors returned by the shared scalar codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarError {
    #[error("{scalar} too short: need {needed} bytes, got {actual}")]
    TooShort {
        scalar: &'static str,
        needed: usize,
        actual: usize,
    },
    #[error("color kelvin out of range: {kelvin} (expected {min}..={max})")]
    KelvinOutOfRange { kelvin: u16, min: u16, max: u16 },
    #[error("label is not valid UTF-8 (first bad byte at offset {offset})")]
    InvalidLabel { offset: usize },
}
