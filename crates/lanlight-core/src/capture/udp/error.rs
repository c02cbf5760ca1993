use thiserror::Error;

/// Errors returned while slicing a captured frame down to its UDP payload.
///
/// Note: this error type lives in an internal module; the example is
/// illustrative and not compiled as a public doctest.
///
/// # Examples
/// ```text
/// use lanlight_core::capture::udp::error::UdpError;
///
/// let err = UdpError::MissingNetworkLayer;
/// assert!(err.to_string().contains("missing network layer"));
/// ```
#[derive(Debug, Error)]
pub enum UdpError {
    #[error("frame slice error: {0}")]
    Slice(String),
    #[error("missing network layer in frame")]
    MissingNetworkLayer,
    #[error("missing IP payload in frame")]
    MissingIpPayload,
    #[error("datagram too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
