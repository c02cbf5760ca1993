use serde::{Deserialize, Serialize};

use crate::protocols::header::{HEADER_LEN, Header, parse_header};

use super::error::MessageError;
use super::kind::{message_name, resolve};
use super::request::{Request, decode_request};
use super::response::Response;

/// One decoded inbound message: header plus optional request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub header: Header,
    /// `None` for query messages that carry no body.
    pub payload: Option<Request>,
}

impl Envelope {
    pub fn message_type(&self) -> u16 {
        self.header.message_type
    }

    pub fn message_name(&self) -> &'static str {
        message_name(self.header.message_type).unwrap_or("Unknown")
    }
}

/// Decode an inbound frame into its header and request body.
///
/// Header failures propagate unchanged. A discriminator outside the request
/// set fails with [`MessageError::UnsupportedType`]; query types decode to an
/// envelope without payload.
///
/// # Examples
/// ```
/// use lanlight_core::protocols::header::Header;
/// use lanlight_core::protocols::message::{decode_envelope, encode_request_envelope};
///
/// let frame = encode_request_envelope(&Header::new(12, 1, None), None)?;
/// let envelope = decode_envelope(&frame)?;
/// assert_eq!(envelope.message_name(), "GetHostInfo");
/// assert!(envelope.payload.is_none());
/// # Ok::<(), lanlight_core::protocols::message::MessageError>(())
/// ```
pub fn decode_envelope(buffer: &[u8]) -> Result<Envelope, MessageError> {
    let header = parse_header(buffer)?;
    let Some(kind) = resolve(header.message_type)? else {
        log::debug!(
            "decoded {} (type {}) without payload",
            message_name(header.message_type).unwrap_or("Unknown"),
            header.message_type
        );
        return Ok(Envelope {
            header,
            payload: None,
        });
    };

    let body = buffer.get(HEADER_LEN..).unwrap_or_default();
    let payload = decode_request(kind, body)?;
    log::debug!(
        "decoded {} (type {}) from source {:#010x} seq {}",
        kind.name(),
        header.message_type,
        header.source,
        header.sequence
    );
    Ok(Envelope {
        header,
        payload: Some(payload),
    })
}

fn frame(header: &Header, message_type: u16, payload: &[u8]) -> Vec<u8> {
    let mut header = *header;
    header.message_type = message_type;
    header.size = (HEADER_LEN + payload.len()) as u16;

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&header.encode());
    out.extend_from_slice(payload);
    out
}

/// Frame a response behind `header`, fixing up its size and type fields.
pub fn encode_envelope(header: &Header, response: &Response) -> Result<Vec<u8>, MessageError> {
    let payload = response.encode()?;
    Ok(frame(header, response.message_type(), &payload))
}

/// Frame a request. With no body the header's own type is kept, which is how
/// query messages are sent.
pub fn encode_request_envelope(
    header: &Header,
    request: Option<&Request>,
) -> Result<Vec<u8>, MessageError> {
    match request {
        Some(request) => Ok(frame(header, request.message_type(), &request.encode()?)),
        None => Ok(frame(header, header.message_type, &[])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::header::HeaderError;
    use crate::protocols::message::layout;
    use crate::protocols::message::request::{SetLabel, SetPower};
    use crate::protocols::message::response::{LightStatePower, StateService};
    use crate::protocols::scalar::{Label, PowerLevel};

    fn header(message_type: u16) -> Header {
        Header::new(message_type, 0x1234, Some(0x0000_d073_d500_0001))
    }

    #[test]
    fn query_types_have_no_payload() {
        let frame = encode_request_envelope(&header(layout::GET_HOST_INFO), None).unwrap();
        assert_eq!(frame.len(), HEADER_LEN);
        let envelope = decode_envelope(&frame).unwrap();
        assert_eq!(envelope.payload, None);
        assert_eq!(envelope.message_type(), layout::GET_HOST_INFO);
        assert_eq!(envelope.message_name(), "GetHostInfo");
    }

    #[test]
    fn request_frame_round_trips() {
        let request = Request::SetLabel(SetLabel {
            label: Label::new("Desk"),
        });
        let frame = encode_request_envelope(&header(0), Some(&request)).unwrap();
        assert_eq!(frame.len(), HEADER_LEN + 32);

        let envelope = decode_envelope(&frame).unwrap();
        assert_eq!(envelope.header.size as usize, frame.len());
        assert_eq!(envelope.header.message_type, layout::SET_LABEL);
        assert_eq!(envelope.payload, Some(request));
    }

    #[test]
    fn unsupported_type_is_an_error() {
        let frame = encode_request_envelope(&header(0xFFFF), None).unwrap();
        let err = decode_envelope(&frame).unwrap_err();
        assert_eq!(err, MessageError::UnsupportedType { code: 0xFFFF });
    }

    #[test]
    fn response_types_are_not_decoded_as_requests() {
        let frame = encode_envelope(
            &header(0),
            &Response::StateService(StateService {
                service: 1,
                port: 56700,
            }),
        )
        .unwrap();
        let err = decode_envelope(&frame).unwrap_err();
        assert_eq!(
            err,
            MessageError::UnsupportedType {
                code: layout::STATE_SERVICE
            }
        );
    }

    #[test]
    fn header_errors_propagate_unchanged() {
        let err = decode_envelope(&[0u8; 10]).unwrap_err();
        assert_eq!(
            err,
            MessageError::Header(HeaderError::TooShort {
                needed: HEADER_LEN,
                actual: 10
            })
        );
    }

    #[test]
    fn truncated_payload_is_reported() {
        let request = Request::SetPower(SetPower {
            level: PowerLevel::ENABLED,
        });
        let frame = encode_request_envelope(&header(0), Some(&request)).unwrap();
        let err = decode_envelope(&frame[..HEADER_LEN + 1]).unwrap_err();
        assert_eq!(
            err,
            MessageError::TruncatedBuffer {
                message: "SetPower",
                needed: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn response_frame_sets_size_and_type() {
        let mut request = header(layout::LIGHT_GET_POWER);
        request.sequence = 9;
        let reply = Header::reply_to(&request, 0, 0x0000_d073_d500_0001);
        let frame = encode_envelope(
            &reply,
            &Response::LightStatePower(LightStatePower {
                level: PowerLevel::ENABLED,
            }),
        )
        .unwrap();

        let parsed = parse_header(&frame).unwrap();
        assert_eq!(parsed.size, 38);
        assert_eq!(parsed.message_type, layout::LIGHT_STATE_POWER);
        assert_eq!(parsed.sequence, 9);
        assert_eq!(parsed.source, 0x1234);
        assert_eq!(&frame[HEADER_LEN..], &[0xFF, 0xFF]);
    }
}
