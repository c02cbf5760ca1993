//! Message payload codecs.
//!
//! Inbound frames are decoded by [`decode_envelope`]: the header is parsed,
//! its discriminator is resolved against [`REQUEST_DISPATCH`] and, when the
//! type carries a body, the matching [`RequestPayload`] decoder reads the
//! fixed-length payload. Outbound [`Response`] values encode to their fixed
//! payload length and are framed with [`encode_envelope`].
//!
//! Every decoder checks the full fixed length of its payload before reading,
//! so a truncated datagram yields [`MessageError::TruncatedBuffer`] instead
//! of a panic. Byte offsets live in `layout`; scalar fields delegate to the
//! [`scalar`](crate::protocols::scalar) codecs.

pub mod envelope;
pub mod error;
pub mod kind;
pub mod layout;
pub mod reader;
pub mod request;
pub mod response;

pub use envelope::{Envelope, decode_envelope, encode_envelope, encode_request_envelope};
pub use error::MessageError;
pub use kind::{
    Direction, Dispatch, MESSAGE_TYPES, REQUEST_DISPATCH, RequestKind, message_direction,
    message_name, resolve,
};
pub use request::{
    EchoRequest, LightSetColor, LightSetPower, Request, RequestPayload, SetLabel, SetPower,
    decode_request,
};
pub use response::{
    EchoResponse, LightState, LightStatePower, Response, ResponsePayload, SERVICE_UDP,
    StateGroup, StateHostFirmware, StateHostInfo, StateInfo, StateLabel, StateLocation,
    StatePower, StateService, StateVersion, StateWifiFirmware, StateWifiInfo,
};
