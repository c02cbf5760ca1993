use serde::{Deserialize, Serialize};

use crate::protocols::common::hex_bytes;
use crate::protocols::common::writer::LeWriter;
use crate::protocols::scalar::{Color, Label, PowerLevel, WireScalar};

use super::error::MessageError;
use super::kind::RequestKind;
use super::layout;
use super::reader::PayloadReader;

/// Fixed-length body of a request message.
///
/// `decode` checks the full fixed length up front, reads from the front of
/// the slice and ignores trailing bytes. `encode` is the inverse and always
/// returns exactly `KIND.payload_len()` bytes.
pub trait RequestPayload: Sized {
    const KIND: RequestKind;

    fn decode(payload: &[u8]) -> Result<Self, MessageError>;

    fn encode(&self) -> Result<Vec<u8>, MessageError>;
}

fn reader_for(kind: RequestKind, payload: &[u8]) -> Result<PayloadReader<'_>, MessageError> {
    let reader = PayloadReader::new(kind.name(), payload);
    reader.require_len(kind.payload_len())?;
    Ok(reader)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPower {
    pub level: PowerLevel,
}

impl RequestPayload for SetPower {
    const KIND: RequestKind = RequestKind::SetPower;

    fn decode(payload: &[u8]) -> Result<Self, MessageError> {
        let reader = reader_for(Self::KIND, payload)?;
        Ok(Self {
            level: reader.read_scalar(layout::set_power::LEVEL_RANGE)?,
        })
    }

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        let mut writer = LeWriter::new(layout::set_power::LEN);
        writer.put_slice(layout::set_power::LEVEL_RANGE, &self.level.encode()?);
        Ok(writer.finish())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetLabel {
    pub label: Label,
}

impl RequestPayload for SetLabel {
    const KIND: RequestKind = RequestKind::SetLabel;

    fn decode(payload: &[u8]) -> Result<Self, MessageError> {
        let reader = reader_for(Self::KIND, payload)?;
        Ok(Self {
            label: reader.read_scalar(layout::set_label::LABEL_RANGE)?,
        })
    }

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(self.label.encode()?)
    }
}

/// Opaque 64-byte payload the device must send back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoRequest {
    #[serde(with = "hex_bytes")]
    pub payload: [u8; layout::ECHO_PAYLOAD_LEN],
}

impl RequestPayload for EchoRequest {
    const KIND: RequestKind = RequestKind::EchoRequest;

    fn decode(payload: &[u8]) -> Result<Self, MessageError> {
        let reader = reader_for(Self::KIND, payload)?;
        Ok(Self {
            payload: reader.read_array(layout::echo::PAYLOAD_RANGE)?,
        })
    }

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(self.payload.to_vec())
    }
}

/// Change colour over `duration` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSetColor {
    pub color: Color,
    pub duration: u32,
}

impl RequestPayload for LightSetColor {
    const KIND: RequestKind = RequestKind::LightSetColor;

    // Byte 0 is reserved and never inspected.
    fn decode(payload: &[u8]) -> Result<Self, MessageError> {
        let reader = reader_for(Self::KIND, payload)?;
        Ok(Self {
            color: reader.read_scalar(layout::light_set_color::COLOR_RANGE)?,
            duration: reader.read_u32_le(layout::light_set_color::DURATION_RANGE)?,
        })
    }

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        let mut writer = LeWriter::new(layout::light_set_color::LEN);
        writer
            .put_slice(layout::light_set_color::COLOR_RANGE, &self.color.encode()?)
            .put_u32_le(layout::light_set_color::DURATION_RANGE, self.duration);
        Ok(writer.finish())
    }
}

/// Change power level over `duration` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSetPower {
    pub level: PowerLevel,
    pub duration: u32,
}

impl RequestPayload for LightSetPower {
    const KIND: RequestKind = RequestKind::LightSetPower;

    fn decode(payload: &[u8]) -> Result<Self, MessageError> {
        let reader = reader_for(Self::KIND, payload)?;
        Ok(Self {
            level: reader.read_scalar(layout::light_set_power::LEVEL_RANGE)?,
            duration: reader.read_u32_le(layout::light_set_power::DURATION_RANGE)?,
        })
    }

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        let mut writer = LeWriter::new(layout::light_set_power::LEN);
        writer
            .put_slice(layout::light_set_power::LEVEL_RANGE, &self.level.encode()?)
            .put_u32_le(layout::light_set_power::DURATION_RANGE, self.duration);
        Ok(writer.finish())
    }
}

/// Decoded request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    SetPower(SetPower),
    SetLabel(SetLabel),
    EchoRequest(EchoRequest),
    LightSetColor(LightSetColor),
    LightSetPower(LightSetPower),
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::SetPower(_) => RequestKind::SetPower,
            Request::SetLabel(_) => RequestKind::SetLabel,
            Request::EchoRequest(_) => RequestKind::EchoRequest,
            Request::LightSetColor(_) => RequestKind::LightSetColor,
            Request::LightSetPower(_) => RequestKind::LightSetPower,
        }
    }

    pub fn message_type(&self) -> u16 {
        self.kind().message_type()
    }

    pub fn encode(&self) -> Result<Vec<u8>, MessageError> {
        match self {
            Request::SetPower(body) => body.encode(),
            Request::SetLabel(body) => body.encode(),
            Request::EchoRequest(body) => body.encode(),
            Request::LightSetColor(body) => body.encode(),
            Request::LightSetPower(body) => body.encode(),
        }
    }
}

/// Decode the body of a `kind` request from the front of `payload`.
pub fn decode_request(kind: RequestKind, payload: &[u8]) -> Result<Request, MessageError> {
    Ok(match kind {
        RequestKind::SetPower => Request::SetPower(SetPower::decode(payload)?),
        RequestKind::SetLabel => Request::SetLabel(SetLabel::decode(payload)?),
        RequestKind::EchoRequest => Request::EchoRequest(EchoRequest::decode(payload)?),
        RequestKind::LightSetColor => Request::LightSetColor(LightSetColor::decode(payload)?),
        RequestKind::LightSetPower => Request::LightSetPower(LightSetPower::decode(payload)?),
    })
}
