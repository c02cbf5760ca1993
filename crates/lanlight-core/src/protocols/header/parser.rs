use serde::{Deserialize, Serialize};

use crate::protocols::common::writer::LeWriter;

use super::error::HeaderError;
use super::layout;
use super::reader::HeaderReader;

/// Decoded 36-byte frame header (frame, frame address and protocol header).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Total frame size in bytes, header included.
    pub size: u16,
    pub origin: u8,
    /// Set when the frame addresses every device (`target` is zero).
    pub tagged: bool,
    pub addressable: bool,
    pub protocol: u16,
    /// Client identifier echoed back in responses.
    pub source: u32,
    /// Device MAC address in the low six bytes, or zero for all devices.
    pub target: u64,
    pub ack_required: bool,
    pub res_required: bool,
    pub sequence: u8,
    /// Message-type discriminator.
    pub message_type: u16,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            size: layout::HEADER_LEN as u16,
            origin: 0,
            tagged: true,
            addressable: true,
            protocol: layout::PROTOCOL_NUMBER,
            source: 0,
            target: 0,
            ack_required: false,
            res_required: false,
            sequence: 0,
            message_type: 0,
        }
    }
}

impl Header {
    /// Header addressed to a single device, or to all devices when `target`
    /// is `None`.
    pub fn new(message_type: u16, source: u32, target: Option<u64>) -> Self {
        Self {
            tagged: target.is_none(),
            target: target.unwrap_or(0) & layout::TARGET_MAC_MASK,
            source,
            message_type,
            ..Self::default()
        }
    }

    /// Header for a device reply to `request`: same source, sequence and
    /// target, untagged, no further acknowledgement requested.
    pub fn reply_to(request: &Header, message_type: u16, device: u64) -> Self {
        Self {
            tagged: false,
            source: request.source,
            target: device & layout::TARGET_MAC_MASK,
            sequence: request.sequence,
            message_type,
            ..Self::default()
        }
    }

    /// Device MAC address carried in `target`.
    pub fn target_mac(&self) -> [u8; 6] {
        let bytes = self.target.to_le_bytes();
        [bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]]
    }

    pub fn encode(&self) -> [u8; layout::HEADER_LEN] {
        let flags = ((self.origin as u16 & layout::ORIGIN_MASK) << layout::ORIGIN_SHIFT)
            | flag_bit(self.tagged, layout::TAGGED_BIT)
            | flag_bit(self.addressable, layout::ADDRESSABLE_BIT)
            | (self.protocol & layout::PROTOCOL_MASK);
        let response_flags = flag_bit(self.ack_required, layout::ACK_REQUIRED_BIT as u16)
            | flag_bit(self.res_required, layout::RES_REQUIRED_BIT as u16);

        let mut writer = LeWriter::new(layout::HEADER_LEN);
        writer
            .put_u16_le(layout::SIZE_RANGE.clone(), self.size)
            .put_u16_le(layout::FLAGS_RANGE.clone(), flags)
            .put_u32_le(layout::SOURCE_RANGE.clone(), self.source)
            .put_u64_le(layout::TARGET_RANGE.clone(), self.target)
            .put_u8(layout::RESPONSE_FLAGS_OFFSET, response_flags as u8)
            .put_u8(layout::SEQUENCE_OFFSET, self.sequence)
            .put_u16_le(layout::TYPE_RANGE.clone(), self.message_type);

        let mut out = [0u8; layout::HEADER_LEN];
        out.copy_from_slice(&writer.finish());
        out
    }
}

fn flag_bit(set: bool, bit: u16) -> u16 {
    if set { bit } else { 0 }
}

/// Decode the frame header from the front of `bytes`.
///
/// Trailing bytes (the payload) are ignored.
pub fn parse_header(bytes: &[u8]) -> Result<Header, HeaderError> {
    let reader = HeaderReader::new(bytes);
    reader.require_len(layout::HEADER_LEN)?;

    let flags = reader.read_frame_flags()?;
    if flags.protocol != layout::PROTOCOL_NUMBER {
        return Err(HeaderError::InvalidProtocol {
            value: flags.protocol,
        });
    }
    let (ack_required, res_required) = reader.read_response_flags()?;

    Ok(Header {
        size: reader.read_u16_le(layout::SIZE_RANGE.clone())?,
        origin: flags.origin,
        tagged: flags.tagged,
        addressable: flags.addressable,
        protocol: flags.protocol,
        source: reader.read_u32_le(layout::SOURCE_RANGE.clone())?,
        target: reader.read_u64_le(layout::TARGET_RANGE.clone())?,
        ack_required,
        res_required,
        sequence: reader.read_u8(layout::SEQUENCE_OFFSET)?,
        message_type: reader.read_u16_le(layout::TYPE_RANGE.clone())?,
    })
}
