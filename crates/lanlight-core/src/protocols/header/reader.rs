use crate::protocols::common::reader::LeReader;

use super::error::HeaderError;
use super::layout;

/// Decoded flag word at bytes 2..4 of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameFlags {
    pub origin: u8,
    pub tagged: bool,
    pub addressable: bool,
    pub protocol: u16,
}

pub struct HeaderReader<'a> {
    inner: LeReader<'a>,
}

impl<'a> HeaderReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            inner: LeReader::new(bytes),
        }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), HeaderError> {
        Ok(self.inner.require_len(needed)?)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, HeaderError> {
        Ok(self.inner.read_u8(offset)?)
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, HeaderError> {
        Ok(self.inner.read_u16_le(range)?)
    }

    pub fn read_u32_le(&self, range: std::ops::Range<usize>) -> Result<u32, HeaderError> {
        Ok(self.inner.read_u32_le(range)?)
    }

    pub fn read_u64_le(&self, range: std::ops::Range<usize>) -> Result<u64, HeaderError> {
        Ok(self.inner.read_u64_le(range)?)
    }

    pub fn read_frame_flags(&self) -> Result<FrameFlags, HeaderError> {
        let word = self.read_u16_le(layout::FLAGS_RANGE.clone())?;
        Ok(FrameFlags {
            origin: ((word >> layout::ORIGIN_SHIFT) & layout::ORIGIN_MASK) as u8,
            tagged: word & layout::TAGGED_BIT != 0,
            addressable: word & layout::ADDRESSABLE_BIT != 0,
            protocol: word & layout::PROTOCOL_MASK,
        })
    }

    /// Returns `(ack_required, res_required)`.
    pub fn read_response_flags(&self) -> Result<(bool, bool), HeaderError> {
        let flags = self.read_u8(layout::RESPONSE_FLAGS_OFFSET)?;
        Ok((
            flags & layout::ACK_REQUIRED_BIT != 0,
            flags & layout::RES_REQUIRED_BIT != 0,
        ))
    }
}
