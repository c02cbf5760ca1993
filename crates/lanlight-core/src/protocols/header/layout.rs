use std::ops::Range;

pub const HEADER_LEN: usize = 36;

// Frame.
pub const SIZE_RANGE: Range<usize> = 0..2;
pub const FLAGS_RANGE: Range<usize> = 2..4;
pub const SOURCE_RANGE: Range<usize> = 4..8;

// Frame address.
pub const TARGET_RANGE: Range<usize> = 8..16;
pub const RESPONSE_FLAGS_OFFSET: usize = 22;
pub const SEQUENCE_OFFSET: usize = 23;

// Protocol header.
pub const TYPE_RANGE: Range<usize> = 32..34;

pub const PROTOCOL_NUMBER: u16 = 1024;

pub const ORIGIN_SHIFT: u16 = 14;
pub const ORIGIN_MASK: u16 = 0b11;
pub const TAGGED_BIT: u16 = 1 << 13;
pub const ADDRESSABLE_BIT: u16 = 1 << 12;
pub const PROTOCOL_MASK: u16 = 0x0FFF;

pub const RES_REQUIRED_BIT: u8 = 0b01;
pub const ACK_REQUIRED_BIT: u8 = 0b10;

/// Only the low six bytes of `target` carry the device MAC address.
pub const TARGET_MAC_MASK: u64 = 0x0000_FFFF_FFFF_FFFF;
