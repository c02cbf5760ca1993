//! Frame header codec.
//!
//! Every LAN message starts with a fixed 36-byte header made of three
//! little-endian sections: the frame (size, protocol number, tagged and
//! addressable flags, source id), the frame address (target MAC, ack/response
//! flags, sequence) and the protocol header (message-type discriminator).
//! Reserved ranges are written as zero and ignored on decode.
//!
//! The protocol number must be 1024; anything else is rejected so foreign
//! datagrams on the LAN port are not mistaken for messages.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::HeaderError;
pub use layout::HEADER_LEN;
pub use parser::{Header, parse_header};
