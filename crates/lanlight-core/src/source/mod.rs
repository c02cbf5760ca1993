//! Packet sources feeding the capture inspector.
//!
//! A source yields raw link-layer frames with their capture timestamp. All
//! file I/O of the crate lives here; the codecs never touch a file.

mod memory;
mod pcap;

pub use memory::MemorySource;
pub use pcap::PcapFileSource;

use pcap_parser::Linktype;
use thiserror::Error;

use crate::protocols::scalar::Timestamp;

/// One captured frame.
#[derive(Debug, Clone)]
pub struct PacketEvent {
    /// Capture time, when the file records one.
    pub ts: Option<Timestamp>,
    pub linktype: Linktype,
    pub data: Vec<u8>,
}

pub trait PacketSource {
    /// Next frame, or `Ok(None)` at the end of the capture.
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PCAP parse error: {0}")]
    Pcap(String),
}

impl From<pcap::error::PcapSourceError> for SourceError {
    fn from(value: pcap::error::PcapSourceError) -> Self {
        match value {
            pcap::error::PcapSourceError::Io(err) => SourceError::Io(err),
            pcap::error::PcapSourceError::Pcap { context, message } => {
                SourceError::Pcap(format!("{context}: {message}"))
            }
        }
    }
}
