use std::collections::VecDeque;

use super::{PacketEvent, PacketSource, SourceError};

/// In-memory source, handy for replaying frames built by hand.
///
/// # Examples
/// ```
/// use lanlight_core::{MemorySource, PacketSource};
///
/// let mut source = MemorySource::new(Vec::new());
/// assert!(source.next_packet()?.is_none());
/// # Ok::<(), lanlight_core::SourceError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    packets: VecDeque<PacketEvent>,
}

impl MemorySource {
    pub fn new(packets: Vec<PacketEvent>) -> Self {
        Self {
            packets: packets.into(),
        }
    }

    pub fn push(&mut self, packet: PacketEvent) {
        self.packets.push_back(packet);
    }
}

impl PacketSource for MemorySource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        Ok(self.packets.pop_front())
    }
}
