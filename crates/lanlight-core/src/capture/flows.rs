use std::collections::BTreeMap;
use std::net::SocketAddr;

use crate::FlowSummary;

use super::udp::UdpPacket;

/// Datagram and payload byte counts per (source, destination) pair.
///
/// Keys are ordered, so summaries come out sorted by source then
/// destination with IPv4 endpoints ahead of IPv6.
#[derive(Debug, Default)]
pub(crate) struct FlowTable {
    counts: BTreeMap<(SocketAddr, SocketAddr), (u64, u64)>,
}

impl FlowTable {
    pub(crate) fn add(&mut self, packet: &UdpPacket<'_>) {
        let (packets, bytes) = self
            .counts
            .entry((packet.src(), packet.dst()))
            .or_default();
        *packets += 1;
        *bytes += packet.payload.len() as u64;
    }

    pub(crate) fn into_summaries(self) -> Vec<FlowSummary> {
        self.counts
            .into_iter()
            .map(|((src, dst), (packets, bytes))| FlowSummary {
                src: src.to_string(),
                dst: dst.to_string(),
                packets,
                bytes,
            })
            .collect()
    }
}
