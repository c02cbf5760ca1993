//! Offline inspection of captured LAN traffic.
//!
//! Frames from a [`PacketSource`] are sliced down to UDP, filtered on the LAN
//! port and handed to the header and message codecs. Request types are fully
//! decoded; response types are named from their header. Anything that fails
//! is folded into report issues rather than aborting the run.

use std::path::Path;

use thiserror::Error;

use crate::protocols::scalar::Timestamp;
use crate::source::{PacketEvent, PacketSource, PcapFileSource, SourceError};
use crate::{CaptureReport, CaptureSummary, DEFAULT_GENERATED_AT, make_stub_report};

mod flows;
mod messages;
mod udp;

use flows::FlowTable;
use messages::{IssueTally, MessageTally, classify};
use udp::{UdpPacket, parse_udp_packet};

/// UDP port LAN devices listen on.
pub const LAN_PORT: u16 = 56700;

/// Knobs for [`inspect_pcap_file`] and [`inspect_source`].
///
/// # Examples
/// ```
/// use lanlight_core::{InspectOptions, LAN_PORT};
///
/// assert_eq!(InspectOptions::default().port, LAN_PORT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// Datagrams are kept when either endpoint uses this port.
    pub port: u16,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self { port: LAN_PORT }
    }
}

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

pub fn inspect_pcap_file(
    path: &Path,
    options: &InspectOptions,
) -> Result<CaptureReport, InspectError> {
    let source = PcapFileSource::open(path)?;
    let bytes = path.metadata()?.len();
    inspect_source(&path.display().to_string(), bytes, source, options)
}

/// Inspect frames from any source; `input_path` and `input_bytes` only feed
/// the report's `input` block.
pub fn inspect_source<S: PacketSource>(
    input_path: &str,
    input_bytes: u64,
    mut source: S,
    options: &InspectOptions,
) -> Result<CaptureReport, InspectError> {
    let mut packets_total = 0u64;
    let mut lan_packets = 0u64;
    let mut first_ts = None;
    let mut last_ts = None;
    let mut flows = FlowTable::default();
    let mut messages = MessageTally::default();
    let mut issues = IssueTally::default();

    while let Some(PacketEvent { ts, linktype, data }) = source.next_packet()? {
        packets_total += 1;
        update_ts_bounds(&mut first_ts, &mut last_ts, ts);
        let udp = match parse_udp_packet(linktype, &data) {
            Ok(Some(udp)) if udp.uses_port(options.port) => udp,
            _ => continue,
        };
        lan_packets += 1;
        flows.add(&udp);
        match classify(udp.payload) {
            Ok(type_code) => messages.add(type_code),
            Err(err) => issues.add(&err, example_context(&udp, ts)),
        }
    }
    log::debug!("inspected {packets_total} frames, {lan_packets} on port {}", options.port);

    let mut report = make_stub_report(input_path, input_bytes);
    let summary = CaptureSummary {
        packets_total,
        lan_packets,
        time_start: first_ts.and_then(Timestamp::to_rfc3339),
        time_end: last_ts.and_then(Timestamp::to_rfc3339),
    };
    report.generated_at = summary
        .time_end
        .clone()
        .or_else(|| summary.time_start.clone())
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    report.capture_summary = Some(summary);

    report.messages = messages.into_summaries();
    report.flows = flows.into_summaries();
    report.issues = issues.into_issues();
    Ok(report)
}

fn update_ts_bounds(
    first: &mut Option<Timestamp>,
    last: &mut Option<Timestamp>,
    ts: Option<Timestamp>,
) {
    let Some(ts) = ts else {
        return;
    };
    if first.is_none_or(|existing| ts < existing) {
        *first = Some(ts);
    }
    if last.is_none_or(|existing| ts > existing) {
        *last = Some(ts);
    }
}

fn example_context(udp: &UdpPacket<'_>, ts: Option<Timestamp>) -> String {
    let when = ts
        .and_then(Timestamp::to_rfc3339)
        .unwrap_or_else(|| "unknown".to_string());
    format!("{} -> {} @ {}", udp.src(), udp.dst(), when)
}
