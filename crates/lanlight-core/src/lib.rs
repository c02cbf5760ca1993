//! lanlight core library: LAN light protocol codecs and capture inspection.
//!
//! The codec side turns raw UDP datagrams into typed request envelopes and
//! typed responses back into datagrams. Each protocol layer follows the same
//! split: `layout` holds byte offsets and constants, `reader` wraps bounds
//! checked access, `parser` builds typed values, `error` names the failure.
//! Decoding is byte-oriented and side-effect free; all I/O is isolated in the
//! `source` modules.
//!
//! The capture side replays PCAP/PCAPNG files through the same codecs and
//! aggregates what it sees into a deterministic [`CaptureReport`].
//!
//! Invariants:
//! - Decoders never read past the end of a buffer.
//! - Encoders always produce the fixed payload length of the message type.
//! - Report outputs are deterministic and stable across runs.
//!
//! # Examples
//! ```
//! use lanlight_core::decode_envelope;
//!
//! let frame = hex::decode(
//!     "240000340000000000000000000000000000000000000000000000000000000002000000",
//! )?;
//! let envelope = decode_envelope(&frame)?;
//! assert_eq!(envelope.header.message_type, 2);
//! assert!(envelope.payload.is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod capture;
pub mod protocols;
mod source;

pub use capture::{InspectError, InspectOptions, LAN_PORT, inspect_pcap_file, inspect_source};
pub use protocols::header::{Header, HeaderError, parse_header};
pub use protocols::message::{
    Direction, Envelope, MessageError, Request, Response, decode_envelope, encode_envelope,
    encode_request_envelope,
};
pub use protocols::scalar::{Color, Label, PowerLevel, ScalarError, Timestamp};
pub use source::{MemorySource, PacketEvent, PacketSource, PcapFileSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no capture time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Aggregated capture inspection report with deterministic ordering.
///
/// # Examples
/// ```
/// use lanlight_core::make_stub_report;
///
/// let report = make_stub_report("capture.pcapng", 123);
/// assert_eq!(report.report_version, lanlight_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the last captured frame, or the epoch.
    pub generated_at: String,
    pub input: InputInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_summary: Option<CaptureSummary>,
    /// Message counts sorted by type code.
    pub messages: Vec<MessageSummary>,
    /// Flow summaries sorted by source then destination.
    pub flows: Vec<FlowSummary>,
    /// Decode issues sorted by id.
    pub issues: Vec<Issue>,
}

impl CaptureReport {
    pub fn issue_count(&self) -> u64 {
        self.issues.iter().map(|issue| issue.count).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the inspector.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Basic capture summary (timestamps may be absent).
///
/// # Examples
/// ```
/// use lanlight_core::CaptureSummary;
///
/// let summary = CaptureSummary {
///     packets_total: 10,
///     lan_packets: 4,
///     time_start: None,
///     time_end: None,
/// };
/// assert!(summary.lan_packets <= summary.packets_total);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSummary {
    /// Every frame in the capture.
    pub packets_total: u64,
    /// UDP datagrams on the LAN port.
    pub lan_packets: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
}

/// Count of successfully decoded frames for one message type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSummary {
    pub type_code: u16,
    pub name: String,
    pub direction: Direction,
    pub count: u64,
}

/// Flow-level summary for a UDP endpoint pair.
///
/// # Examples
/// ```
/// use lanlight_core::FlowSummary;
///
/// let flow = FlowSummary {
///     src: "192.168.1.10:50000".to_string(),
///     dst: "192.168.1.255:56700".to_string(),
///     packets: 1,
///     bytes: 36,
/// };
/// assert_eq!(flow.bytes, 36);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSummary {
    /// Source endpoint in `ip:port` form.
    pub src: String,
    /// Destination endpoint in `ip:port` form.
    pub dst: String,
    pub packets: u64,
    /// UDP payload bytes.
    pub bytes: u64,
}

/// Aggregated decode failure.
///
/// # Examples
/// ```
/// use lanlight_core::Issue;
///
/// let issue = Issue {
///     id: "LAN-TOO-SHORT".to_string(),
///     message: "Datagram shorter than its header or fixed payload length".to_string(),
///     count: 1,
///     examples: vec!["10.0.0.1:50000 -> 10.0.0.2:56700 @ 1970-01-01T00:00:00Z".to_string()],
/// };
/// assert_eq!(issue.count, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Stable identifier (e.g., `LAN-HEADER`).
    pub id: String,
    pub message: String,
    pub count: u64,
    /// At most three example contexts, formatted as `src -> dst @ ts`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Build a stub report with base fields filled and empty aggregates.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> CaptureReport {
    CaptureReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "lanlight".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        capture_summary: None,
        messages: vec![],
        flows: vec![],
        issues: vec![],
    }
}
