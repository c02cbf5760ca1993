//! PCAP/PCAPNG source implementation.
//!
//! This module provides a `PacketSource` backed by PCAP or PCAPNG files. It
//! handles file I/O and low-level block parsing, emitting raw frames with
//! nanosecond timestamps for the capture inspector.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::PcapFileSource;
