use std::fs;
use std::path::PathBuf;

use lanlight_core::{PacketSource, PcapFileSource, SourceError, Timestamp};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

#[test]
fn pcap_source_reads_packets_from_fixture() {
    let path = repo_root()
        .join("tests")
        .join("golden")
        .join("discovery")
        .join("input.pcapng");
    let mut source = PcapFileSource::open(&path).unwrap();

    let mut stamps = Vec::new();
    while let Some(event) = source.next_packet().unwrap() {
        stamps.push(event.ts.expect("pcapng timestamp"));
    }

    assert_eq!(stamps.len(), 5);
    assert_eq!(stamps[0], Timestamp(1_700_000_000_000_000_000));
    assert_eq!(stamps[4], Timestamp(1_700_000_002_000_000_000));
}

#[test]
fn pcap_source_reads_legacy_pcap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.pcap");

    let frame = [0u8; 14];
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0xa1b2_c3d4u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&4u16.to_le_bytes());
    bytes.extend_from_slice(&0i32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&65535u32.to_le_bytes());
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&3u32.to_le_bytes());
    bytes.extend_from_slice(&250_000u32.to_le_bytes());
    bytes.extend_from_slice(&(frame.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(frame.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&frame);
    fs::write(&path, bytes).unwrap();

    let mut source = PcapFileSource::open(&path).unwrap();
    let event = source.next_packet().unwrap().expect("one packet");
    assert_eq!(event.ts, Some(Timestamp(3_250_000_000)));
    assert_eq!(event.data.len(), 14);
    assert!(source.next_packet().unwrap().is_none());
}

#[test]
fn pcap_source_rejects_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.pcapng");

    fs::write(&path, [0x0a, 0x0d, 0x0d]).unwrap();
    let err = match PcapFileSource::open(&path) {
        Ok(_) => panic!("expected truncated file to be rejected"),
        Err(err) => err,
    };

    assert!(matches!(err, SourceError::Io(_)));
}
