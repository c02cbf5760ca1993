use std::io::{Read, Seek, SeekFrom};

use pcap_parser::Linktype;

use super::error::PcapSourceError;
use super::layout;
use crate::protocols::scalar::Timestamp;

/// Read the magic bytes and rewind the reader to the start.
///
/// # Errors
/// Returns `PcapSourceError` when the reader cannot be read or rewound.
pub fn read_magic_and_rewind<R: Read + Seek>(reader: &mut R) -> Result<[u8; 4], PcapSourceError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(magic)
}

pub fn is_pcapng_magic(magic: &[u8; 4]) -> bool {
    magic == &layout::PCAPNG_MAGIC
}

/// Resolve the linktype for a given interface id, defaulting to Ethernet.
pub fn linktype_for_interface(linktypes: &[Linktype], if_id: u32) -> Linktype {
    linktypes
        .get(if_id as usize)
        .copied()
        .unwrap_or(Linktype::ETHERNET)
}

/// Convert a legacy PCAP record timestamp. `fraction` holds microseconds, or
/// nanoseconds for nanosecond-precision files.
pub fn legacy_ts(ts_sec: u32, fraction: u32, nanosecond: bool) -> Timestamp {
    let scale = if nanosecond { 1 } else { layout::NANOS_PER_MICRO };
    Timestamp(ts_sec as i64 * layout::NANOS_PER_SECOND + fraction as i64 * scale)
}

/// Convert a PCAPNG high/low timestamp (microsecond resolution).
pub fn pcapng_ts(ts_high: u32, ts_low: u32) -> Timestamp {
    let ticks = ((ts_high as u64) << 32) | (ts_low as u64);
    Timestamp((ticks as i64).saturating_mul(layout::NANOS_PER_MICRO))
}

#[cfg(test)]
mod tests {
    use super::{is_pcapng_magic, legacy_ts, linktype_for_interface, pcapng_ts, read_magic_and_rewind};
    use crate::protocols::scalar::Timestamp;
    use crate::source::pcap::error::PcapSourceError;
    use pcap_parser::Linktype;
    use std::io::Cursor;
    use std::io::Read;

    #[test]
    fn detect_pcapng_magic() {
        let data = super::layout::PCAPNG_MAGIC;
        assert!(is_pcapng_magic(&data));
        assert!(!is_pcapng_magic(&[0xd4, 0xc3, 0xb2, 0xa1]));
    }

    #[test]
    fn read_magic_rewinds() {
        let bytes = [0x0a, 0x0d, 0x0d, 0x0a, 0x01];
        let mut cursor = Cursor::new(bytes);
        let magic = read_magic_and_rewind(&mut cursor).unwrap();
        assert_eq!(magic, [0x0a, 0x0d, 0x0d, 0x0a]);
        let mut buf = [0u8; 1];
        cursor.read_exact(&mut buf).unwrap();
        assert_eq!(buf[0], 0x0a);
    }

    #[test]
    fn read_magic_too_short() {
        let bytes = [0x0a, 0x0d, 0x0d];
        let mut cursor = Cursor::new(bytes);
        let err = read_magic_and_rewind(&mut cursor).unwrap_err();
        assert!(matches!(err, PcapSourceError::Io(_)));
    }

    #[test]
    fn linktype_defaults_to_ethernet_when_missing() {
        let linktypes = [Linktype::RAW];
        assert_eq!(linktype_for_interface(&linktypes, 0), Linktype::RAW);
        assert_eq!(linktype_for_interface(&linktypes, 1), Linktype::ETHERNET);
    }

    #[test]
    fn timestamps_convert_to_nanoseconds() {
        assert_eq!(legacy_ts(1, 500_000, false), Timestamp(1_500_000_000));
        assert_eq!(legacy_ts(1, 5, true), Timestamp(1_000_000_005));
        assert_eq!(pcapng_ts(0, 1_500_000), Timestamp(1_500_000_000));
        assert_eq!(pcapng_ts(1, 0), Timestamp((1i64 << 32) * 1_000));
    }
}
