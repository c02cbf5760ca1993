pub const PCAPNG_MAGIC: [u8; 4] = [0x0a, 0x0d, 0x0d, 0x0a];
pub const PCAP_READER_BUFFER_SIZE: usize = 64 * 1024;

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
/// Default PCAPNG timestamp resolution (no `if_tsresol` option).
pub const NANOS_PER_MICRO: i64 = 1_000;
