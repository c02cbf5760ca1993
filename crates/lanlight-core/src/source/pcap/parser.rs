use std::fs::File;
use std::path::Path;

use pcap_parser::{
    Block, LegacyPcapReader, Linktype, PcapBlockOwned, PcapError, PcapNGReader,
    traits::PcapReaderIterator,
};

use crate::source::{PacketEvent, PacketSource, SourceError};

use super::error::PcapSourceError;
use super::layout;
use super::reader::{
    is_pcapng_magic, legacy_ts, linktype_for_interface, pcapng_ts, read_magic_and_rewind,
};

pub struct PcapFileSource {
    inner: PcapReader,
}

enum PcapReader {
    Legacy {
        reader: LegacyPcapReader<File>,
        linktype: Option<Linktype>,
        nanosecond: bool,
    },
    Ng {
        reader: PcapNGReader<File>,
        linktypes: Vec<Linktype>,
    },
}

impl PcapFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(SourceError::from)?;
        let inner = create_reader(file).map_err(SourceError::from)?;
        log::debug!("opened capture {}", path.display());
        Ok(Self { inner })
    }
}

impl PacketSource for PcapFileSource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        next_packet(&mut self.inner).map_err(SourceError::from)
    }
}

fn create_reader(file: File) -> Result<PcapReader, PcapSourceError> {
    let mut file = file;
    let magic = read_magic_and_rewind(&mut file)?;

    if is_pcapng_magic(&magic) {
        let reader = PcapNGReader::new(layout::PCAP_READER_BUFFER_SIZE, file)
            .map_err(|e| PcapSourceError::pcap("pcapng reader init", e))?;
        Ok(PcapReader::Ng {
            reader,
            linktypes: Vec::new(),
        })
    } else {
        let reader = LegacyPcapReader::new(layout::PCAP_READER_BUFFER_SIZE, file)
            .map_err(|e| PcapSourceError::pcap("pcap reader init", e))?;
        Ok(PcapReader::Legacy {
            reader,
            linktype: None,
            nanosecond: false,
        })
    }
}

struct ReaderContext {
    refill: &'static str,
    next: &'static str,
}

const LEGACY_CONTEXT: ReaderContext = ReaderContext {
    refill: "pcap reader refill",
    next: "pcap reader next",
};

const NG_CONTEXT: ReaderContext = ReaderContext {
    refill: "pcapng reader refill",
    next: "pcapng reader next",
};

fn next_packet(reader: &mut PcapReader) -> Result<Option<PacketEvent>, PcapSourceError> {
    match reader {
        PcapReader::Legacy {
            reader,
            linktype,
            nanosecond,
        } => pump(reader, LEGACY_CONTEXT, |block| match block {
            PcapBlockOwned::LegacyHeader(header) => {
                *linktype = Some(header.network);
                *nanosecond = header.is_nanosecond_precision();
                None
            }
            PcapBlockOwned::Legacy(packet) => Some(PacketEvent {
                ts: Some(legacy_ts(packet.ts_sec, packet.ts_usec, *nanosecond)),
                linktype: linktype.unwrap_or(Linktype::ETHERNET),
                data: packet.data.to_vec(),
            }),
            _ => None,
        }),
        PcapReader::Ng { reader, linktypes } => pump(reader, NG_CONTEXT, |block| match block {
            PcapBlockOwned::NG(Block::InterfaceDescription(intf)) => {
                linktypes.push(intf.linktype);
                None
            }
            PcapBlockOwned::NG(Block::EnhancedPacket(packet)) => Some(PacketEvent {
                ts: Some(pcapng_ts(packet.ts_high, packet.ts_low)),
                linktype: linktype_for_interface(linktypes, packet.if_id),
                data: packet.data.to_vec(),
            }),
            _ => None,
        }),
    }
}

/// Drive a block reader until `on_block` yields a packet or the file ends.
fn pump<R, F>(
    reader: &mut R,
    context: ReaderContext,
    mut on_block: F,
) -> Result<Option<PacketEvent>, PcapSourceError>
where
    R: PcapReaderIterator,
    F: FnMut(PcapBlockOwned<'_>) -> Option<PacketEvent>,
{
    loop {
        match reader.next() {
            Ok((offset, block)) => {
                let event = on_block(block);
                reader.consume(offset);
                if event.is_some() {
                    return Ok(event);
                }
            }
            Err(PcapError::Eof) => return Ok(None),
            Err(PcapError::Incomplete(_)) => {
                reader
                    .refill()
                    .map_err(|e| PcapSourceError::pcap(context.refill, e))?;
            }
            Err(e) => return Err(PcapSourceError::pcap(context.next, e)),
        }
    }
}
