use std::ops::Range;

/// Bounds failure shared by the per-codec readers.
///
/// Each codec converts it into its own length error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShortRead {
    pub needed: usize,
    pub actual: usize,
}

/// Little-endian view over a borrowed buffer; every access is bounds checked.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LeReader<'a> {
    bytes: &'a [u8],
}

impl<'a> LeReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub(crate) fn require_len(&self, needed: usize) -> Result<(), ShortRead> {
        if self.bytes.len() < needed {
            return Err(ShortRead {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], ShortRead> {
        self.bytes.get(range.clone()).ok_or(ShortRead {
            needed: range.end,
            actual: self.bytes.len(),
        })
    }

    pub(crate) fn read_array<const N: usize>(
        &self,
        range: Range<usize>,
    ) -> Result<[u8; N], ShortRead> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| ShortRead {
            needed: N,
            actual: bytes.len(),
        })
    }

    pub(crate) fn read_u8(&self, offset: usize) -> Result<u8, ShortRead> {
        self.bytes.get(offset).copied().ok_or(ShortRead {
            needed: offset + 1,
            actual: self.bytes.len(),
        })
    }

    pub(crate) fn read_u16_le(&self, range: Range<usize>) -> Result<u16, ShortRead> {
        Ok(u16::from_le_bytes(self.read_array(range)?))
    }

    pub(crate) fn read_u32_le(&self, range: Range<usize>) -> Result<u32, ShortRead> {
        Ok(u32::from_le_bytes(self.read_array(range)?))
    }

    pub(crate) fn read_u64_le(&self, range: Range<usize>) -> Result<u64, ShortRead> {
        Ok(u64::from_le_bytes(self.read_array(range)?))
    }
}
