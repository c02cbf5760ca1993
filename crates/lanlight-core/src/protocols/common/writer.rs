use std::ops::Range;

/// Zero-initialised, fixed-length little-endian output buffer.
///
/// Ranges come from the `layout` modules, which are checked against the
/// buffer lengths by their tests; bytes that are never written stay zero.
#[derive(Debug, Clone)]
pub(crate) struct LeWriter {
    bytes: Vec<u8>,
}

impl LeWriter {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len],
        }
    }

    pub(crate) fn put_u8(&mut self, offset: usize, value: u8) -> &mut Self {
        self.bytes[offset] = value;
        self
    }

    pub(crate) fn put_u16_le(&mut self, range: Range<usize>, value: u16) -> &mut Self {
        self.put_slice(range, &value.to_le_bytes())
    }

    pub(crate) fn put_u32_le(&mut self, range: Range<usize>, value: u32) -> &mut Self {
        self.put_slice(range, &value.to_le_bytes())
    }

    pub(crate) fn put_u64_le(&mut self, range: Range<usize>, value: u64) -> &mut Self {
        self.put_slice(range, &value.to_le_bytes())
    }

    pub(crate) fn put_slice(&mut self, range: Range<usize>, value: &[u8]) -> &mut Self {
        self.bytes[range].copy_from_slice(value);
        self
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::LeWriter;

    #[test]
    fn unwritten_bytes_stay_zero() {
        let mut writer = LeWriter::new(8);
        writer.put_u16_le(2..4, 0xBEEF);
        assert_eq!(writer.finish(), vec![0, 0, 0xEF, 0xBE, 0, 0, 0, 0]);
    }

    #[test]
    fn writes_are_little_endian() {
        let mut writer = LeWriter::new(13);
        writer
            .put_u8(0, 0x7F)
            .put_u32_le(1..5, 56700)
            .put_u64_le(5..13, 1);
        let bytes = writer.finish();
        assert_eq!(bytes[0], 0x7F);
        assert_eq!(&bytes[1..5], &56700u32.to_le_bytes());
        assert_eq!(bytes[5], 1);
        assert!(bytes[6..].iter().all(|b| *b == 0));
    }
}
