use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use super::{ScalarError, WireScalar, leading};

/// Signed nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_unix_nanos(nanos: i64) -> Self {
        Timestamp(nanos)
    }

    pub fn unix_nanos(self) -> i64 {
        self.0
    }

    /// Bit pattern used where the wire field is declared unsigned.
    pub fn to_bits(self) -> u64 {
        self.0 as u64
    }

    pub fn to_rfc3339(self) -> Option<String> {
        OffsetDateTime::from_unix_timestamp_nanos(self.0 as i128)
            .ok()
            .and_then(|dt| dt.format(&Rfc3339).ok())
    }
}

impl WireScalar for Timestamp {
    const LEN: usize = 8;
    const NAME: &'static str = "timestamp";

    fn decode(bytes: &[u8]) -> Result<Self, ScalarError> {
        let bytes = leading::<Self>(bytes)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(Timestamp(i64::from_le_bytes(raw)))
    }

    fn encode(&self) -> Result<Vec<u8>, ScalarError> {
        Ok(self.0.to_le_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::Timestamp;
    use crate::protocols::scalar::WireScalar;

    #[test]
    fn negative_values_keep_their_bits() {
        let ts = Timestamp(-1);
        assert_eq!(ts.to_bits(), u64::MAX);
        assert_eq!(ts.encode().unwrap(), vec![0xFF; 8]);
        assert_eq!(Timestamp::decode(&[0xFF; 8]).unwrap(), ts);
    }

    #[test]
    fn encodes_little_endian() {
        let ts = Timestamp::from_unix_nanos(1_500_000_000_000_000_000);
        let bytes = ts.encode().unwrap();
        assert_eq!(bytes, 1_500_000_000_000_000_000i64.to_le_bytes().to_vec());
    }

    #[test]
    fn formats_rfc3339() {
        assert_eq!(
            Timestamp(0).to_rfc3339().as_deref(),
            Some("1970-01-01T00:00:00Z")
        );
        assert_eq!(
            Timestamp(1_500_000_000).to_rfc3339().as_deref(),
            Some("1970-01-01T00:00:01.5Z")
        );
    }
}
