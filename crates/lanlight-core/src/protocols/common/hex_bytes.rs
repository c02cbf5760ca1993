//! Serde adapter rendering fixed-size byte arrays as lowercase hex strings.

use serde::{Deserialize, Deserializer, Serializer, de::Error};

pub(crate) fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&hex::encode(bytes))
}

pub(crate) fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let mut out = [0u8; N];
    hex::decode_to_slice(text.trim(), &mut out).map_err(D::Error::custom)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "crate::protocols::common::hex_bytes")]
        id: [u8; 4],
    }

    #[test]
    fn renders_lowercase_hex() {
        let value = Wrapper {
            id: [0xDE, 0xAD, 0xBE, 0xEF],
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"id":"deadbeef"}"#);
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = serde_json::from_str::<Wrapper>(r#"{"id":"dead"}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid string length"));
    }
}
