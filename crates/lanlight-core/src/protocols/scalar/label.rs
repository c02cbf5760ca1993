use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ScalarError, WireScalar, leading};

/// Device, location or group name: UTF-8 in a zero-padded 32-byte field.
///
/// Text longer than the field is cut at the last character boundary that
/// fits, whether it comes from [`Label::new`] or from serde. Decoding strips
/// the trailing zero padding and rejects bytes that are not UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Label(String);

impl Label {
    pub const MAX_LEN: usize = 32;

    pub fn new(text: &str) -> Self {
        Label(truncate_at_boundary(text, Self::MAX_LEN).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn truncate_at_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::new(value)
    }
}

impl From<String> for Label {
    fn from(mut value: String) -> Self {
        let end = truncate_at_boundary(&value, Self::MAX_LEN).len();
        value.truncate(end);
        Label(value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl WireScalar for Label {
    const LEN: usize = Label::MAX_LEN;
    const NAME: &'static str = "label";

    fn decode(bytes: &[u8]) -> Result<Self, ScalarError> {
        let field = leading::<Self>(bytes)?;
        let end = field
            .iter()
            .rposition(|b| *b != 0)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let text = std::str::from_utf8(&field[..end])
            .map_err(|err| ScalarError::InvalidLabel { offset: err.valid_up_to() })?;
        Ok(Label(text.to_string()))
    }

    fn encode(&self) -> Result<Vec<u8>, ScalarError> {
        let text = truncate_at_boundary(&self.0, Self::LEN);
        let mut out = vec![0u8; Self::LEN];
        out[..text.len()].copy_from_slice(text.as_bytes());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::Label;
    use crate::protocols::scalar::{ScalarError, WireScalar};

    fn padded(text: &str) -> Vec<u8> {
        let mut bytes = vec![0u8; 32];
        bytes[..text.len()].copy_from_slice(text.as_bytes());
        bytes
    }

    #[test]
    fn decode_strips_zero_padding() {
        let label = Label::decode(&padded("ROOM")).unwrap();
        assert_eq!(label, "ROOM");
    }

    #[test]
    fn encode_pads_with_zeros() {
        let bytes = Label::new("ROOM").encode().unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[..4], b"ROOM");
        assert!(bytes[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn full_width_label_has_no_padding() {
        let text = "A".repeat(32);
        let label = Label::decode(text.as_bytes()).unwrap();
        assert_eq!(label.as_str(), text);
        assert_eq!(label.encode().unwrap(), text.as_bytes());
    }

    #[test]
    fn long_text_is_truncated_on_char_boundary() {
        // 31 ASCII bytes followed by a two-byte character.
        let text = format!("{}é", "a".repeat(31));
        let label = Label::new(&text);
        assert_eq!(label.as_str().len(), 31);
        assert_eq!(label.encode().unwrap().len(), 32);
    }

    #[test]
    fn interior_zero_bytes_are_kept() {
        let mut bytes = padded("AB");
        bytes[3] = b'C';
        let label = Label::decode(&bytes).unwrap();
        assert_eq!(label.as_str(), "AB\0C");
    }

    #[test]
    fn all_zero_field_is_empty() {
        let label = Label::decode(&[0u8; 32]).unwrap();
        assert_eq!(label, "");
    }

    #[test]
    fn deserialized_text_is_cut_to_the_field() {
        let json = format!("\"{}\"", "x".repeat(40));
        let label: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(label.as_str().len(), 32);

        let decoded = Label::decode(&label.encode().unwrap()).unwrap();
        assert_eq!(decoded, label);
        assert_eq!(serde_json::to_string(&decoded).unwrap(), format!("\"{}\"", "x".repeat(32)));
    }

    #[test]
    fn non_utf8_bytes_are_rejected() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xFF;
        bytes[1] = b'A';
        let err = Label::decode(&bytes).unwrap_err();
        assert_eq!(err, ScalarError::InvalidLabel { offset: 0 });
    }
}
