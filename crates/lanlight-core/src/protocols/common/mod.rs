pub(crate) mod hex_bytes;
pub(crate) mod reader;
pub(crate) mod writer;
