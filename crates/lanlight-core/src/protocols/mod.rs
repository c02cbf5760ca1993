//! LAN protocol codecs.
//!
//! Each codec follows a layered structure:
//! - `layout`: byte offsets, ranges and fixed lengths (source of truth)
//! - `reader` / `writer`: bounds-checked byte access in little-endian order
//! - `parser` (or the per-direction `request` / `response` modules): domain
//!   level decoding and encoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Codecs are pure and contain no I/O; the `capture` layer handles file
//! access and aggregation.

pub(crate) mod common;
pub mod header;
pub mod message;
pub mod scalar;
