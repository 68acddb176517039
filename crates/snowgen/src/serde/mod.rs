//! Serde helpers for IDs, for use with `#[serde(with = "...")]`.
//!
//! Enabled by the `serde` feature. A plain `i64` field already serializes as
//! its native integer; these helpers cover the compact text form and the
//! millisecond form of a configured epoch.

mod base62;
mod millis;

pub use base62::*;
pub use millis::*;
