//! JSON Lines uplink source.
//!
//! One JSON object per line. Each object carries a port (`port`, or
//! `fPort` as network servers name it) and exactly one payload field:
//! `bytes` (array of 0..=255), `hex`, or `data` (standard base64). `device`
//! and `time` (RFC3339) are optional. Blank lines are skipped; unknown fields
//! are ignored so raw network-server exports can be fed in directly.

pub mod error;
pub mod parser;
pub mod reader;

pub use parser::JsonLinesSource;
