//! Payload schema decoders, one module per LoRaWAN port.
//!
//! Each schema follows a layered structure:
//! - `layout`: byte offsets, shifts and scale factors (source of truth)
//! - `reader`: bounds-checked byte access and bit-unpacking conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; the `decoder` module selects the
//! schema from the port and the `batch` layer handles files and aggregation.

pub mod air_quality;
pub(crate) mod common;
pub mod error_report;
