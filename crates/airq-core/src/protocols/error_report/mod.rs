//! Air-quality sensor error reports (LoRaWAN port 2).
//!
//! The node sends a single status byte when a sensor read fails. Only the two
//! most significant bits are meaningful; they carry a raw code in 0..=3 which
//! is reported as the negative error number `-code - 1`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{AirQualityError, parse_error_report};
