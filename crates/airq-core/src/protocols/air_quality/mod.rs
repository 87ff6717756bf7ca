//! Air-quality reading decoding (LoRaWAN port 1).
//!
//! Bytes 0..2 carry the CO2 concentration in ppm as a big-endian `u16`.
//! Bytes 2..4 carry a packed NH3 quantity: the whole of byte 2 shifted left by
//! seven bits, joined with the upper seven bits of byte 3. The result is a
//! fixed-point value scaled by 0.1 and reported with one fractional digit.
//!
//! Trailing bytes past the fourth are ignored. Shorter payloads are rejected
//! with `AirQualityParseError::TooShort`; the reader never indexes past the
//! end of the slice.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{AirQualityReading, parse_air_quality};
