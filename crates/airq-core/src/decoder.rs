//! Port-keyed payload decoding.
//!
//! `decode` maps a LoRaWAN port number onto a payload schema and runs that
//! schema's parser. Unknown ports are an ordinary outcome
//! (`Decoded::Unsupported`), not an error; the only error is a payload too
//! short for the schema its port selects.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocols::air_quality::error::AirQualityParseError;
use crate::protocols::air_quality::{self, AirQualityReading, parse_air_quality};
use crate::protocols::error_report::error::ErrorReportParseError;
use crate::protocols::error_report::{self, AirQualityError, parse_error_report};

/// Payload schemas known to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    /// Periodic CO2/NH3 measurement.
    AirQuality,
    /// Sensor failure report.
    AirQualityError,
}

impl Port {
    pub const AIR_QUALITY: u32 = 1;
    pub const AIR_QUALITY_ERROR: u32 = 2;

    /// Resolve a raw port number; `None` for ports without a schema.
    ///
    /// # Examples
    /// ```
    /// use airq_core::Port;
    ///
    /// assert_eq!(Port::from_number(1), Some(Port::AirQuality));
    /// assert_eq!(Port::from_number(7), None);
    /// ```
    pub fn from_number(port: u32) -> Option<Self> {
        match port {
            Self::AIR_QUALITY => Some(Self::AirQuality),
            Self::AIR_QUALITY_ERROR => Some(Self::AirQualityError),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Self::AirQuality => Self::AIR_QUALITY,
            Self::AirQualityError => Self::AIR_QUALITY_ERROR,
        }
    }

    pub fn device_type(self) -> &'static str {
        match self {
            Self::AirQuality => air_quality::layout::DEVICE_TYPE,
            Self::AirQualityError => error_report::layout::DEVICE_TYPE,
        }
    }
}

/// Outcome of decoding one uplink.
///
/// Serialized with a `deviceType` tag, e.g.
/// `{"deviceType":"air-quality","co2":300,"nh3":0.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "deviceType")]
pub enum Decoded {
    #[serde(rename = "air-quality")]
    AirQuality(AirQualityReading),
    #[serde(rename = "air-quality-error")]
    AirQualityError(AirQualityError),
    /// The port has no schema; the payload was not inspected.
    #[serde(rename = "unsupported")]
    Unsupported { port: u32 },
}

impl Decoded {
    pub fn device_type(&self) -> Option<&'static str> {
        match self {
            Decoded::AirQuality(_) => Some(Port::AirQuality.device_type()),
            Decoded::AirQualityError(_) => Some(Port::AirQualityError.device_type()),
            Decoded::Unsupported { .. } => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Decoded::Unsupported { .. })
    }
}

/// Payload could not be read under the schema selected by its port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("air-quality payload: {0}")]
    AirQuality(#[from] AirQualityParseError),
    #[error("air-quality error report: {0}")]
    ErrorReport(#[from] ErrorReportParseError),
}

/// Decode `payload` under the schema selected by `port`.
///
/// # Examples
/// ```
/// use airq_core::{Decoded, decode};
///
/// let decoded = decode(1, &[0x01, 0x2C, 0x00, 0x00])?;
/// match decoded {
///     Decoded::AirQuality(reading) => assert_eq!(reading.co2, 300),
///     other => panic!("unexpected {other:?}"),
/// }
/// assert_eq!(decode(3, &[0x00, 0x00])?, Decoded::Unsupported { port: 3 });
/// # Ok::<(), airq_core::DecodeError>(())
/// ```
pub fn decode(port: u32, payload: &[u8]) -> Result<Decoded, DecodeError> {
    let Some(schema) = Port::from_number(port) else {
        return Ok(Decoded::Unsupported { port });
    };
    match schema {
        Port::AirQuality => Ok(Decoded::AirQuality(parse_air_quality(payload)?)),
        Port::AirQualityError => Ok(Decoded::AirQualityError(parse_error_report(payload)?)),
    }
}
