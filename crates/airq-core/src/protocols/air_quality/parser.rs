use serde::{Deserialize, Serialize};

use super::error::AirQualityParseError;
use super::layout;
use super::reader::AirQualityReader;
use crate::protocols::common::reader::round_to_tenth;

/// Decoded port 1 measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    /// CO2 concentration in ppm.
    pub co2: u16,
    /// NH3 concentration, one fractional digit.
    pub nh3: f64,
}

pub fn parse_air_quality(payload: &[u8]) -> Result<AirQualityReading, AirQualityParseError> {
    let reader = AirQualityReader::new(payload);
    reader.require_len(layout::MIN_LEN)?;

    let co2 = reader.read_u16_be(layout::CO2_RANGE.clone())?;
    let raw_nh3 = reader.read_packed_nh3()?;
    let nh3 = round_to_tenth(f64::from(raw_nh3) * layout::NH3_SCALE);

    Ok(AirQualityReading { co2, nh3 })
}
