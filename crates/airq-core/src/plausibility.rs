//! Range checks for decoded readings.
//!
//! The sensor node clamps its measurements to the working range of its
//! sensors (CO2 0..=40000 ppm, NH3 0..=500 ppm). Values outside those ranges
//! can still be encoded on the wire, so a reading beyond them points to a
//! corrupted or foreign payload rather than a real measurement. The decoder
//! never applies these checks itself.

use crate::decoder::Decoded;
use crate::protocols::air_quality::AirQualityReading;
use crate::protocols::error_report::AirQualityError;

pub const CO2_MIN_PPM: u16 = 0;
pub const CO2_MAX_PPM: u16 = 40_000;
pub const NH3_MIN_PPM: f64 = 0.0;
pub const NH3_MAX_PPM: f64 = 500.0;

pub const CO2_RANGE_ID: &str = "AQ-CO2-RANGE";
pub const NH3_RANGE_ID: &str = "AQ-NH3-RANGE";
pub const SENSOR_ERROR_ID: &str = "AQ-SENSOR-ERROR";

/// Severity of a finding; `Error` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// One plausibility finding for a single decoded uplink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub id: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Check a measurement against the sensor working ranges.
///
/// # Examples
/// ```
/// use airq_core::AirQualityReading;
/// use airq_core::plausibility::{CO2_RANGE_ID, check_reading};
///
/// let findings = check_reading(&AirQualityReading { co2: 65535, nh3: 0.0 });
/// assert_eq!(findings[0].id, CO2_RANGE_ID);
/// ```
pub fn check_reading(reading: &AirQualityReading) -> Vec<Finding> {
    let mut findings = Vec::new();
    if !(CO2_MIN_PPM..=CO2_MAX_PPM).contains(&reading.co2) {
        findings.push(Finding {
            id: CO2_RANGE_ID,
            severity: Severity::Warning,
            message: format!(
                "CO2 {} ppm outside sensor range {CO2_MIN_PPM}..={CO2_MAX_PPM}",
                reading.co2
            ),
        });
    }
    if !(NH3_MIN_PPM..=NH3_MAX_PPM).contains(&reading.nh3) {
        findings.push(Finding {
            id: NH3_RANGE_ID,
            severity: Severity::Warning,
            message: format!(
                "NH3 {:.1} ppm outside sensor range {NH3_MIN_PPM:.0}..={NH3_MAX_PPM:.0}",
                reading.nh3
            ),
        });
    }
    findings
}

pub fn check_error_report(report: &AirQualityError) -> Finding {
    let message = match report.raw_code() {
        Some(code) => format!("sensor reported error {} (code {code})", report.error),
        None => format!("sensor reported unknown error {}", report.error),
    };
    Finding {
        id: SENSOR_ERROR_ID,
        severity: Severity::Error,
        message,
    }
}

/// Check any decoded uplink; unsupported ports yield no findings.
pub fn check_decoded(decoded: &Decoded) -> Vec<Finding> {
    match decoded {
        Decoded::AirQuality(reading) => check_reading(reading),
        Decoded::AirQualityError(report) => vec![check_error_report(report)],
        Decoded::Unsupported { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_within_range_has_no_findings() {
        let reading = AirQualityReading {
            co2: 412,
            nh3: 12.5,
        };
        assert!(check_reading(&reading).is_empty());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let reading = AirQualityReading {
            co2: CO2_MAX_PPM,
            nh3: NH3_MAX_PPM,
        };
        assert!(check_reading(&reading).is_empty());
    }

    #[test]
    fn both_channels_out_of_range() {
        let reading = AirQualityReading {
            co2: 65535,
            nh3: 3276.7,
        };
        let findings = check_reading(&reading);
        let ids: Vec<_> = findings.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![CO2_RANGE_ID, NH3_RANGE_ID]);
        assert!(findings[1].message.contains("3276.7"));
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn error_report_is_always_flagged() {
        let findings = check_decoded(&Decoded::AirQualityError(AirQualityError { error: -3 }));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, SENSOR_ERROR_ID);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("code 2"));
    }

    #[test]
    fn error_number_outside_wire_range_is_still_flagged() {
        let findings = check_decoded(&Decoded::AirQualityError(AirQualityError {
            error: i8::MIN,
        }));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, SENSOR_ERROR_ID);
        assert_eq!(findings[0].message, "sensor reported unknown error -128");
    }

    #[test]
    fn unsupported_port_has_no_findings() {
        assert!(check_decoded(&Decoded::Unsupported { port: 5 }).is_empty());
    }

    #[test]
    fn error_severity_sorts_first() {
        assert!(Severity::Error < Severity::Warning);
    }
}
