//! airq core library: LoRaWAN air-quality uplink decoding.
//!
//! The heart of the crate is [`decode`], a pure function from a LoRaWAN port
//! number and a raw payload to a typed [`Decoded`] value. Each port selects a
//! payload schema implemented under `protocols` (layout/reader/parser/error).
//! Around it sit an uplink `source` (JSON Lines captures) and a `batch` layer
//! that decodes a whole capture into a deterministic [`Report`].
//!
//! Invariants:
//! - `decode` holds no state; identical inputs give identical outputs.
//! - Unknown ports yield `Decoded::Unsupported`, never an error.
//! - Short payloads yield `DecodeError`, never a panic or an out-of-bounds read.
//! - Report entries keep input order; violations are sorted by severity and id.
//!
//! # Examples
//! ```
//! use airq_core::{Decoded, decode};
//!
//! let decoded = decode(1, &[0x01, 0x2C, 0x00, 0x06])?;
//! assert_eq!(
//!     serde_json::to_string(&decoded)?,
//!     r#"{"deviceType":"air-quality","co2":300,"nh3":0.3}"#
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod batch;
mod decoder;
pub mod plausibility;
pub mod protocols;
mod source;

pub use batch::{BatchError, PAYLOAD_TOO_SHORT_ID, decode_file, decode_source};
pub use decoder::{DecodeError, Decoded, Port, decode};
pub use protocols::air_quality::AirQualityReading;
pub use protocols::error_report::AirQualityError;
pub use source::{JsonLinesSource, SourceError, Uplink, UplinkSource};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no uplink carries a time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decoded capture with deterministic ordering.
///
/// # Examples
/// ```
/// use airq_core::make_stub_report;
///
/// let report = make_stub_report("uplinks.jsonl", 123);
/// assert_eq!(report.report_version, airq_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp; the latest uplink time when known.
    pub generated_at: String,

    /// Input capture metadata.
    pub input: InputInfo,

    /// Outcome counts (absent on a stub report).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<BatchSummary>,
    /// One entry per uplink, in input order.
    pub entries: Vec<UplinkEntry>,
    /// Plausibility and decoding violations, errors first.
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Outcome counts over a batch.
///
/// # Examples
/// ```
/// use airq_core::BatchSummary;
///
/// let summary = BatchSummary::default();
/// assert_eq!(summary.uplinks_total, 0);
/// assert!(summary.time_start.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub uplinks_total: u64,
    /// Port 1 measurements.
    pub readings: u64,
    /// Port 2 sensor error reports.
    pub error_reports: u64,
    /// Uplinks on ports without a schema.
    pub unsupported: u64,
    /// Payloads too short for their schema.
    pub malformed: u64,
    /// RFC3339 time of the earliest uplink (if any carried a time).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    /// RFC3339 time of the latest uplink (if any carried a time).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
}

/// Decoding outcome of a single uplink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UplinkEntry {
    /// Line number in the input capture.
    pub line: u64,
    pub port: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Present when the payload decoded (including unsupported ports).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<Decoded>,
    /// Present when the payload was too short for its schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Violation ids raised by this uplink.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

/// Aggregated violation record.
///
/// # Examples
/// ```
/// use airq_core::Violation;
///
/// let violation = Violation {
///     id: "AQ-CO2-RANGE".to_string(),
///     severity: "warning".to_string(),
///     message: "CO2 65535 ppm outside sensor range 0..=40000".to_string(),
///     count: 1,
///     examples: vec!["line 4 port 1".to_string()],
/// };
/// assert_eq!(violation.count, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Stable violation identifier (e.g., `AQ-NH3-RANGE`).
    pub id: String,
    /// Severity label (`error` or `warning`).
    pub severity: String,
    /// Message of the first occurrence.
    pub message: String,
    /// Number of occurrences aggregated into this violation.
    pub count: u64,
    /// At most three example contexts, formatted as `line N port P [device D]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Build a stub report with base fields filled and empty aggregates.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "airq".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: None,
        entries: vec![],
        violations: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_fields_when_none() {
        let mut report = make_stub_report("uplinks.jsonl", 1);
        report.summary = Some(BatchSummary::default());
        report.entries = vec![UplinkEntry {
            line: 1,
            port: 1,
            device: None,
            time: None,
            decoded: Some(Decoded::AirQuality(AirQualityReading { co2: 300, nh3: 0.0 })),
            error: None,
            violations: Vec::new(),
        }];

        let value = serde_json::to_value(&report).expect("report json");
        let summary = value.get("summary").expect("summary");
        assert!(summary.get("time_start").is_none());
        assert!(summary.get("time_end").is_none());

        let entry = &value["entries"][0];
        assert!(entry.get("device").is_none());
        assert!(entry.get("error").is_none());
        assert!(entry.get("violations").is_none());
        assert_eq!(entry["decoded"]["deviceType"], "air-quality");
        assert_eq!(entry["decoded"]["co2"], 300);
    }

    #[test]
    fn stub_report_has_no_summary() {
        let report = make_stub_report("uplinks.jsonl", 0);
        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("summary").is_none());
        assert_eq!(value["tool"]["name"], "airq");
    }
}
