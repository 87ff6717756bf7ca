use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::decoder::{Decoded, decode};
use crate::plausibility::{Finding, Severity, check_decoded};
use crate::source::{JsonLinesSource, SourceError, Uplink, UplinkSource};
use crate::{BatchSummary, DEFAULT_GENERATED_AT, InputInfo, Report, UplinkEntry, make_stub_report};

mod timing;
mod violations;

use timing::{to_rfc3339, update_time_bounds};
use violations::{ViolationStats, add_finding, build_violations};

pub const PAYLOAD_TOO_SHORT_ID: &str = "AQ-PAYLOAD-TOO-SHORT";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

pub fn decode_file(path: &Path) -> Result<Report, BatchError> {
    let source = JsonLinesSource::open(path)?;
    let input = InputInfo {
        path: path.display().to_string(),
        bytes: path.metadata()?.len(),
    };
    decode_source(input, source)
}

pub fn decode_source<S: UplinkSource>(
    input: InputInfo,
    mut source: S,
) -> Result<Report, BatchError> {
    let mut summary = BatchSummary::default();
    let mut first_time = None;
    let mut last_time = None;
    let mut entries = Vec::new();
    let mut violation_stats: HashMap<&'static str, ViolationStats> = HashMap::new();

    while let Some(uplink) = source.next_uplink()? {
        summary.uplinks_total += 1;
        update_time_bounds(&mut first_time, &mut last_time, uplink.time);
        let entry = decode_uplink(&uplink, &mut summary, &mut violation_stats);
        entries.push(entry);
    }

    debug!(
        uplinks = summary.uplinks_total,
        readings = summary.readings,
        error_reports = summary.error_reports,
        unsupported = summary.unsupported,
        malformed = summary.malformed,
        "batch decoded"
    );

    summary.time_start = to_rfc3339(first_time);
    summary.time_end = to_rfc3339(last_time);

    let mut report = make_stub_report(&input.path, input.bytes);
    report.generated_at = summary
        .time_end
        .clone()
        .or_else(|| summary.time_start.clone())
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    report.summary = Some(summary);
    report.entries = entries;
    report.violations = build_violations(violation_stats);
    Ok(report)
}

fn decode_uplink(
    uplink: &Uplink,
    summary: &mut BatchSummary,
    violation_stats: &mut HashMap<&'static str, ViolationStats>,
) -> UplinkEntry {
    let mut entry = UplinkEntry {
        line: uplink.line as u64,
        port: uplink.port,
        device: uplink.device.clone(),
        time: to_rfc3339(uplink.time),
        decoded: None,
        error: None,
        violations: Vec::new(),
    };

    let findings = match decode(uplink.port, &uplink.payload) {
        Ok(decoded) => {
            match decoded {
                Decoded::AirQuality(_) => summary.readings += 1,
                Decoded::AirQualityError(_) => summary.error_reports += 1,
                Decoded::Unsupported { port } => {
                    debug!(line = uplink.line, port, "no schema for port");
                    summary.unsupported += 1;
                }
            }
            let findings = check_decoded(&decoded);
            entry.decoded = Some(decoded);
            findings
        }
        Err(err) => {
            warn!(line = uplink.line, port = uplink.port, error = %err, "malformed payload");
            summary.malformed += 1;
            let message = err.to_string();
            entry.error = Some(message.clone());
            vec![Finding {
                id: PAYLOAD_TOO_SHORT_ID,
                severity: Severity::Error,
                message,
            }]
        }
    };

    for finding in findings {
        entry.violations.push(finding.id.to_string());
        add_finding(violation_stats, finding, || example_context(uplink));
    }
    entry
}

fn example_context(uplink: &Uplink) -> String {
    match &uplink.device {
        Some(device) => format!("line {} port {} device {}", uplink.line, uplink.port, device),
        None => format!("line {} port {}", uplink.line, uplink.port),
    }
}
