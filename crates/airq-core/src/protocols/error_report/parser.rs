use serde::{Deserialize, Serialize};

use super::error::ErrorReportParseError;
use super::layout;
use super::reader::ErrorReportReader;

/// Decoded port 2 error report.
///
/// Deserialization rejects error numbers outside `-4..=-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ErrorReportRecord")]
pub struct AirQualityError {
    /// Error number in `-4..=-1`.
    pub error: i8,
}

#[derive(Deserialize)]
struct ErrorReportRecord {
    error: i8,
}

impl TryFrom<ErrorReportRecord> for AirQualityError {
    type Error = String;

    fn try_from(record: ErrorReportRecord) -> Result<Self, Self::Error> {
        let report = AirQualityError {
            error: record.error,
        };
        match report.raw_code() {
            Some(_) => Ok(report),
            None => Err(format!(
                "error number {} outside -4..=-1",
                record.error
            )),
        }
    }
}

impl AirQualityError {
    /// Raw two-bit code the error number was derived from; `None` when the
    /// error number is outside `-4..=-1`.
    pub fn raw_code(&self) -> Option<u8> {
        let code = -i16::from(self.error) - 1;
        u8::try_from(code).ok().filter(|code| *code <= layout::MAX_CODE)
    }
}

pub fn parse_error_report(payload: &[u8]) -> Result<AirQualityError, ErrorReportParseError> {
    let reader = ErrorReportReader::new(payload);
    reader.require_len(layout::MIN_LEN)?;

    let code = reader.read_code()?;
    let error = -(code as i8) - 1;

    Ok(AirQualityError { error })
}
