use thiserror::Error;

/// Errors returned by error-report payload decoding.
///
/// # Examples
/// ```
/// use airq_core::protocols::error_report::error::ErrorReportParseError;
///
/// let err = ErrorReportParseError::TooShort { needed: 1, actual: 0 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorReportParseError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
