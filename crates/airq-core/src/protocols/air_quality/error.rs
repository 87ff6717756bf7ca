use thiserror::Error;

/// Errors returned by air-quality payload decoding.
///
/// # Examples
/// ```
/// use airq_core::protocols::air_quality::error::AirQualityParseError;
///
/// let err = AirQualityParseError::TooShort { needed: 4, actual: 2 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AirQualityParseError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
