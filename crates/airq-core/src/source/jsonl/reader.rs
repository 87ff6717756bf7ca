use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::error::JsonlSourceError;
use crate::source::Uplink;

/// Raw shape of one JSON Lines record.
#[derive(Debug, Deserialize)]
pub struct UplinkRecord {
    #[serde(alias = "fPort")]
    pub port: u32,
    #[serde(default)]
    pub bytes: Option<Vec<u8>>,
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default, rename = "deviceInfo")]
    pub device_info: Option<DeviceInfo>,
    #[serde(default)]
    pub time: Option<String>,
}

/// Device block of a ChirpStack uplink event.
#[derive(Debug, Deserialize)]
pub struct DeviceInfo {
    #[serde(default, rename = "deviceName")]
    pub device_name: Option<String>,
}

/// Parse one non-blank line into an uplink.
///
/// A top-level `device` wins over `deviceInfo.deviceName`.
///
/// # Examples
/// ```text
/// let uplink = parse_line(1, r#"{"fPort":1,"data":"ASwAAA=="}"#).unwrap();
/// assert_eq!(uplink.payload, vec![0x01, 0x2C, 0x00, 0x00]);
/// ```
pub fn parse_line(line: usize, text: &str) -> Result<Uplink, JsonlSourceError> {
    let record: UplinkRecord =
        serde_json::from_str(text).map_err(|source| JsonlSourceError::Json { line, source })?;
    let payload = decode_payload(line, &record)?;
    let time = record
        .time
        .as_deref()
        .map(|value| parse_time(line, value))
        .transpose()?;
    let device = record
        .device
        .or_else(|| record.device_info.and_then(|info| info.device_name));
    Ok(Uplink {
        line,
        port: record.port,
        payload,
        device,
        time,
    })
}

fn decode_payload(line: usize, record: &UplinkRecord) -> Result<Vec<u8>, JsonlSourceError> {
    match (&record.bytes, &record.hex, &record.data) {
        (Some(bytes), None, None) => Ok(bytes.clone()),
        (None, Some(hex), None) => decode_hex(line, hex),
        (None, None, Some(data)) => STANDARD
            .decode(data.trim())
            .map_err(|err| JsonlSourceError::Record {
                line,
                message: format!("invalid base64 payload: {err}"),
            }),
        _ => Err(JsonlSourceError::Record {
            line,
            message: "expected exactly one of `bytes`, `hex`, `data`".to_string(),
        }),
    }
}

/// Decode a hex payload, tolerating an `0x` prefix and embedded whitespace.
pub fn decode_hex(line: usize, value: &str) -> Result<Vec<u8>, JsonlSourceError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let compact: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).map_err(|err| JsonlSourceError::Record {
        line,
        message: format!("invalid hex payload: {err}"),
    })
}

fn parse_time(line: usize, value: &str) -> Result<OffsetDateTime, JsonlSourceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|err| JsonlSourceError::Record {
        line,
        message: format!("invalid RFC3339 time '{value}': {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_hex, parse_line};
    use crate::source::jsonl::error::JsonlSourceError;

    #[test]
    fn parse_bytes_record() {
        let uplink = parse_line(3, r#"{"port":1,"bytes":[1,44,0,0],"device":"lab"}"#).unwrap();
        assert_eq!(uplink.line, 3);
        assert_eq!(uplink.port, 1);
        assert_eq!(uplink.payload, vec![0x01, 0x2C, 0x00, 0x00]);
        assert_eq!(uplink.device.as_deref(), Some("lab"));
        assert!(uplink.time.is_none());
    }

    #[test]
    fn parse_network_server_record() {
        let uplink = parse_line(
            1,
            r#"{"fPort":2,"data":"wA==","time":"2024-03-01T10:00:00Z","rssi":-80}"#,
        )
        .unwrap();
        assert_eq!(uplink.port, 2);
        assert_eq!(uplink.payload, vec![0xC0]);
        let time = uplink.time.unwrap();
        assert_eq!(time.unix_timestamp(), 1_709_287_200);
    }

    #[test]
    fn parse_device_name_from_device_info() {
        let uplink = parse_line(
            1,
            r#"{"fPort":1,"data":"ASwAAA==","deviceInfo":{"deviceName":"roof","devEui":"0011"}}"#,
        )
        .unwrap();
        assert_eq!(uplink.device.as_deref(), Some("roof"));
    }

    #[test]
    fn top_level_device_wins_over_device_info() {
        let uplink = parse_line(
            1,
            r#"{"port":1,"hex":"00","device":"lab","deviceInfo":{"deviceName":"roof"}}"#,
        )
        .unwrap();
        assert_eq!(uplink.device.as_deref(), Some("lab"));
    }

    #[test]
    fn device_info_without_name_leaves_device_empty() {
        let uplink = parse_line(1, r#"{"port":1,"hex":"00","deviceInfo":{}}"#).unwrap();
        assert!(uplink.device.is_none());
    }

    #[test]
    fn parse_hex_record() {
        let uplink = parse_line(1, r#"{"port":1,"hex":"0x01 2c 00 00"}"#).unwrap();
        assert_eq!(uplink.payload, vec![0x01, 0x2C, 0x00, 0x00]);
    }

    #[test]
    fn reject_multiple_payload_fields() {
        let err = parse_line(4, r#"{"port":1,"hex":"00","data":"AA=="}"#).unwrap_err();
        assert!(matches!(err, JsonlSourceError::Record { line: 4, .. }));
    }

    #[test]
    fn reject_missing_payload() {
        let err = parse_line(1, r#"{"port":1}"#).unwrap_err();
        assert!(err.to_string().contains("expected exactly one"));
    }

    #[test]
    fn reject_byte_out_of_range() {
        let err = parse_line(2, r#"{"port":1,"bytes":[256]}"#).unwrap_err();
        assert!(matches!(err, JsonlSourceError::Json { line: 2, .. }));
    }

    #[test]
    fn reject_bad_time() {
        let err = parse_line(1, r#"{"port":1,"hex":"00","time":"yesterday"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid RFC3339 time"));
    }

    #[test]
    fn decode_hex_rejects_odd_length() {
        assert!(decode_hex(1, "abc").is_err());
    }
}
