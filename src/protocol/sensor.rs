//! Inbound sensor payload parsing.

use crate::error::{Result, RoverHelmError};

/// Distance readings arrive here.
pub const TOPIC_SENSOR_DISTANCE: &str = "sensor/distance";

/// Extracts the reading from a `"<label>:<value>,..."` payload.
///
/// Only the first comma-separated field is read; everything after the second
/// colon token is ignored. The label itself is not checked.
///
/// # Errors
///
/// Returns `SensorPayload` when the first field has no value token or the
/// token is not a number.
///
/// # Examples
///
/// ```
/// use rover_helm::protocol::sensor::parse_distance;
///
/// let value = parse_distance("distance:123.45,unit:mm")?;
/// assert!((value - 123.45).abs() < 0.001);
/// # Ok::<(), rover_helm::error::RoverHelmError>(())
/// ```
pub fn parse_distance(payload: &str) -> Result<f32> {
    let first_field = payload.split(',').next().unwrap_or_default();
    let token = first_field
        .split(':')
        .nth(1)
        .ok_or_else(|| RoverHelmError::SensorPayload(payload.to_string()))?;
    token
        .trim()
        .parse::<f32>()
        .map_err(|_| RoverHelmError::SensorPayload(payload.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_labelled_reading() {
        let value = parse_distance("distance:123.45,unit:mm").unwrap();
        assert!((value - 123.45).abs() < 0.001);
    }

    #[test]
    fn test_parses_single_field_payload() {
        let value = parse_distance("distance:7").unwrap();
        assert!((value - 7.0).abs() < 0.001);
    }

    #[test]
    fn test_parses_negative_reading() {
        let value = parse_distance("offset:-2.5,unit:mm").unwrap();
        assert!((value + 2.5).abs() < 0.001);
    }

    #[test]
    fn test_extra_colon_tokens_are_ignored() {
        let value = parse_distance("distance:12:99,unit:mm").unwrap();
        assert!((value - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_rejects_payload_without_value() {
        assert!(parse_distance("").is_err());
        assert!(parse_distance("123.45").is_err());
        assert!(parse_distance("distance:").is_err());
        assert!(parse_distance(",distance:5").is_err());
    }

    #[test]
    fn test_rejects_non_numeric_value() {
        assert!(parse_distance("distance:abc,unit:mm").is_err());
    }

    #[test]
    fn test_error_carries_the_payload() {
        let err = parse_distance("distance:abc").unwrap_err();
        assert!(err.to_string().contains("distance:abc"));
    }
}
