//! Core types for Farmwatch sensor and tag data.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How many of the most recent readings each chart stream displays.
pub const DISPLAY_WINDOW: usize = 20;

/// Description of an environmental sensor as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorInfo {
    /// Sensor identifier, used when requesting that sensor's readings.
    pub id: u32,
    /// Human-readable description. Used as the chart title.
    pub description: String,
}

/// A single timestamped value from an environmental sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Measured value in the sensor's native unit.
    pub value: f64,
    /// When the value was captured. The service sends RFC 3339 timestamps
    /// with a `Z` suffix.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// A timestamped event from a livestock tag reader.
///
/// Tag readings carry no measured value; the dashboard aggregates them by
/// cumulative count only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagReading {
    /// When the tag was read.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Return the most recent `window` items of a slice.
///
/// Streams are ephemeral display state; anything older than the window is
/// simply not shown.
#[must_use]
pub fn recent<T>(items: &[T], window: usize) -> &[T] {
    let start = items.len().saturating_sub(window);
    &items[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_reading_parses_zulu_timestamp() {
        let json = r#"{"value": 21.4, "timestamp": "2026-03-02T08:15:00Z"}"#;
        let reading: SensorReading = serde_json::from_str(json).unwrap();

        assert!((reading.value - 21.4).abs() < f64::EPSILON);
        assert_eq!(reading.timestamp.year(), 2026);
        assert_eq!(reading.timestamp.offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn test_sensor_reading_parses_explicit_offset() {
        let json = r#"{"value": 55.0, "timestamp": "2026-03-02T08:15:00+00:00"}"#;
        let reading: SensorReading = serde_json::from_str(json).unwrap();

        assert_eq!(reading.timestamp.hour(), 8);
    }

    #[test]
    fn test_tag_reading_parses() {
        let json = r#"{"timestamp": "2026-03-02T12:00:30Z"}"#;
        let reading: TagReading = serde_json::from_str(json).unwrap();

        assert_eq!(reading.timestamp.minute(), 0);
        assert_eq!(reading.timestamp.second(), 30);
    }

    #[test]
    fn test_sensor_info_list_parses() {
        let json = r#"[{"id": 1, "description": "Greenhouse temperature"},
                       {"id": 2, "description": "Soil moisture"}]"#;
        let sensors: Vec<SensorInfo> = serde_json::from_str(json).unwrap();

        assert_eq!(sensors.len(), 2);
        assert_eq!(sensors[0].id, 1);
        assert_eq!(sensors[1].description, "Soil moisture");
    }

    #[test]
    fn test_recent_returns_tail() {
        let items: Vec<u32> = (0..30).collect();
        let window = recent(&items, DISPLAY_WINDOW);

        assert_eq!(window.len(), DISPLAY_WINDOW);
        assert_eq!(window[0], 10);
        assert_eq!(window[19], 29);
    }

    #[test]
    fn test_recent_with_short_input() {
        let items = [1, 2, 3];
        assert_eq!(recent(&items, DISPLAY_WINDOW), &[1, 2, 3]);
        assert_eq!(recent(&items, 0), &[] as &[i32]);
    }
}
