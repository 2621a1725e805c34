//! Demo data for running the dashboard without a service.
//!
//! Generates a deterministic set of chart streams so the dashboard,
//! report window, and export can be exercised for screenshots and manual
//! testing.

use time::{Duration, OffsetDateTime};

use farmwatch_types::{DISPLAY_WINDOW, SensorInfo, SensorReading, TagReading};

use super::types::SeriesState;

/// Minutes between consecutive demo readings.
const STEP_MINUTES: i64 = 15;

/// Base value, swing, and period per demo sensor.
const DEMO_SENSORS: [(&str, f64, f64, f64); 5] = [
    ("Greenhouse temperature (C)", 21.5, 2.8, 0.55),
    ("Soil moisture (%)", 44.0, 6.0, 0.35),
    ("Air humidity (%)", 62.0, 9.0, 0.45),
    ("Light level (klx)", 18.0, 14.0, 0.30),
    ("Water tank level (%)", 71.0, 3.5, 0.20),
];

/// Build the full set of demo chart streams (five sensors plus tags).
pub fn demo_series() -> Vec<SeriesState> {
    let now = OffsetDateTime::now_utc();
    let mut series: Vec<SeriesState> = demo_sensors(now)
        .iter()
        .map(|(info, readings)| SeriesState::from_readings(info, readings))
        .collect();
    series.push(SeriesState::from_tags(&demo_tags(now)));
    series
}

/// Generate windowed readings for each demo sensor.
pub fn demo_sensors(now: OffsetDateTime) -> Vec<(SensorInfo, Vec<SensorReading>)> {
    DEMO_SENSORS
        .iter()
        .enumerate()
        .map(|(idx, &(description, base, swing, period))| {
            let info = SensorInfo {
                id: idx as u32 + 1,
                description: description.to_string(),
            };
            let readings = (0..DISPLAY_WINDOW)
                .map(|i| {
                    let steps_back = (DISPLAY_WINDOW - i) as i64;
                    let phase = i as f64 * period + idx as f64;
                    // Sine plus a slow drift keeps the curves apart
                    let value = base + swing * phase.sin() + (i as f64) * 0.05;
                    SensorReading {
                        value: (value * 10.0).round() / 10.0,
                        timestamp: now - Duration::minutes(steps_back * STEP_MINUTES),
                    }
                })
                .collect();
            (info, readings)
        })
        .collect()
}

/// Generate a plausible run of tag readings.
pub fn demo_tags(now: OffsetDateTime) -> Vec<TagReading> {
    (0..12)
        .map(|i| TagReading {
            timestamp: now - Duration::minutes((12 - i) * 37),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_series_covers_all_streams() {
        let series = demo_series();

        // Five sensors plus the tag stream
        assert_eq!(series.len(), 6);
        for s in &series {
            assert!(!s.points.is_empty());
            assert!(s.draws_line());
        }
    }

    #[test]
    fn test_demo_readings_are_windowed_and_ordered() {
        let now = OffsetDateTime::now_utc();
        for (_, readings) in demo_sensors(now) {
            assert_eq!(readings.len(), DISPLAY_WINDOW);
            for pair in readings.windows(2) {
                assert!(pair[0].timestamp < pair[1].timestamp);
            }
        }
    }
}
