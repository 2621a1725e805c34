//! Type definitions for the GUI module.

use farmwatch_types::{SensorInfo, SensorReading, TagReading};
use time::OffsetDateTime;

/// Identifier for one chart stream on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamId {
    /// An environmental sensor stream.
    Sensor(u32),
    /// The cumulative tag-reading stream.
    Tags,
}

/// One chart stream: a title and its windowed points.
#[derive(Debug, Clone)]
pub struct SeriesState {
    /// Which stream this is.
    pub id: StreamId,
    /// Chart title.
    pub title: String,
    /// (timestamp, value) pairs, oldest first, already windowed.
    pub points: Vec<(OffsetDateTime, f64)>,
}

impl SeriesState {
    /// Build a sensor stream from its description and readings.
    pub fn from_readings(info: &SensorInfo, readings: &[SensorReading]) -> Self {
        Self {
            id: StreamId::Sensor(info.id),
            title: info.description.clone(),
            points: readings.iter().map(|r| (r.timestamp, r.value)).collect(),
        }
    }

    /// Build the tag stream. Tags have no value of their own, so the y-axis
    /// is the cumulative count of readings.
    pub fn from_tags(readings: &[TagReading]) -> Self {
        Self {
            id: StreamId::Tags,
            title: "Tag Readings".to_string(),
            points: readings
                .iter()
                .enumerate()
                .map(|(i, r)| (r.timestamp, (i + 1) as f64))
                .collect(),
        }
    }

    /// Whether the series draws a connecting line. A single point renders
    /// as an unconnected marker.
    pub fn draws_line(&self) -> bool {
        self.points.len() >= 2
    }

    /// Stable id for egui plot memory.
    pub fn plot_id(&self) -> String {
        match self.id {
            StreamId::Sensor(id) => format!("sensor_plot_{}", id),
            StreamId::Tags => "tag_plot".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn tag_at(ts: OffsetDateTime) -> TagReading {
        TagReading { timestamp: ts }
    }

    #[test]
    fn test_tag_stream_is_cumulative() {
        let base = datetime!(2026-03-02 08:00 UTC);
        let tags = vec![
            tag_at(base),
            tag_at(base + time::Duration::minutes(10)),
            tag_at(base + time::Duration::minutes(25)),
        ];

        let series = SeriesState::from_tags(&tags);

        assert_eq!(series.id, StreamId::Tags);
        let counts: Vec<f64> = series.points.iter().map(|p| p.1).collect();
        assert_eq!(counts, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_single_point_series_draws_no_line() {
        let info = SensorInfo {
            id: 2,
            description: "Soil moisture".to_string(),
        };
        let readings = vec![SensorReading {
            value: 41.5,
            timestamp: datetime!(2026-03-02 08:00 UTC),
        }];

        let series = SeriesState::from_readings(&info, &readings);

        assert!(!series.draws_line());
        assert_eq!(series.title, "Soil moisture");
    }

    #[test]
    fn test_two_point_series_draws_line() {
        let info = SensorInfo {
            id: 1,
            description: "Greenhouse temperature".to_string(),
        };
        let base = datetime!(2026-03-02 08:00 UTC);
        let readings = vec![
            SensorReading {
                value: 20.0,
                timestamp: base,
            },
            SensorReading {
                value: 21.0,
                timestamp: base + time::Duration::minutes(15),
            },
        ];

        let series = SeriesState::from_readings(&info, &readings);

        assert!(series.draws_line());
        assert_eq!(series.points.len(), 2);
    }
}
