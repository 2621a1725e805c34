//! Shared types for the Farmwatch dashboard.
//!
//! This crate provides the data types exchanged with the farm monitoring
//! service: sensor descriptions and readings, tag readings, and the
//! loosely-shaped analysis report payload together with the normalization
//! and sanitization steps that turn it into displayable text.
//!
//! # Example
//!
//! ```
//! use farmwatch_types::{AnalysisPayload, sanitize_report};
//!
//! let payload: AnalysisPayload =
//!     serde_json::from_str(r#"{"analysis": {"report": "Soil is dry."}}"#).unwrap();
//! assert_eq!(sanitize_report(&payload.report_text()), "Soil is dry.");
//! ```

pub mod report;
pub mod types;

pub use report::{AnalysisBody, AnalysisPayload, sanitize_report};
pub use types::{DISPLAY_WINDOW, SensorInfo, SensorReading, TagReading, recent};
