//! Analysis report payload shapes and sanitization.
//!
//! The analysis service does not commit to one response shape: depending on
//! the model backing it, a finished job may come back as a bare string, as
//! `{"analysis": "..."}`, or as `{"analysis": {"report": "..."}}`. The
//! dashboard has to tolerate all of them, so the payload is modeled as an
//! untagged union with one explicit normalization step producing a single
//! canonical report string.

use serde::{Deserialize, Serialize};

/// Marker introducing the trailing section that is dropped from reports.
const RECOMMENDATIONS_MARKER: &str = "Recommendations:";

/// Payload returned by the analysis endpoint once a job has completed.
///
/// Deserialization never fails on valid JSON: shapes the dashboard does not
/// recognize fall through to [`AnalysisBody::Other`] and are stringified
/// during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisPayload {
    /// The body wrapped in an `analysis` field.
    Wrapped {
        /// The wrapped report body.
        analysis: AnalysisBody,
    },
    /// The body sent without a wrapper.
    Bare(AnalysisBody),
}

/// The report body inside an [`AnalysisPayload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisBody {
    /// `{"report": "..."}`.
    Structured {
        /// The report text.
        report: String,
    },
    /// A plain string report.
    Text(String),
    /// Anything else the service decides to send.
    Other(serde_json::Value),
}

impl AnalysisPayload {
    /// Collapse whichever wire shape arrived into the raw report text.
    ///
    /// The result still needs [`sanitize_report`] before being shown to the
    /// user or laid out in an export.
    #[must_use]
    pub fn report_text(&self) -> String {
        match self {
            Self::Wrapped { analysis } => analysis.report_text(),
            Self::Bare(body) => body.report_text(),
        }
    }
}

impl AnalysisBody {
    fn report_text(&self) -> String {
        match self {
            Self::Structured { report } => report.clone(),
            Self::Text(text) => text.clone(),
            Self::Other(value) => value.to_string(),
        }
    }
}

/// Clean a raw report string for display and export.
///
/// Reports arrive with literal `\n` escapes, structural punctuation left
/// over from stringified payloads, and sometimes a trailing
/// "Recommendations:" section that the dashboard does not show. The same
/// sanitized text is used for the report window and the PDF export.
#[must_use]
pub fn sanitize_report(raw: &str) -> String {
    let mut text = raw.replace("\\n", "\n");
    text.retain(|c| !matches!(c, '{' | '}' | '[' | ']' | '"' | '\''));
    if let Some(pos) = text.find(RECOMMENDATIONS_MARKER) {
        text.truncate(pos);
    }
    let text = text.trim();
    // A stringified `{'report': ...}` dict leaves its key behind once the
    // punctuation is gone.
    let text = text.strip_prefix("report:").map_or(text, str::trim);
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_bare_string() {
        let payload: AnalysisPayload = serde_json::from_str(r#""All sensors nominal.""#).unwrap();
        assert_eq!(payload.report_text(), "All sensors nominal.");
    }

    #[test]
    fn test_payload_wrapped_string() {
        let payload: AnalysisPayload =
            serde_json::from_str(r#"{"analysis": "Humidity trending up."}"#).unwrap();
        assert_eq!(payload.report_text(), "Humidity trending up.");
    }

    #[test]
    fn test_payload_wrapped_structured_report() {
        let payload: AnalysisPayload =
            serde_json::from_str(r#"{"analysis": {"report": "Irrigation on schedule."}}"#).unwrap();
        assert_eq!(payload.report_text(), "Irrigation on schedule.");
    }

    #[test]
    fn test_payload_bare_structured_report() {
        let payload: AnalysisPayload =
            serde_json::from_str(r#"{"report": "Check sensor 3."}"#).unwrap();
        assert_eq!(payload.report_text(), "Check sensor 3.");
    }

    #[test]
    fn test_payload_unknown_shape_is_stringified() {
        let payload: AnalysisPayload =
            serde_json::from_str(r#"{"status": "done", "score": 7}"#).unwrap();
        let text = payload.report_text();
        assert!(text.contains("done"));
    }

    #[test]
    fn test_sanitize_strips_structural_punctuation() {
        let raw = r#"{"summary": "ok"}"#;
        assert_eq!(sanitize_report(raw), "summary: ok");
    }

    #[test]
    fn test_sanitize_stringified_dict_with_recommendations() {
        // A report that reached us as a stringified dict rather than JSON.
        let raw = "{'report': 'Plan: water more.\\nRecommendations: reduce fertilizer'}";
        assert_eq!(sanitize_report(raw), "Plan: water more.");
    }

    #[test]
    fn test_sanitize_unescapes_newlines() {
        let sanitized = sanitize_report("line one\\nline two");
        assert_eq!(sanitized, "line one\nline two");
    }

    #[test]
    fn test_sanitize_truncates_recommendations_section() {
        let raw = "Soil is dry.\nRecommendations: irrigate zone 2";
        assert_eq!(sanitize_report(raw), "Soil is dry.");
    }

    #[test]
    fn test_sanitize_plain_text_passes_through() {
        assert_eq!(sanitize_report("  Weekly report.  "), "Weekly report.");
    }
}
