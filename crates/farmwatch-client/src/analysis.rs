//! Analysis job submission and polling.
//!
//! The service exposes its long-running AI analysis through a stateless
//! submit/poll pair: `POST /data_analysis/process` starts a job and
//! `GET /data_analysis/latest` answers 404 until a report exists. The
//! [`AnalysisPoller`] owns the client-side state machine for that workflow:
//! at most one job is in flight, every check issues exactly one request,
//! and every outcome other than [`PollOutcome::Pending`] ends the cycle.
//!
//! The poller does not schedule anything itself. The caller runs one
//! recurring timer at [`POLL_INTERVAL`] while the poller is
//! [`PollerState::Polling`] and cancels it on any terminal outcome.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use farmwatch_types::{AnalysisPayload, sanitize_report};

use crate::api::ApiClient;
use crate::error::{ClientError, Result};

/// How often a pending analysis job is re-checked.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Operations the poller needs from the analysis endpoints.
///
/// Implemented by [`ApiClient`] for the real service and by
/// [`MockAnalysisApi`](crate::mock::MockAnalysisApi) in tests.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Start a new analysis job.
    async fn start_analysis(&self) -> Result<()>;

    /// Fetch the most recent analysis result.
    async fn latest_analysis(&self) -> Result<AnalysisPayload>;
}

#[async_trait]
impl AnalysisApi for ApiClient {
    async fn start_analysis(&self) -> Result<()> {
        ApiClient::start_analysis(self).await
    }

    async fn latest_analysis(&self) -> Result<AnalysisPayload> {
        ApiClient::latest_analysis(self).await
    }
}

/// Whether an analysis job is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollerState {
    /// No job in flight; a new one may be submitted.
    #[default]
    Idle,
    /// A job was submitted and its result is being polled for.
    Polling,
}

/// Result of one poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The report is ready, sanitized for display. The cycle is over.
    Ready(String),
    /// The job is still running; the timer keeps going.
    Pending,
    /// The cycle ended without a report.
    Failed(String),
}

/// Error returned by [`AnalysisPoller::submit`].
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// A job is already being polled for.
    #[error("An analysis job is already running")]
    AlreadyRunning,

    /// The submission request failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Client-side state machine for the analysis workflow.
///
/// Holds the single "current job" flag and the "last report" slot. Both are
/// reachable only through the transition operations, so confining the
/// poller to one task is all the synchronization the workflow needs.
#[derive(Debug)]
pub struct AnalysisPoller<A> {
    api: A,
    state: PollerState,
    last_report: Option<String>,
}

impl<A: AnalysisApi> AnalysisPoller<A> {
    /// Create an idle poller over the given API.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: PollerState::default(),
            last_report: None,
        }
    }

    /// Current workflow state.
    pub fn state(&self) -> PollerState {
        self.state
    }

    /// The most recent completed report, if any.
    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    /// Submit a new analysis job.
    ///
    /// On success the poller enters [`PollerState::Polling`] and the caller
    /// must schedule exactly one recurring check at [`POLL_INTERVAL`]. On
    /// any error the poller stays idle and nothing must be scheduled.
    /// Submitting while a job is already in flight is rejected without a
    /// network call.
    pub async fn submit(&mut self) -> std::result::Result<(), AnalysisError> {
        if self.state == PollerState::Polling {
            return Err(AnalysisError::AlreadyRunning);
        }

        self.api.start_analysis().await?;
        self.state = PollerState::Polling;
        info!("Analysis job submitted");
        Ok(())
    }

    /// Run one poll tick against the result endpoint.
    ///
    /// Only [`PollOutcome::Pending`] leaves the job in flight; on every
    /// other outcome the caller must cancel its timer. Calling this with no
    /// job in flight is a caller bug and ends the cycle without touching
    /// the network, so a stale timer can never outlive its job.
    pub async fn check(&mut self) -> PollOutcome {
        if self.state != PollerState::Polling {
            warn!("Poll tick with no analysis job in flight");
            return PollOutcome::Failed("No analysis job in flight".to_string());
        }

        match self.api.latest_analysis().await {
            Ok(payload) => {
                let report = sanitize_report(&payload.report_text());
                self.last_report = Some(report.clone());
                self.state = PollerState::Idle;
                info!("Analysis report ready");
                PollOutcome::Ready(report)
            }
            Err(ClientError::NotReady) => {
                debug!("Analysis result not ready yet");
                PollOutcome::Pending
            }
            Err(e) => {
                self.state = PollerState::Idle;
                warn!(error = %e, "Analysis polling failed");
                PollOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAnalysisApi;

    fn unexpected_status(status: u16) -> ClientError {
        ClientError::UnexpectedStatus {
            status,
            message: "boom".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_success_enters_polling() {
        let mut poller = AnalysisPoller::new(MockAnalysisApi::new());

        poller.submit().await.unwrap();

        assert_eq!(poller.state(), PollerState::Polling);
        assert_eq!(poller.api.submit_calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_error_stays_idle() {
        let api = MockAnalysisApi::new();
        api.fail_next_submit(unexpected_status(500)).await;
        let mut poller = AnalysisPoller::new(api);

        let result = poller.submit().await;

        assert!(matches!(result, Err(AnalysisError::Client(_))));
        assert_eq!(poller.state(), PollerState::Idle);
    }

    #[tokio::test]
    async fn test_second_submit_rejected_without_network_call() {
        let mut poller = AnalysisPoller::new(MockAnalysisApi::new());
        poller.submit().await.unwrap();

        let result = poller.submit().await;

        assert!(matches!(result, Err(AnalysisError::AlreadyRunning)));
        assert_eq!(poller.state(), PollerState::Polling);
        assert_eq!(poller.api.submit_calls(), 1);
    }

    #[tokio::test]
    async fn test_not_ready_leaves_job_in_flight() {
        let api = MockAnalysisApi::new();
        api.push_not_ready().await;
        let mut poller = AnalysisPoller::new(api);
        poller.submit().await.unwrap();

        let outcome = poller.check().await;

        assert_eq!(outcome, PollOutcome::Pending);
        assert_eq!(poller.state(), PollerState::Polling);
        assert!(poller.last_report().is_none());
    }

    #[tokio::test]
    async fn test_ready_with_bare_string_payload() {
        let api = MockAnalysisApi::new();
        api.push_payload(r#""All sensors nominal.""#).await;
        let mut poller = AnalysisPoller::new(api);
        poller.submit().await.unwrap();

        let outcome = poller.check().await;

        assert_eq!(outcome, PollOutcome::Ready("All sensors nominal.".to_string()));
        assert_eq!(poller.state(), PollerState::Idle);
        assert_eq!(poller.last_report(), Some("All sensors nominal."));
    }

    #[tokio::test]
    async fn test_ready_with_wrapped_payload() {
        let api = MockAnalysisApi::new();
        api.push_payload(r#"{"analysis": "Humidity trending up."}"#).await;
        let mut poller = AnalysisPoller::new(api);
        poller.submit().await.unwrap();

        let outcome = poller.check().await;

        match outcome {
            PollOutcome::Ready(report) => assert!(!report.is_empty()),
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ready_with_nested_report_payload() {
        let api = MockAnalysisApi::new();
        api.push_payload(r#"{"analysis": {"report": "Plan: water more.\nRecommendations: less"}}"#)
            .await;
        let mut poller = AnalysisPoller::new(api);
        poller.submit().await.unwrap();

        let outcome = poller.check().await;

        // The recommendations tail is stripped by sanitization.
        assert_eq!(outcome, PollOutcome::Ready("Plan: water more.".to_string()));
    }

    #[tokio::test]
    async fn test_unexpected_status_ends_cycle() {
        let api = MockAnalysisApi::new();
        api.push_result(Err(unexpected_status(500))).await;
        let mut poller = AnalysisPoller::new(api);
        poller.submit().await.unwrap();

        let outcome = poller.check().await;

        assert!(matches!(outcome, PollOutcome::Failed(_)));
        assert_eq!(poller.state(), PollerState::Idle);
        assert!(poller.last_report().is_none());
    }

    #[tokio::test]
    async fn test_check_when_idle_is_terminal_without_network_call() {
        let mut poller = AnalysisPoller::new(MockAnalysisApi::new());

        let outcome = poller.check().await;

        assert!(matches!(outcome, PollOutcome::Failed(_)));
        assert_eq!(poller.api.check_calls(), 0);
    }

    #[tokio::test]
    async fn test_full_cycle_pending_then_ready() {
        let api = MockAnalysisApi::new();
        api.push_not_ready().await;
        api.push_not_ready().await;
        api.push_payload(r#"{"analysis": {"report": "Week looked stable."}}"#).await;
        let mut poller = AnalysisPoller::new(api);

        poller.submit().await.unwrap();
        assert_eq!(poller.check().await, PollOutcome::Pending);
        assert_eq!(poller.check().await, PollOutcome::Pending);
        assert_eq!(
            poller.check().await,
            PollOutcome::Ready("Week looked stable.".to_string())
        );

        assert_eq!(poller.state(), PollerState::Idle);
        assert_eq!(poller.api.check_calls(), 3);

        // A new cycle can start after the previous one completed.
        poller.submit().await.unwrap();
        assert_eq!(poller.state(), PollerState::Polling);
    }
}
