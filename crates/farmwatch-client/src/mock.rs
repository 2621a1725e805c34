//! Mock analysis API for testing.
//!
//! This module provides a scriptable implementation of
//! [`AnalysisApi`](crate::analysis::AnalysisApi) so the polling workflow can
//! be exercised without a running service.
//!
//! # Features
//!
//! - **Scripted results**: queue the responses `latest_analysis` returns
//! - **Failure injection**: make the next submission fail
//! - **Call counters**: assert how many requests a workflow issued

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use farmwatch_types::AnalysisPayload;

use crate::analysis::AnalysisApi;
use crate::error::{ClientError, Result};

/// A scriptable analysis API for tests.
///
/// Responses for `latest_analysis` are consumed front to back; once the
/// queue is empty the mock answers [`ClientError::NotReady`], mimicking a
/// service whose job never finishes.
#[derive(Debug, Default)]
pub struct MockAnalysisApi {
    submit_error: Mutex<Option<ClientError>>,
    results: Mutex<VecDeque<Result<AnalysisPayload>>>,
    submit_calls: AtomicU32,
    check_calls: AtomicU32,
}

impl MockAnalysisApi {
    /// Create a mock that accepts submissions and never finishes a job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next submission fail with `error`.
    pub async fn fail_next_submit(&self, error: ClientError) {
        *self.submit_error.lock().await = Some(error);
    }

    /// Queue a result for the next `latest_analysis` call.
    pub async fn push_result(&self, result: Result<AnalysisPayload>) {
        self.results.lock().await.push_back(result);
    }

    /// Queue a finished-job payload parsed from JSON.
    ///
    /// # Panics
    ///
    /// Panics if `json` is not valid JSON.
    pub async fn push_payload(&self, json: &str) {
        let payload = serde_json::from_str(json).expect("mock payload must be valid JSON");
        self.push_result(Ok(payload)).await;
    }

    /// Queue a not-ready (404) response.
    pub async fn push_not_ready(&self) {
        self.push_result(Err(ClientError::NotReady)).await;
    }

    /// Number of submissions attempted so far.
    pub fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::Relaxed)
    }

    /// Number of result checks attempted so far.
    pub fn check_calls(&self) -> u32 {
        self.check_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AnalysisApi for MockAnalysisApi {
    async fn start_analysis(&self) -> Result<()> {
        self.submit_calls.fetch_add(1, Ordering::Relaxed);
        match self.submit_error.lock().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn latest_analysis(&self) -> Result<AnalysisPayload> {
        self.check_calls.fetch_add(1, Ordering::Relaxed);
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::NotReady))
    }
}
