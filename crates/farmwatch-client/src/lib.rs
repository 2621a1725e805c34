//! HTTP client and analysis polling for the Farmwatch dashboard.
//!
//! This crate talks to the farm monitoring service: it fetches sensor
//! descriptions, sensor readings, and tag readings, and it drives the
//! submit/poll workflow for server-side AI analysis jobs.
//!
//! # Architecture
//!
//! - [`ApiClient`] wraps the service's REST endpoints. Read operations
//!   return empty result sets on failure (the dashboard cannot tell "empty"
//!   from "no data yet"); the job operations return typed errors.
//! - [`AnalysisPoller`] is the state machine for the analysis workflow:
//!   submit a job, then check the result endpoint on a fixed interval until
//!   it answers with something other than "not ready".
//! - [`mock::MockAnalysisApi`] scripts the job endpoints for tests.
//!
//! # Example
//!
//! ```no_run
//! use farmwatch_client::{AnalysisPoller, ApiClient, PollOutcome, POLL_INTERVAL};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://localhost:8000")?;
//! let mut poller = AnalysisPoller::new(client);
//!
//! poller.submit().await?;
//! loop {
//!     tokio::time::sleep(POLL_INTERVAL).await;
//!     match poller.check().await {
//!         PollOutcome::Pending => continue,
//!         PollOutcome::Ready(report) => {
//!             println!("{report}");
//!             break;
//!         }
//!         PollOutcome::Failed(error) => {
//!             eprintln!("analysis failed: {error}");
//!             break;
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod api;
pub mod error;
pub mod mock;

pub use analysis::{
    AnalysisApi, AnalysisError, AnalysisPoller, POLL_INTERVAL, PollOutcome, PollerState,
};
pub use api::ApiClient;
pub use error::{ClientError, Result};
