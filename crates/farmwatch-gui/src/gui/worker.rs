//! Background worker for service communication.
//!
//! This module contains the [`DashboardWorker`] which performs all HTTP
//! requests on a background tokio task, keeping the UI thread responsive.
//!
//! The analysis poll timer also lives here: after a successful submission
//! the worker spawns exactly one recurring task that sends
//! [`Command::CheckAnalysis`] ticks back through the command channel, so
//! every piece of poller state stays on the worker task.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use farmwatch_client::{
    AnalysisError, AnalysisPoller, ApiClient, POLL_INTERVAL, PollOutcome, PollerState,
};
use farmwatch_types::{DISPLAY_WINDOW, SensorInfo, SensorReading, TagReading, recent};

/// Sensor ids charted when the descriptions endpoint has nothing to say.
const DEFAULT_SENSOR_IDS: [u32; 5] = [1, 2, 3, 4, 5];

/// Commands sent from the UI thread to the background worker.
#[derive(Debug, Clone)]
pub enum Command {
    /// Fetch the sensor descriptions.
    LoadSensors,

    /// Fetch the latest readings for every chart stream.
    RefreshReadings,

    /// Start a new analysis job on the service.
    StartAnalysis,

    /// Check whether the running analysis job produced a report.
    /// Sent by the poll timer task, not the UI.
    CheckAnalysis,

    /// Shut down the worker task.
    Shutdown,
}

/// Events sent from the background worker to the UI thread.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// Sensor descriptions arrived.
    SensorsLoaded {
        /// The described sensors, in service order.
        sensors: Vec<SensorInfo>,
    },

    /// Fresh readings for every stream, already windowed.
    ReadingsUpdated {
        /// Sensor streams with their readings, in display order.
        sensors: Vec<(SensorInfo, Vec<SensorReading>)>,
        /// The tag stream.
        tags: Vec<TagReading>,
    },

    /// An analysis job was accepted by the service.
    AnalysisStarted,

    /// The analysis report is ready.
    AnalysisReady {
        /// The sanitized report text.
        report: String,
    },

    /// The analysis workflow ended without a report.
    AnalysisFailed {
        /// Description of the failure.
        error: String,
    },
}

/// Handle for the recurring analysis poll timer.
struct PollTimer {
    cancel_token: CancellationToken,
}

/// Background worker that owns the service client and the analysis poller.
pub struct DashboardWorker {
    command_rx: mpsc::Receiver<Command>,
    /// Cloned into the poll timer task so ticks re-enter the command loop.
    command_tx: mpsc::Sender<Command>,
    event_tx: mpsc::Sender<DashboardEvent>,
    client: ApiClient,
    poller: AnalysisPoller<ApiClient>,
    /// Sensor descriptions from the last `LoadSensors`.
    sensors: Vec<SensorInfo>,
    /// The live poll timer, if an analysis job is in flight.
    poll_timer: Option<PollTimer>,
}

impl DashboardWorker {
    /// Create a new worker over the given service client.
    pub fn new(
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::Sender<Command>,
        event_tx: mpsc::Sender<DashboardEvent>,
        client: ApiClient,
    ) -> Self {
        let poller = AnalysisPoller::new(client.clone());
        Self {
            command_rx,
            command_tx,
            event_tx,
            client,
            poller,
            sensors: Vec::new(),
            poll_timer: None,
        }
    }

    /// Send an event to the UI, logging any send failures.
    async fn send_event(&self, event: DashboardEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            error!("Failed to send event to UI: {}", e);
        }
    }

    /// Run the worker's main loop.
    pub async fn run(mut self) {
        info!("Dashboard worker started");
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                Command::Shutdown => break,
                cmd => self.handle_command(cmd).await,
            }
        }

        // Clean up: the poll timer must not outlive the worker
        self.stop_poll_timer();
        info!("Dashboard worker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::LoadSensors => self.handle_load_sensors().await,
            Command::RefreshReadings => self.handle_refresh_readings().await,
            Command::StartAnalysis => self.handle_start_analysis().await,
            Command::CheckAnalysis => self.handle_check_analysis().await,
            Command::Shutdown => {} // Handled in run() loop
        }
    }

    async fn handle_load_sensors(&mut self) {
        let sensors = self.client.sensors().await;
        info!(count = sensors.len(), "Loaded sensor descriptions");
        self.sensors = sensors.clone();
        self.send_event(DashboardEvent::SensorsLoaded { sensors }).await;
    }

    /// The streams to chart: whatever the descriptions endpoint reported,
    /// or the default set when it reported nothing.
    fn chart_sensors(&self) -> Vec<SensorInfo> {
        if self.sensors.is_empty() {
            DEFAULT_SENSOR_IDS
                .iter()
                .map(|&id| SensorInfo {
                    id,
                    description: format!("Sensor {}", id),
                })
                .collect()
        } else {
            self.sensors.clone()
        }
    }

    async fn handle_refresh_readings(&mut self) {
        let mut sensors = Vec::new();
        for info in self.chart_sensors() {
            let readings = self.client.sensor_readings(info.id).await;
            let readings = recent(&readings, DISPLAY_WINDOW).to_vec();
            sensors.push((info, readings));
        }

        let tags = self.client.tag_readings().await;
        let tags = recent(&tags, DISPLAY_WINDOW).to_vec();

        debug!(streams = sensors.len() + 1, "Refreshed readings");
        self.send_event(DashboardEvent::ReadingsUpdated { sensors, tags })
            .await;
    }

    async fn handle_start_analysis(&mut self) {
        match self.poller.submit().await {
            Ok(()) => {
                self.start_poll_timer();
                self.send_event(DashboardEvent::AnalysisStarted).await;
            }
            Err(AnalysisError::AlreadyRunning) => {
                // The UI keeps the trigger disabled while a job runs; a
                // stray duplicate is dropped rather than replacing the timer.
                warn!("Ignoring analysis submission while a job is running");
            }
            Err(AnalysisError::Client(e)) => {
                warn!(error = %e, "Analysis submission failed");
                self.send_event(DashboardEvent::AnalysisFailed {
                    error: e.to_string(),
                })
                .await;
            }
        }
    }

    async fn handle_check_analysis(&mut self) {
        if self.poller.state() != PollerState::Polling {
            // A tick raced the terminal transition; the timer is already
            // cancelled or about to be.
            debug!("Dropping stale poll tick");
            return;
        }

        match self.poller.check().await {
            PollOutcome::Pending => {}
            PollOutcome::Ready(report) => {
                self.stop_poll_timer();
                self.send_event(DashboardEvent::AnalysisReady { report }).await;
            }
            PollOutcome::Failed(error) => {
                self.stop_poll_timer();
                self.send_event(DashboardEvent::AnalysisFailed { error }).await;
            }
        }
    }

    /// Spawn the recurring poll timer. At most one is alive at a time.
    fn start_poll_timer(&mut self) {
        self.stop_poll_timer();

        let cancel_token = CancellationToken::new();
        let task_token = cancel_token.clone();
        let command_tx = self.command_tx.clone();

        tokio::spawn(async move {
            analysis_poll_timer(command_tx, task_token).await;
        });

        self.poll_timer = Some(PollTimer { cancel_token });
    }

    fn stop_poll_timer(&mut self) {
        if let Some(timer) = self.poll_timer.take() {
            timer.cancel_token.cancel();
        }
    }
}

/// Recurring timer that turns poll intervals into [`Command::CheckAnalysis`]
/// ticks on the worker's command channel.
async fn analysis_poll_timer(command_tx: mpsc::Sender<Command>, cancel_token: CancellationToken) {
    info!(
        interval_secs = POLL_INTERVAL.as_secs(),
        "Analysis poll timer started"
    );

    let mut interval = tokio::time::interval(POLL_INTERVAL);
    // Skip the first immediate tick
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if command_tx.send(Command::CheckAnalysis).await.is_err() {
                    break; // Worker is gone
                }
            }
            _ = cancel_token.cancelled() => {
                info!("Analysis poll timer cancelled");
                break;
            }
        }
    }
}
