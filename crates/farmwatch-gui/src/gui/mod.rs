//! Native desktop GUI for the Farmwatch dashboard.
//!
//! This module provides a cross-platform GUI application built with
//! [egui](https://www.egui.rs/). The UI thread never performs network I/O:
//! a background tokio runtime runs the [`DashboardWorker`], and the two
//! sides talk over channels.
//!
//! # Usage
//!
//! ```bash
//! farmwatch
//! farmwatch --demo
//! ```

mod app;
mod components;
pub mod demo;
pub mod export;
mod panels;
mod theme;
mod types;
mod worker;

use std::sync::mpsc as std_mpsc;

use anyhow::Result;
use eframe::egui;
use tokio::sync::mpsc;
use tracing::info;

use farmwatch_client::ApiClient;

use crate::config::Config;

pub use app::DashboardApp;
pub use theme::{Theme, ThemeMode};
pub use types::{SeriesState, StreamId};
pub use worker::{Command, DashboardEvent, DashboardWorker};

/// Options for running the GUI application.
#[derive(Debug, Default, Clone)]
pub struct GuiOptions {
    /// Run with generated data instead of a live service.
    pub demo: bool,
}

/// Run the GUI application.
///
/// This is the main entry point for the GUI. It:
/// 1. Creates communication channels between UI and worker
/// 2. Spawns the background worker on its own tokio runtime
/// 3. Runs the egui/eframe main loop
pub fn run(config: Config, options: GuiOptions) -> Result<()> {
    // A bad URL should surface before any window opens
    let client = ApiClient::new(&config.api_url)?;

    let (command_tx, command_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx_tokio) = mpsc::channel::<DashboardEvent>(32);

    // Bridge from tokio mpsc to std mpsc for sync access in egui
    let (std_tx, std_rx) = std_mpsc::channel::<DashboardEvent>();

    let startup_command_tx = command_tx.clone();
    let worker_command_tx = command_tx.clone();
    let is_demo = options.demo;

    // Spawn tokio runtime thread
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
        rt.block_on(async {
            let worker = DashboardWorker::new(command_rx, worker_command_tx, event_tx, client);

            // Load descriptions and initial readings on startup
            // (in demo mode the app renders generated data instead)
            if !is_demo {
                let _ = startup_command_tx.send(Command::LoadSensors).await;
                let _ = startup_command_tx.send(Command::RefreshReadings).await;
            }

            // Forward events from worker to std channel
            let mut event_rx = event_rx_tokio;
            let forward_handle = tokio::spawn(async move {
                while let Some(event) = event_rx.recv().await {
                    if std_tx.send(event).is_err() {
                        break; // GUI closed
                    }
                }
            });

            // Run the worker; it stops when the last command sender drops
            worker.run().await;
            forward_handle.abort();
        });
    });

    info!(url = %config.api_url, demo = is_demo, "Starting dashboard");

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([900.0, 730.0])
        .with_min_inner_size([700.0, 520.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Farmwatch",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc, command_tx, std_rx, config, is_demo,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {}", e))?;

    Ok(())
}
