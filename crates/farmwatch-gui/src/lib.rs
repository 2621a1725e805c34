//! # Farmwatch
//!
//! A native desktop dashboard for farm environmental monitoring.
//!
//! Farmwatch polls a farm monitoring service over HTTP for environmental
//! sensor readings and livestock tag readings, charts the most recent
//! window of each stream, runs server-side AI analysis jobs, and exports
//! charts plus the analysis report to PDF.
//!
//! ## Usage
//!
//! Run the `farmwatch` binary:
//!
//! ```sh
//! farmwatch
//! ```
//!
//! ### Options
//!
//! - `--api-url <URL>` - Base URL of the monitoring service (defaults to
//!   the configured value, or `http://localhost:8000`)
//! - `--demo` - Run with generated demo data instead of a live service
//! - `--verbose` / `--quiet` - Adjust log verbosity
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/farmwatch/config.toml` (or platform
//! equivalent): service URL, readings refresh interval, export directory,
//! and theme. See [`config::Config`].
//!
//! ## Architecture
//!
//! The UI thread never performs network I/O. A background tokio runtime
//! runs the [`gui::DashboardWorker`]; the two sides communicate over
//! channels ([`gui::Command`] in, [`gui::DashboardEvent`] out).

pub mod config;
pub mod gui;
