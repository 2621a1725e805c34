//! Main application state and UI rendering for the Farmwatch GUI.
//!
//! This module contains the [`DashboardApp`] struct which implements the
//! egui application, handling user input, rendering, and coordinating with
//! the background worker.

use std::sync::mpsc as std_mpsc;
use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, RichText};
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::debug;

use super::components;
use super::demo;
use super::export;
use super::panels::charts::hours_ago;
use super::theme::{Theme, ThemeMode};
use super::types::SeriesState;
use super::worker::{Command, DashboardEvent};
use crate::config::Config;

/// How long toast notifications are displayed.
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Toast notification type.
#[derive(Debug, Clone)]
pub(crate) enum ToastType {
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub(crate) struct Toast {
    message: String,
    toast_type: ToastType,
    created_at: Instant,
}

/// Main application state.
pub struct DashboardApp {
    /// Channel to send commands to the worker.
    command_tx: mpsc::Sender<Command>,
    /// Channel to receive events from the worker (via std mpsc for non-async).
    event_rx: std_mpsc::Receiver<DashboardEvent>,
    /// Dashboard configuration.
    config: Config,
    /// Chart streams in display order (sensors first, tags last).
    pub(crate) series: Vec<SeriesState>,
    /// Whether an analysis job is in flight.
    analysis_running: bool,
    /// The last completed report; gates the export button.
    last_report: Option<String>,
    /// Whether the report window is open.
    pub(crate) report_open: bool,
    /// Status line text.
    status: String,
    /// When readings were last refreshed.
    last_refresh: Option<Instant>,
    /// Current theme mode (dark/light).
    theme_mode: ThemeMode,
    /// Current theme colors.
    pub(crate) theme: Theme,
    /// Active toast notifications.
    toasts: Vec<Toast>,
    /// Whether running in demo mode with generated data.
    demo_mode: bool,
}

impl DashboardApp {
    /// Create a new DashboardApp instance.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        command_tx: mpsc::Sender<Command>,
        event_rx: std_mpsc::Receiver<DashboardEvent>,
        config: Config,
        demo_mode: bool,
    ) -> Self {
        let theme_mode = ThemeMode::from_name(&config.gui.theme);
        let theme = Theme::for_mode(theme_mode);
        cc.egui_ctx.set_style(theme.to_style());

        let series = if demo_mode {
            demo::demo_series()
        } else {
            Vec::new()
        };

        let status = if demo_mode {
            "Demo Mode - generated data".to_string()
        } else {
            format!("Connecting to {}", config.api_url)
        };

        Self {
            command_tx,
            event_rx,
            config,
            series,
            analysis_running: false,
            last_report: None,
            report_open: false,
            status,
            last_refresh: Some(Instant::now()),
            theme_mode,
            theme,
            toasts: Vec::new(),
            demo_mode,
        }
    }

    /// The last completed report, if any.
    pub(crate) fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    /// Process all pending events from the worker.
    fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Send a command to the worker.
    fn send_command(&self, cmd: Command) {
        let _ = self.command_tx.try_send(cmd);
    }

    fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SensorsLoaded { sensors } => {
                debug!(count = sensors.len(), "Sensor descriptions received");
                self.status = format!("Found {} sensor(s)", sensors.len());
            }
            DashboardEvent::ReadingsUpdated { sensors, tags } => {
                let mut series: Vec<SeriesState> = sensors
                    .iter()
                    .map(|(info, readings)| SeriesState::from_readings(info, readings))
                    .collect();
                series.push(SeriesState::from_tags(&tags));

                let total: usize = series.iter().map(|s| s.points.len()).sum();
                self.series = series;
                self.status = format!("{} readings across {} streams", total, self.series.len());
            }
            DashboardEvent::AnalysisStarted => {
                self.analysis_running = true;
                self.status = "Analysis in progress...".to_string();
            }
            DashboardEvent::AnalysisReady { report } => {
                self.analysis_running = false;
                self.last_report = Some(report);
                self.report_open = true;
                self.status = "Analysis complete".to_string();
                self.add_toast("Analysis complete", ToastType::Success);
            }
            DashboardEvent::AnalysisFailed { error } => {
                self.analysis_running = false;
                self.status = "Analysis failed".to_string();
                self.add_toast(format!("Analysis failed: {}", error), ToastType::Error);
            }
        }
    }

    fn add_toast(&mut self, message: impl Into<String>, toast_type: ToastType) {
        self.toasts.push(Toast {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
        });
    }

    /// Remove expired toasts.
    fn cleanup_toasts(&mut self) {
        self.toasts.retain(|t| t.created_at.elapsed() < TOAST_DURATION);
    }

    /// Ask the worker for fresh readings.
    fn trigger_refresh(&mut self) {
        if self.demo_mode {
            return;
        }
        self.send_command(Command::RefreshReadings);
        self.last_refresh = Some(Instant::now());
    }

    /// Refresh readings when the configured interval has elapsed.
    fn check_auto_refresh(&mut self) {
        if self.demo_mode {
            return;
        }
        let interval = Duration::from_secs(self.config.refresh_interval_secs.max(5));
        if self.last_refresh.is_none_or(|t| t.elapsed() >= interval) {
            self.trigger_refresh();
        }
    }

    /// Kick off the analysis workflow.
    fn trigger_analysis(&mut self) {
        if self.analysis_running {
            return;
        }
        // Disable the trigger right away; the worker confirms with
        // AnalysisStarted or winds back with AnalysisFailed.
        self.analysis_running = true;
        self.status = "Submitting analysis job...".to_string();
        self.send_command(Command::StartAnalysis);
    }

    /// Export charts and the last report to a PDF in the export directory.
    fn export_report(&mut self) {
        let Some(report) = self.last_report.clone() else {
            self.add_toast("No analysis to export yet", ToastType::Error);
            return;
        };

        let now = OffsetDateTime::now_utc();
        let charts: Vec<export::ChartSeries> = self
            .series
            .iter()
            .map(|s| export::ChartSeries {
                title: s.title.clone(),
                points: s
                    .points
                    .iter()
                    .map(|&(ts, v)| (hours_ago(now, ts), v))
                    .collect(),
            })
            .collect();

        let (path, filename) =
            export::generate_export_path(&self.config.export_directory, "analysis", "pdf");
        match export::export_pdf(&charts, &report, &path) {
            Ok(()) => self.add_toast(format!("Exported {}", filename), ToastType::Success),
            Err(e) => self.add_toast(format!("Export failed: {}", e), ToastType::Error),
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(egui::Margin::symmetric(
                        self.theme.spacing.lg as i8,
                        self.theme.spacing.md as i8,
                    ))
                    .stroke(egui::Stroke::new(1.0, self.theme.border_subtle)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Farmwatch")
                            .size(self.theme.typography.heading)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.add_space(self.theme.spacing.sm);
                    ui.label(
                        RichText::new("farm environment dashboard")
                            .size(self.theme.typography.caption)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.analysis_running {
                            components::loading_indicator(ui, &self.theme, Some("Analyzing..."));
                        } else if ui
                            .button(RichText::new("Refresh").size(self.theme.typography.body))
                            .on_hover_text("Fetch the latest readings (R)")
                            .clicked()
                        {
                            self.trigger_refresh();
                        }
                    });
                });
            });
    }

    fn render_actions(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("actions")
            .frame(
                egui::Frame::new()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(egui::Margin::symmetric(
                        self.theme.spacing.lg as i8,
                        self.theme.spacing.md as i8,
                    )),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let analysis_label = if self.analysis_running {
                        "Processing..."
                    } else {
                        "Run AI Analysis"
                    };
                    let analysis_btn = egui::Button::new(
                        RichText::new(analysis_label)
                            .size(self.theme.typography.body)
                            .color(self.theme.text_on_accent),
                    )
                    .fill(self.theme.accent);
                    if ui
                        .add_enabled(!self.analysis_running, analysis_btn)
                        .on_hover_text("Ask the service for a fresh analysis report")
                        .clicked()
                    {
                        self.trigger_analysis();
                    }

                    ui.add_space(self.theme.spacing.md);

                    let export_btn = egui::Button::new(
                        RichText::new("Export PDF")
                            .size(self.theme.typography.body)
                            .color(self.theme.text_on_accent),
                    )
                    .fill(self.theme.success);
                    if ui
                        .add_enabled(self.last_report.is_some(), export_btn)
                        .on_hover_text("Save charts and the latest report as PDF")
                        .clicked()
                    {
                        self.export_report();
                    }

                    if self.last_report.is_some() {
                        ui.add_space(self.theme.spacing.md);
                        if ui
                            .button(RichText::new("Show Report").size(self.theme.typography.body))
                            .clicked()
                        {
                            self.report_open = true;
                        }
                    }
                });
            });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .frame(
                egui::Frame::new()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(egui::Margin::symmetric(
                        self.theme.spacing.lg as i8,
                        self.theme.spacing.sm as i8,
                    ))
                    .stroke(egui::Stroke::new(1.0, self.theme.border_subtle)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let status_color = if self.analysis_running {
                        self.theme.accent
                    } else if self.series.iter().any(|s| !s.points.is_empty()) {
                        self.theme.success
                    } else {
                        self.theme.text_muted
                    };
                    components::status_dot(ui, status_color, "Data status");
                    ui.add_space(self.theme.spacing.sm);

                    ui.label(
                        RichText::new(&self.status)
                            .color(self.theme.text_muted)
                            .size(self.theme.typography.caption),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new("R: Refresh | T: Theme")
                                .color(self.theme.text_muted)
                                .size(self.theme.typography.caption),
                        );
                    });
                });
            });
    }

    fn render_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -64.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::bottom_up(egui::Align::RIGHT), |ui| {
                    for toast in &self.toasts {
                        let (bg_color, icon) = match toast.toast_type {
                            ToastType::Success => (self.theme.success, "[OK]"),
                            ToastType::Error => (self.theme.danger, "[!]"),
                        };
                        let elapsed = toast.created_at.elapsed().as_secs_f32();
                        let fade_start = TOAST_DURATION.as_secs_f32() - 0.5;
                        let alpha = if elapsed > fade_start {
                            1.0 - (elapsed - fade_start) / 0.5
                        } else {
                            1.0
                        };

                        let text_color = self.theme.text_on_accent.gamma_multiply(alpha);
                        egui::Frame::new()
                            .fill(bg_color.gamma_multiply(0.95 * alpha))
                            .inner_margin(egui::Margin::symmetric(12, 8))
                            .corner_radius(egui::CornerRadius::same(6))
                            .shadow(egui::Shadow {
                                offset: [0, 2],
                                blur: 8,
                                spread: 0,
                                color: Color32::from_black_alpha((40.0 * alpha) as u8),
                            })
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.label(RichText::new(icon).color(text_color).strong());
                                    ui.label(RichText::new(&toast.message).color(text_color));
                                });
                            });
                        ui.add_space(4.0);
                    }
                });
            });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events();
        self.cleanup_toasts();
        self.check_auto_refresh();

        // Handle keyboard shortcuts
        let mut refresh = false;
        let mut toggle_theme = false;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::R) && !i.modifiers.command && !i.modifiers.ctrl {
                refresh = true;
            }
            if i.key_pressed(egui::Key::T) && !i.modifiers.command && !i.modifiers.ctrl {
                toggle_theme = true;
            }
        });
        if refresh {
            self.trigger_refresh();
        }
        if toggle_theme {
            self.theme_mode.toggle();
            self.theme = Theme::for_mode(self.theme_mode);
            ctx.set_style(self.theme.to_style());
        }

        self.render_header(ctx);
        self.render_status_bar(ctx);
        self.render_actions(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(self.theme.bg_primary)
                    .inner_margin(egui::Margin::same(self.theme.spacing.md as i8)),
            )
            .show(ctx, |ui| {
                self.render_charts_panel(ui);
            });

        self.render_report_window(ctx);
        self.render_toasts(ctx);

        // Keep polling worker events even when idle
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
