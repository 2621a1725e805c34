//! Chart grid rendering.
//!
//! One time-series chart per stream, laid out two per row. The x-axis runs
//! in hours before now (negative up to zero) so the newest reading sits at
//! the right edge.

use eframe::egui::{self, RichText};
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};
use time::OffsetDateTime;

use crate::gui::app::DashboardApp;
use crate::gui::components;
use crate::gui::theme::Theme;
use crate::gui::types::{SeriesState, StreamId};

/// Chart height in points.
const CHART_HEIGHT: f32 = 160.0;

/// Charts per row.
const GRID_COLUMNS: usize = 2;

impl DashboardApp {
    /// Render the chart grid for every stream.
    pub(crate) fn render_charts_panel(&mut self, ui: &mut egui::Ui) {
        if self.series.is_empty() {
            components::empty_state(
                ui,
                &self.theme,
                "No readings yet",
                "Waiting for the monitoring service to answer. Press R to retry.",
            );
            return;
        }

        let now = OffsetDateTime::now_utc();
        let spacing = self.theme.spacing.md;

        egui::ScrollArea::vertical().show(ui, |ui| {
            let column_width =
                ((ui.available_width() - spacing) / GRID_COLUMNS as f32).max(200.0);

            for row in self.series.chunks(GRID_COLUMNS) {
                ui.horizontal(|ui| {
                    for series in row {
                        ui.allocate_ui(
                            egui::vec2(column_width, CHART_HEIGHT + 48.0),
                            |ui| {
                                render_chart_card(ui, &self.theme, series, now);
                            },
                        );
                    }
                });
                ui.add_space(spacing);
            }
        });
    }
}

fn render_chart_card(ui: &mut egui::Ui, theme: &Theme, series: &SeriesState, now: OffsetDateTime) {
    egui::Frame::new()
        .fill(theme.bg_card)
        .inner_margin(egui::Margin::same(theme.spacing.sm as i8))
        .corner_radius(egui::CornerRadius::same(6))
        .stroke(egui::Stroke::new(1.0, theme.border_subtle))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(&series.title)
                        .size(theme.typography.body)
                        .strong()
                        .color(theme.text_primary),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{} points", series.points.len()))
                            .size(theme.typography.caption)
                            .color(theme.text_muted),
                    );
                });
            });

            let color = match series.id {
                StreamId::Sensor(_) => theme.chart_line,
                StreamId::Tags => theme.chart_tags,
            };

            let line_points: PlotPoints = series
                .points
                .iter()
                .map(|&(ts, v)| [hours_ago(now, ts), v])
                .collect();
            let marker_points: PlotPoints = series
                .points
                .iter()
                .map(|&(ts, v)| [hours_ago(now, ts), v])
                .collect();

            let mut plot = Plot::new(series.plot_id())
                .height(CHART_HEIGHT)
                .show_axes(true)
                .show_grid(true)
                .allow_scroll(false)
                .allow_drag([true, false])
                .allow_zoom([true, false])
                .allow_double_click_reset(true)
                .set_margin_fraction(egui::vec2(0.05, 0.1))
                .x_axis_label("Hours ago");
            if series.id == StreamId::Tags {
                plot = plot.y_axis_label("Total readings");
            }

            plot.show(ui, |plot_ui| {
                // A lone reading renders as an unconnected marker
                if series.draws_line() {
                    plot_ui.line(
                        Line::new(series.title.clone(), line_points)
                            .color(color)
                            .width(2.0),
                    );
                }
                plot_ui.points(
                    Points::new(series.title.clone(), marker_points)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(2.5)
                        .filled(true),
                );
            });
        });
}

/// Signed distance from `now` in hours. Readings are in the past, so the
/// x-axis runs negative up to zero.
pub(crate) fn hours_ago(now: OffsetDateTime, ts: OffsetDateTime) -> f64 {
    (ts - now).as_seconds_f64() / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_hours_ago_is_negative_for_past_readings() {
        let now = datetime!(2026-03-02 12:00 UTC);
        let two_hours_back = datetime!(2026-03-02 10:00 UTC);

        let x = hours_ago(now, two_hours_back);

        assert!((x + 2.0).abs() < 1e-9);
        assert!(hours_ago(now, now).abs() < 1e-9);
    }
}
