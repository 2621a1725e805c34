//! Analysis report window rendering.

use eframe::egui::{self, RichText};

use crate::gui::app::DashboardApp;

impl DashboardApp {
    /// Render the report window when a completed report exists.
    pub(crate) fn render_report_window(&mut self, ctx: &egui::Context) {
        if !self.report_open {
            return;
        }
        let Some(report) = self.last_report().map(str::to_owned) else {
            self.report_open = false;
            return;
        };

        let mut open = self.report_open;
        egui::Window::new("Weekly Report")
            .open(&mut open)
            .default_size([560.0, 340.0])
            .resizable(true)
            .collapsible(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.label(
                        RichText::new(report)
                            .size(self.theme.typography.body)
                            .color(self.theme.text_primary),
                    );
                });
            });
        self.report_open = open;
    }
}
