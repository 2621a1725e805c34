//! Reusable UI components for the Farmwatch GUI.

use eframe::egui::{self, Color32, RichText, Ui};

use super::theme::Theme;

/// Render a small spinner with an optional label.
pub fn loading_indicator(ui: &mut Ui, theme: &Theme, label: Option<&str>) {
    ui.horizontal(|ui| {
        ui.add(egui::Spinner::new().size(14.0));
        if let Some(text) = label {
            ui.label(
                RichText::new(text)
                    .size(theme.typography.caption)
                    .color(theme.text_secondary),
            );
        }
    });
}

/// Render a small colored status dot.
pub fn status_dot(ui: &mut Ui, color: Color32, hover_text: &str) {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 4.0, color);
    response.on_hover_text(hover_text.to_string());
}

/// Render an empty state with a title and description.
pub fn empty_state(ui: &mut Ui, theme: &Theme, title: &str, description: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(theme.spacing.lg * 2.0);
        ui.label(
            RichText::new(title)
                .color(theme.text_secondary)
                .size(theme.typography.subheading)
                .strong(),
        );
        ui.add_space(theme.spacing.xs);
        ui.label(
            RichText::new(description)
                .color(theme.text_muted)
                .size(theme.typography.body),
        );
    });
}
