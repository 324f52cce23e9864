//! Status bar component

use egui::Ui;

/// Status bar information
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    /// "N items" for the current listing
    pub item_count: String,

    /// Name of the selected entry
    pub selected: String,

    /// Transient message shown on the right
    pub message: String,
}

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    pub fn ui(ui: &mut Ui, info: &StatusInfo) {
        ui.horizontal(|ui| {
            ui.label(&info.item_count);

            if !info.selected.is_empty() {
                ui.separator();
                ui.label(&info.selected);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !info.message.is_empty() {
                    ui.label(&info.message);
                }
            });
        });
    }
}
