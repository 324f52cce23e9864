//! Toolbar component with navigation, path display, and search

use egui::Ui;

/// Toolbar state persisting between frames
#[derive(Default)]
pub struct ToolbarState {
    /// Current path shown in the bar
    pub path_text: String,
    /// Free-text filter over the current listing
    pub filter_text: String,
}

impl ToolbarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_path(&mut self, path: &str) {
        self.path_text = path.to_string();
    }
}

/// Toolbar actions
#[derive(Debug, Clone)]
pub enum ToolbarAction {
    Back,
    Forward,
    FilterChanged(String),
    OpenAnimationSettings,
    OpenThemeEditor,
}

/// Toolbar component
pub struct Toolbar;

impl Toolbar {
    pub fn ui(
        ui: &mut Ui,
        state: &mut ToolbarState,
        can_go_back: bool,
        can_go_forward: bool,
    ) -> Option<ToolbarAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.add_enabled_ui(can_go_back, |ui| {
                if ui.button("◀").on_hover_text("Back (Alt+←)").clicked() {
                    action = Some(ToolbarAction::Back);
                }
            });

            ui.add_enabled_ui(can_go_forward, |ui| {
                if ui.button("▶").on_hover_text("Forward (Alt+→)").clicked() {
                    action = Some(ToolbarAction::Forward);
                }
            });

            ui.separator();

            ui.label(&state.path_text);

            ui.separator();

            let filter_width = (ui.available_width() - 80.0).clamp(80.0, 320.0);
            let filter_response = ui.add_sized(
                [filter_width, 20.0],
                egui::TextEdit::singleline(&mut state.filter_text)
                    .hint_text("Search current folder..."),
            );
            if filter_response.changed() {
                action = Some(ToolbarAction::FilterChanged(state.filter_text.clone()));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🎨").on_hover_text("Edit theme").clicked() {
                    action = Some(ToolbarAction::OpenThemeEditor);
                }
                if ui.button("✨").on_hover_text("Animation settings").clicked() {
                    action = Some(ToolbarAction::OpenAnimationSettings);
                }
            });
        });

        action
    }
}
