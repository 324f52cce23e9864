//! Dialog components
//!
//! Every dialog is a centered, non-collapsible window driven through the
//! common [`Dialog`] trait; callers poll `ui()` each frame until it
//! reports a decision.

use crate::theme::Theme;
use app_core::{AnimationConfig, AnimationKind, ANIMATION_DURATIONS};
use egui::{Align2, Context, Window};

/// Result of dialog interaction
pub enum DialogResult<T> {
    /// Still open, nothing decided
    None,
    /// Confirmed with the dialog's output
    Ok(T),
    /// Dismissed
    Cancel,
}

/// Common dialog trait
pub trait Dialog {
    type Output;
    fn ui(&mut self, ctx: &Context) -> DialogResult<Self::Output>;
    fn is_open(&self) -> bool;
    fn close(&mut self);
}

/// Confirmation dialog
pub struct ConfirmDialog {
    pub open: bool,
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub dangerous: bool,
}

impl ConfirmDialog {
    /// Delete confirmation for a named entry.
    pub fn delete(name: &str) -> Self {
        Self {
            open: true,
            title: "Confirm Delete".to_string(),
            message: format!("Are you sure you want to delete '{}'?", name),
            confirm_text: "Delete".to_string(),
            dangerous: true,
        }
    }
}

impl Dialog for ConfirmDialog {
    type Output = bool;

    fn ui(&mut self, ctx: &Context) -> DialogResult<bool> {
        if !self.open {
            return DialogResult::None;
        }

        let mut result = DialogResult::None;

        Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&self.message);
                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    let confirm = if self.dangerous {
                        ui.button(egui::RichText::new(&self.confirm_text).color(egui::Color32::RED))
                    } else {
                        ui.button(&self.confirm_text)
                    };

                    if confirm.clicked() {
                        result = DialogResult::Ok(true);
                        self.open = false;
                    }
                    if ui.button("Cancel").clicked() {
                        result = DialogResult::Cancel;
                        self.open = false;
                    }
                });
            });

        result
    }

    fn is_open(&self) -> bool {
        self.open
    }
    fn close(&mut self) {
        self.open = false;
    }
}

/// Single-line name input dialog (new folder, new file, rename)
pub struct NameDialog {
    pub open: bool,
    pub title: String,
    pub prompt: String,
    pub value: String,
    request_focus: bool,
}

impl NameDialog {
    pub fn new(title: &str, prompt: &str, initial: &str) -> Self {
        Self {
            open: true,
            title: title.to_string(),
            prompt: prompt.to_string(),
            value: initial.to_string(),
            request_focus: true,
        }
    }
}

impl Dialog for NameDialog {
    type Output = String;

    fn ui(&mut self, ctx: &Context) -> DialogResult<String> {
        if !self.open {
            return DialogResult::None;
        }

        let mut result = DialogResult::None;

        Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(&self.prompt);
                    let response = ui.text_edit_singleline(&mut self.value);
                    if self.request_focus {
                        response.request_focus();
                        self.request_focus = false;
                    }

                    if response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        && !self.value.trim().is_empty()
                    {
                        result = DialogResult::Ok(self.value.trim().to_string());
                        self.open = false;
                    }
                });

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() && !self.value.trim().is_empty() {
                        result = DialogResult::Ok(self.value.trim().to_string());
                        self.open = false;
                    }
                    if ui.button("Cancel").clicked() {
                        result = DialogResult::Cancel;
                        self.open = false;
                    }
                });
            });

        result
    }

    fn is_open(&self) -> bool {
        self.open
    }
    fn close(&mut self) {
        self.open = false;
    }
}

/// Modal message dialog, used for operation failures
pub struct MessageDialog {
    pub open: bool,
    pub title: String,
    pub message: String,
}

impl MessageDialog {
    /// Error dialog carrying the raw failure text.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            open: true,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            open: true,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

impl Dialog for MessageDialog {
    type Output = ();

    fn ui(&mut self, ctx: &Context) -> DialogResult<()> {
        if !self.open {
            return DialogResult::None;
        }

        let mut result = DialogResult::None;

        Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&self.message);
                ui.add_space(16.0);

                if ui.button("OK").clicked() {
                    result = DialogResult::Ok(());
                    self.open = false;
                }
            });

        result
    }

    fn is_open(&self) -> bool {
        self.open
    }
    fn close(&mut self) {
        self.open = false;
    }
}

/// Animation settings dialog (duration + kind)
pub struct AnimationDialog {
    pub open: bool,
    working: AnimationConfig,
}

impl AnimationDialog {
    pub fn new(current: &AnimationConfig) -> Self {
        Self {
            open: true,
            working: current.clone(),
        }
    }
}

impl Dialog for AnimationDialog {
    type Output = AnimationConfig;

    fn ui(&mut self, ctx: &Context) -> DialogResult<AnimationConfig> {
        if !self.open {
            return DialogResult::None;
        }

        let mut result = DialogResult::None;

        Window::new("Animation Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("animation_grid")
                    .num_columns(2)
                    .spacing([24.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Animation Duration:");
                        egui::ComboBox::from_id_salt("anim_duration")
                            .selected_text(format!("{} ms", self.working.duration_ms))
                            .show_ui(ui, |ui| {
                                for duration in ANIMATION_DURATIONS {
                                    ui.selectable_value(
                                        &mut self.working.duration_ms,
                                        duration,
                                        format!("{} ms", duration),
                                    );
                                }
                            });
                        ui.end_row();

                        ui.label("Animation Type:");
                        egui::ComboBox::from_id_salt("anim_kind")
                            .selected_text(self.working.kind.label())
                            .show_ui(ui, |ui| {
                                for kind in
                                    [AnimationKind::Fade, AnimationKind::Slide, AnimationKind::None]
                                {
                                    ui.selectable_value(&mut self.working.kind, kind, kind.label());
                                }
                            });
                        ui.end_row();
                    });

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        result = DialogResult::Ok(self.working.clone());
                        self.open = false;
                    }
                    if ui.button("Cancel").clicked() {
                        result = DialogResult::Cancel;
                        self.open = false;
                    }
                });
            });

        result
    }

    fn is_open(&self) -> bool {
        self.open
    }
    fn close(&mut self) {
        self.open = false;
    }
}

/// Theme editor dialog: one color picker per role
pub struct ThemeDialog {
    pub open: bool,
    working: Theme,
}

impl ThemeDialog {
    pub fn new(current: Theme) -> Self {
        Self {
            open: true,
            working: current,
        }
    }
}

impl Dialog for ThemeDialog {
    type Output = Theme;

    fn ui(&mut self, ctx: &Context) -> DialogResult<Theme> {
        if !self.open {
            return DialogResult::None;
        }

        let mut result = DialogResult::None;

        Window::new("Edit Theme")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("theme_grid")
                    .num_columns(2)
                    .spacing([24.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Background:");
                        ui.color_edit_button_srgba(&mut self.working.background);
                        ui.end_row();

                        ui.label("Text:");
                        ui.color_edit_button_srgba(&mut self.working.text);
                        ui.end_row();

                        ui.label("Selected Bg:");
                        ui.color_edit_button_srgba(&mut self.working.selected_bg);
                        ui.end_row();

                        ui.label("Hover Bg:");
                        ui.color_edit_button_srgba(&mut self.working.hover_bg);
                        ui.end_row();

                        ui.label("Tooltip Bg:");
                        ui.color_edit_button_srgba(&mut self.working.tooltip_bg);
                        ui.end_row();
                    });

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        result = DialogResult::Ok(self.working.clone());
                        self.open = false;
                    }
                    if ui.button("Cancel").clicked() {
                        result = DialogResult::Cancel;
                        self.open = false;
                    }
                });
            });

        result
    }

    fn is_open(&self) -> bool {
        self.open
    }
    fn close(&mut self) {
        self.open = false;
    }
}
