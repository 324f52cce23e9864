//! File list component
//!
//! Renders scan results as selectable rows with icons and size tags,
//! and hosts the context menu plus drag-and-drop move support.

use app_fs::Entry;
use egui::{Id, Sense, Ui};
use std::path::{Path, PathBuf};

/// Payload attached to a row while it is being dragged.
#[derive(Debug, Clone)]
pub struct DragPayload {
    pub path: PathBuf,
}

/// Actions the file list reports back to its owner.
#[derive(Debug, Clone)]
pub enum FileListAction {
    Select(usize),
    Open(usize),
    NewFolder,
    NewFile,
    Rename(usize),
    Delete(usize),
    Copy(usize),
    Paste,
    /// A dragged entry was released. `target_row` is the folder row under
    /// the pointer, or `None` for the list background (current folder).
    Drop {
        source: PathBuf,
        target_row: Option<usize>,
    },
}

/// File list component
#[derive(Default)]
pub struct FileList {
    pub selected: Option<usize>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the list. `clipboard_occupied` gates the paste menu entry.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        entries: &[Entry],
        clipboard_occupied: bool,
    ) -> Option<FileListAction> {
        let mut action = None;

        let frame = egui::Frame::default();
        let (_, dropped) = ui.dnd_drop_zone::<DragPayload, ()>(frame, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (idx, entry) in entries.iter().enumerate() {
                        let response = self.row(ui, idx, entry);

                        // Folder rows double as drop targets.
                        if entry.is_folder {
                            if let Some(payload) =
                                response.dnd_release_payload::<DragPayload>()
                            {
                                action = Some(FileListAction::Drop {
                                    source: payload.path.clone(),
                                    target_row: Some(idx),
                                });
                            }
                        }

                        if response.double_clicked() {
                            action = Some(FileListAction::Open(idx));
                        } else if response.clicked() {
                            self.selected = Some(idx);
                            action = Some(FileListAction::Select(idx));
                        }

                        response.context_menu(|ui| {
                            if let Some(a) =
                                Self::row_context_menu(ui, idx, clipboard_occupied)
                            {
                                action = Some(a);
                            }
                        });
                    }

                    // Empty space below the rows still takes a context menu.
                    let leftover = ui.available_rect_before_wrap();
                    if leftover.height() > 0.0 {
                        let background =
                            ui.allocate_rect(leftover, Sense::click());
                        background.context_menu(|ui| {
                            if let Some(a) =
                                Self::background_context_menu(ui, clipboard_occupied)
                            {
                                action = Some(a);
                            }
                        });
                    }
                });
        });

        // A release anywhere else in the zone targets the current folder.
        if let Some(payload) = dropped {
            if !matches!(action, Some(FileListAction::Drop { .. })) {
                action = Some(FileListAction::Drop {
                    source: payload.path.clone(),
                    target_row: None,
                });
            }
        }

        action
    }

    fn row(&self, ui: &mut Ui, idx: usize, entry: &Entry) -> egui::Response {
        let is_selected = self.selected == Some(idx);
        let icon = if entry.is_folder { "📁" } else { "📄" };
        let label = if entry.size_text.is_empty() {
            format!("{} {}", icon, entry.name)
        } else {
            format!("{} {} ({})", icon, entry.name, entry.size_text)
        };

        let id = Id::new("file_row").with(idx).with(&entry.name);
        let payload = DragPayload {
            path: entry.path.clone(),
        };

        let response = ui
            .dnd_drag_source(id, payload, |ui| {
                ui.add_sized(
                    [ui.available_width(), 22.0],
                    egui::SelectableLabel::new(is_selected, label),
                )
            })
            .inner;

        if entry.is_folder {
            let path = entry.path.clone();
            response.on_hover_ui(|ui| {
                match folder_preview(&path) {
                    Some(preview) if !preview.is_empty() => {
                        ui.label(preview);
                    }
                    _ => {}
                }
            })
        } else {
            response
        }
    }

    fn row_context_menu(
        ui: &mut Ui,
        idx: usize,
        clipboard_occupied: bool,
    ) -> Option<FileListAction> {
        let mut action = None;

        if ui.button("New Folder").clicked() {
            action = Some(FileListAction::NewFolder);
            ui.close_menu();
        }
        if ui.button("New File").clicked() {
            action = Some(FileListAction::NewFile);
            ui.close_menu();
        }

        ui.separator();

        if ui.button("Open").clicked() {
            action = Some(FileListAction::Open(idx));
            ui.close_menu();
        }
        if ui.button("Rename").clicked() {
            action = Some(FileListAction::Rename(idx));
            ui.close_menu();
        }
        if ui.button("Delete").clicked() {
            action = Some(FileListAction::Delete(idx));
            ui.close_menu();
        }
        if ui.button("Copy").clicked() {
            action = Some(FileListAction::Copy(idx));
            ui.close_menu();
        }

        if clipboard_occupied && ui.button("Paste").clicked() {
            action = Some(FileListAction::Paste);
            ui.close_menu();
        }

        action
    }

    fn background_context_menu(ui: &mut Ui, clipboard_occupied: bool) -> Option<FileListAction> {
        let mut action = None;

        if ui.button("New Folder").clicked() {
            action = Some(FileListAction::NewFolder);
            ui.close_menu();
        }
        if ui.button("New File").clicked() {
            action = Some(FileListAction::NewFile);
            ui.close_menu();
        }
        if clipboard_occupied && ui.button("Paste").clicked() {
            action = Some(FileListAction::Paste);
            ui.close_menu();
        }

        action
    }
}

/// Preview of a folder's first few visible children, for the hover
/// tooltip. `None` when the folder cannot be read.
fn folder_preview(path: &Path) -> Option<String> {
    let mut names: Vec<String> = std::fs::read_dir(path)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|n| !n.starts_with('.'))
        .collect();
    names.sort_by_key(|n| n.to_lowercase());

    let mut preview = names.iter().take(5).cloned().collect::<Vec<_>>().join(", ");
    if names.len() > 5 {
        preview.push_str(", ...");
    }
    Some(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_preview_truncates() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c", "d", "e", "f", ".hidden"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let preview = folder_preview(dir.path()).unwrap();
        assert_eq!(preview, "a, b, c, d, e, ...");
    }

    #[test]
    fn test_folder_preview_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(folder_preview(&dir.path().join("missing")), None);
    }
}
