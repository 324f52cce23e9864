//! Application main loop
//!
//! Composes the toolbar, file list, status bar and dialogs around the
//! navigation/scan/transition machinery, and drives egui over wgpu inside
//! a winit event loop.

use anyhow::Result;
use app_core::{AnimationConfig, AppError, History, Scanner, Settings};
use app_fs::{
    create_file, create_folder, delete_entry, filter_by_name, move_entry, open_external,
    paste_entry, rename_entry, Entry,
};
use app_ui::{
    components::{
        AnimationDialog, ConfirmDialog, Dialog, DialogResult, FileList, FileListAction,
        ListTransition, MessageDialog, NameDialog, StatusBar, StatusInfo, ThemeDialog, Toolbar,
        ToolbarAction, ToolbarState, TransitionEvent,
    },
    Renderer, Theme,
};
use egui_wgpu::ScreenDescriptor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Main application state for the event loop
struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    egui_ctx: egui::Context,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,

    // Session state
    settings: Settings,
    theme: Theme,
    history: History,
    scanner: Scanner,
    transition: ListTransition,

    // Listing state
    current_path: PathBuf,
    /// Most recent full scan result
    entries: Vec<Entry>,
    /// What is actually rendered: `entries` restricted by the filter text
    visible: Vec<Entry>,
    /// Entries waiting for the transition's swap point
    pending_entries: Option<Vec<Entry>>,
    /// Whether the in-flight scan applies through the transition
    animate_next_apply: bool,

    // Interaction state
    clipboard: Option<PathBuf>,
    dialog: Option<ActiveDialog>,
    toolbar: ToolbarState,
    file_list: FileList,
    status: StatusInfo,
}

/// The single modal dialog that can be open at a time
enum ActiveDialog {
    ConfirmDelete { dialog: ConfirmDialog, path: PathBuf },
    NewFolder(NameDialog),
    NewFile(NameDialog),
    Rename { dialog: NameDialog, path: PathBuf },
    Message(MessageDialog),
    Animation(AnimationDialog),
    ThemeEdit(ThemeDialog),
}

/// Decision reported by the open dialog
enum DialogEvent {
    Dismissed,
    DeleteConfirmed(PathBuf),
    FolderNamed(String),
    FileNamed(String),
    Renamed { path: PathBuf, new_name: String },
    AnimationChosen(AnimationConfig),
    ThemeChosen(Theme),
}

impl ActiveDialog {
    fn ui(&mut self, ctx: &egui::Context) -> Option<DialogEvent> {
        match self {
            ActiveDialog::ConfirmDelete { dialog, path } => match dialog.ui(ctx) {
                DialogResult::Ok(true) => Some(DialogEvent::DeleteConfirmed(path.clone())),
                DialogResult::Ok(false) | DialogResult::Cancel => Some(DialogEvent::Dismissed),
                DialogResult::None => None,
            },
            ActiveDialog::NewFolder(dialog) => match dialog.ui(ctx) {
                DialogResult::Ok(name) => Some(DialogEvent::FolderNamed(name)),
                DialogResult::Cancel => Some(DialogEvent::Dismissed),
                DialogResult::None => None,
            },
            ActiveDialog::NewFile(dialog) => match dialog.ui(ctx) {
                DialogResult::Ok(name) => Some(DialogEvent::FileNamed(name)),
                DialogResult::Cancel => Some(DialogEvent::Dismissed),
                DialogResult::None => None,
            },
            ActiveDialog::Rename { dialog, path } => match dialog.ui(ctx) {
                DialogResult::Ok(new_name) => Some(DialogEvent::Renamed {
                    path: path.clone(),
                    new_name,
                }),
                DialogResult::Cancel => Some(DialogEvent::Dismissed),
                DialogResult::None => None,
            },
            ActiveDialog::Message(dialog) => match dialog.ui(ctx) {
                DialogResult::Ok(()) | DialogResult::Cancel => Some(DialogEvent::Dismissed),
                DialogResult::None => None,
            },
            ActiveDialog::Animation(dialog) => match dialog.ui(ctx) {
                DialogResult::Ok(config) => Some(DialogEvent::AnimationChosen(config)),
                DialogResult::Cancel => Some(DialogEvent::Dismissed),
                DialogResult::None => None,
            },
            ActiveDialog::ThemeEdit(dialog) => match dialog.ui(ctx) {
                DialogResult::Ok(theme) => Some(DialogEvent::ThemeChosen(theme)),
                DialogResult::Cancel => Some(DialogEvent::Dismissed),
                DialogResult::None => None,
            },
        }
    }
}

impl App {
    fn new(settings: Settings) -> Self {
        let theme = Theme::from_colors(&settings.theme);

        let mut transition = ListTransition::new();
        transition.configure(settings.animation.kind, settings.animation.duration_ms);

        let start_path = if settings.last_path.is_dir() {
            settings.last_path.clone()
        } else {
            dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."))
        };

        let mut app = Self {
            window: None,
            renderer: None,
            egui_ctx: egui::Context::default(),
            egui_state: None,
            egui_renderer: None,

            settings,
            theme,
            history: History::new(),
            scanner: Scanner::new(),
            transition,

            current_path: start_path.clone(),
            entries: Vec::new(),
            visible: Vec::new(),
            pending_entries: None,
            animate_next_apply: false,

            clipboard: None,
            dialog: None,
            toolbar: ToolbarState::new(),
            file_list: FileList::new(),
            status: StatusInfo::default(),
        };

        // Initial listing: recorded in history, not animated
        app.navigate_to(start_path, true, false);
        app
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("BreezeFiler - Modern File Explorer")
            .with_inner_size(winit::dpi::LogicalSize::new(1000, 650));

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = pollster::block_on(Renderer::new(window.clone()))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&renderer.device, renderer.config.format, None, 1, false);

        self.theme.apply(&self.egui_ctx);

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);

        Ok(())
    }

    // ========================================
    // Navigation
    // ========================================

    /// Switch the list to `path`.
    ///
    /// `record` pushes the path onto the history (user-initiated
    /// navigation); refreshes after file operations pass `false`.
    /// `animate` routes the incoming scan result through the transition.
    fn navigate_to(&mut self, path: PathBuf, record: bool, animate: bool) {
        tracing::info!("Navigating to {}", path.display());

        self.current_path = path.clone();
        self.toolbar.set_path(&path.display().to_string());

        if record {
            self.history.push(path.clone());
        }

        self.animate_next_apply = animate;
        self.scanner.dispatch(path);

        self.settings.last_path = self.current_path.clone();
        self.save_settings();
    }

    /// Re-scan the current path without touching history.
    fn refresh(&mut self, animate: bool) {
        self.navigate_to(self.current_path.clone(), false, animate);
    }

    fn go_back(&mut self) {
        if let Some(path) = self.history.back().map(Path::to_path_buf) {
            self.navigate_to(path, false, false);
        }
    }

    fn go_forward(&mut self) {
        if let Some(path) = self.history.forward().map(Path::to_path_buf) {
            self.navigate_to(path, false, false);
        }
    }

    // ========================================
    // Scan results & transitions
    // ========================================

    /// Per-frame bookkeeping: collect finished scans and advance the
    /// transition state machine.
    fn update(&mut self, now: Instant) {
        if let Some(result) = self.scanner.poll() {
            tracing::info!(
                "Loaded {} items in {:.1} ms",
                result.entries.len(),
                result.elapsed_ms
            );

            if self.animate_next_apply && self.transition.begin(now) {
                self.pending_entries = Some(result.entries);
            } else {
                self.pending_entries = None;
                self.apply_entries(result.entries);
            }
        }

        if let Some(TransitionEvent::Swap) = self.transition.tick(now) {
            if let Some(entries) = self.pending_entries.take() {
                self.apply_entries(entries);
            }
        }
    }

    fn apply_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.file_list.selected = None;
        self.status.selected.clear();
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible = filter_by_name(&self.entries, &self.toolbar.filter_text);
        self.status.item_count = format!("{} items", self.visible.len());
    }

    // ========================================
    // Actions
    // ========================================

    fn handle_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Back => self.go_back(),
            ToolbarAction::Forward => self.go_forward(),
            ToolbarAction::FilterChanged(_) => self.refresh_visible(),
            ToolbarAction::OpenAnimationSettings => {
                self.dialog = Some(ActiveDialog::Animation(AnimationDialog::new(
                    &self.settings.animation,
                )));
            }
            ToolbarAction::OpenThemeEditor => {
                self.dialog = Some(ActiveDialog::ThemeEdit(ThemeDialog::new(self.theme.clone())));
            }
        }
    }

    fn handle_list_action(&mut self, action: FileListAction) {
        match action {
            FileListAction::Select(idx) => {
                self.status.selected = self
                    .visible
                    .get(idx)
                    .map(|e| e.name.clone())
                    .unwrap_or_default();
            }
            FileListAction::Open(idx) => self.open_entry(idx),
            FileListAction::NewFolder => {
                self.dialog = Some(ActiveDialog::NewFolder(NameDialog::new(
                    "New Folder",
                    "Folder name:",
                    "",
                )));
            }
            FileListAction::NewFile => {
                self.dialog = Some(ActiveDialog::NewFile(NameDialog::new(
                    "New File",
                    "File name:",
                    "",
                )));
            }
            FileListAction::Rename(idx) => {
                if let Some(entry) = self.visible.get(idx) {
                    self.dialog = Some(ActiveDialog::Rename {
                        dialog: NameDialog::new("Rename", "New name:", &entry.name),
                        path: entry.path.clone(),
                    });
                }
            }
            FileListAction::Delete(idx) => {
                if let Some(entry) = self.visible.get(idx) {
                    self.dialog = Some(ActiveDialog::ConfirmDelete {
                        dialog: ConfirmDialog::delete(&entry.name),
                        path: entry.path.clone(),
                    });
                }
            }
            FileListAction::Copy(idx) => {
                if let Some(entry) = self.visible.get(idx) {
                    self.clipboard = Some(entry.path.clone());
                    self.status.message = format!("Copied '{}'", entry.name);
                }
            }
            FileListAction::Paste => self.paste(),
            FileListAction::Drop { source, target_row } => self.handle_drop(source, target_row),
        }
    }

    fn open_entry(&mut self, idx: usize) {
        let Some(entry) = self.visible.get(idx).cloned() else {
            return;
        };

        if entry.is_folder {
            self.navigate_to(entry.path, true, true);
        } else if let Err(e) = open_external(&entry.path) {
            self.show_error(e.into());
        }
    }

    fn paste(&mut self) {
        let source = self.clipboard.clone();
        match source {
            Some(src) if src.exists() => match paste_entry(&src, &self.current_path) {
                Ok(_) => self.refresh(false),
                Err(e) => self.show_error(e.into()),
            },
            _ => {
                self.dialog = Some(ActiveDialog::Message(MessageDialog::info(
                    "Paste",
                    "Nothing to paste or source no longer exists.",
                )));
            }
        }
    }

    fn handle_drop(&mut self, source: PathBuf, target_row: Option<usize>) {
        let target_dir = target_row
            .and_then(|idx| self.visible.get(idx))
            .filter(|e| e.is_folder)
            .map(|e| e.path.clone())
            .unwrap_or_else(|| self.current_path.clone());

        // A folder released on its own row would be moved into itself.
        if target_dir != source {
            match move_entry(&source, &target_dir) {
                Ok(Some(dest)) => {
                    tracing::info!("Dropped {} -> {}", source.display(), dest.display())
                }
                Ok(None) => {} // same location, nothing to do
                Err(e) => self.show_error(e.into()),
            }
        }

        // Drop refreshes take the animated path
        self.refresh(true);
    }

    fn handle_dialog_event(&mut self, event: DialogEvent) {
        match event {
            DialogEvent::Dismissed => {}
            DialogEvent::DeleteConfirmed(path) => match delete_entry(&path) {
                Ok(()) => self.refresh(false),
                Err(e) => self.show_error(e.into()),
            },
            DialogEvent::FolderNamed(name) => match create_folder(&self.current_path, &name) {
                Ok(_) => self.refresh(false),
                Err(e) => self.show_error(e.into()),
            },
            DialogEvent::FileNamed(name) => match create_file(&self.current_path, &name) {
                Ok(_) => self.refresh(false),
                Err(e) => self.show_error(e.into()),
            },
            DialogEvent::Renamed { path, new_name } => match rename_entry(&path, &new_name) {
                Ok(_) => self.refresh(false),
                Err(e) => self.show_error(e.into()),
            },
            DialogEvent::AnimationChosen(config) => {
                self.transition.configure(config.kind, config.duration_ms);
                self.settings.animation = config;
                self.save_settings();
            }
            DialogEvent::ThemeChosen(theme) => {
                theme.apply(&self.egui_ctx);
                self.settings.theme = theme.to_colors();
                self.theme = theme;
                self.save_settings();
            }
        }
    }

    fn show_error(&mut self, error: AppError) {
        let message = error.user_message();
        tracing::warn!("Operation failed: {}", message);
        self.dialog = Some(ActiveDialog::Message(MessageDialog::error(message)));
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    // ========================================
    // Rendering
    // ========================================

    fn render(&mut self) {
        let now = Instant::now();
        self.update(now);

        let window = match &self.window {
            Some(w) => w.clone(),
            None => return,
        };

        let raw_input = match &mut self.egui_state {
            Some(egui_state) => egui_state.take_egui_input(&window),
            None => return,
        };

        // Snapshot what the egui closure needs so it only captures locals
        let visible = self.visible.clone();
        let can_go_back = self.history.can_go_back();
        let can_go_forward = self.history.can_go_forward();
        let clipboard_occupied = self.clipboard.is_some();
        let status = self.status.clone();
        let opacity = self.transition.opacity(now);
        let offset = self.transition.offset(now);

        let mut toolbar = std::mem::take(&mut self.toolbar);
        let mut file_list = std::mem::take(&mut self.file_list);
        let mut dialog = self.dialog.take();

        let mut toolbar_action = None;
        let mut list_action = None;
        let mut dialog_event = None;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
                if let Some(action) = Toolbar::ui(ui, &mut toolbar, can_go_back, can_go_forward) {
                    toolbar_action = Some(action);
                }
            });

            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                StatusBar::ui(ui, &status);
            });

            egui::CentralPanel::default().show(ctx, |ui| {
                // The whole list shifts and fades as one during transitions
                let rect = ui
                    .available_rect_before_wrap()
                    .translate(egui::vec2(offset, 0.0));
                let mut list_ui =
                    ui.new_child(egui::UiBuilder::new().max_rect(rect).layout(*ui.layout()));
                list_ui.set_opacity(opacity);

                if let Some(action) = file_list.ui(&mut list_ui, &visible, clipboard_occupied) {
                    list_action = Some(action);
                }
            });

            if let Some(active) = &mut dialog {
                dialog_event = active.ui(ctx);
            }

            if dialog.is_none() {
                if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft)) {
                    toolbar_action = Some(ToolbarAction::Back);
                }
                if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowRight)) {
                    toolbar_action = Some(ToolbarAction::Forward);
                }
            }
        });

        self.toolbar = toolbar;
        self.file_list = file_list;

        if let Some(event) = dialog_event {
            self.handle_dialog_event(event);
        } else {
            self.dialog = dialog;
        }

        if let Some(action) = toolbar_action {
            self.handle_toolbar_action(action);
        }
        if let Some(action) = list_action {
            self.handle_list_action(action);
        }

        if let Some(egui_state) = &mut self.egui_state {
            egui_state.handle_platform_output(&window, full_output.platform_output);
        }

        let clipped_primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let clear_color = {
            let bg = self.theme.background;
            wgpu::Color {
                r: bg.r() as f64 / 255.0,
                g: bg.g() as f64 / 255.0,
                b: bg.b() as f64 / 255.0,
                a: 1.0,
            }
        };

        let renderer = match &self.renderer {
            Some(r) => r,
            None => return,
        };
        let egui_renderer = match &mut self.egui_renderer {
            Some(r) => r,
            None => return,
        };

        let output = match renderer.acquire_frame() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [renderer.config.width, renderer.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        let mut encoder = renderer
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });

        for (id, delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&renderer.device, &renderer.queue, *id, delta);
        }

        egui_renderer.update_buffers(
            &renderer.device,
            &renderer.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // SAFETY: egui-wgpu wants a 'static render pass. The pass is
            // dropped before encoder.finish(), so the borrow stays valid
            // for the transmuted lifetime.
            let render_pass_static: &mut wgpu::RenderPass<'static> =
                unsafe { std::mem::transmute(&mut render_pass) };

            egui_renderer.render(render_pass_static, &clipped_primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        renderer.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to initialize window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see the event first
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the application
pub fn run(settings: Settings) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    Ok(())
}
