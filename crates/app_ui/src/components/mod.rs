//! UI Components

pub mod dialogs;
pub mod file_list;
pub mod status_bar;
pub mod toolbar;
pub mod transition;

pub use dialogs::{
    AnimationDialog, ConfirmDialog, Dialog, DialogResult, MessageDialog, NameDialog, ThemeDialog,
};
pub use file_list::{DragPayload, FileList, FileListAction};
pub use status_bar::{StatusBar, StatusInfo};
pub use toolbar::{Toolbar, ToolbarAction, ToolbarState};
pub use transition::{ListTransition, TransitionEvent};
