//! BreezeFiler filesystem boundary
//!
//! Everything that touches the OS filesystem lives here:
//! - Directory scanning and name filtering
//! - File operations (create, rename, delete, paste, move, open)

mod ops;
mod scanner;

pub use ops::{
    create_file, create_folder, delete_entry, move_entry, open_external, paste_entry,
    rename_entry, unique_destination,
};
pub use scanner::{filter_by_name, human_size, scan_directory, Entry};

use std::path::PathBuf;
use thiserror::Error;

/// File system errors
///
/// The display text of every variant is shown to the user verbatim,
/// so each message has to stand on its own.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Could not open: {0}")]
    OpenFailed(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
