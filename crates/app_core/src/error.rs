//! Application error types

use thiserror::Error;

/// Main application error type
///
/// None of these are fatal: every failure collapses at the UI boundary to
/// "show a message, keep the session running".
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fs(#[from] app_fs::FsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// The message shown in the error dialog. The underlying OS error
    /// text is passed through untouched.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
