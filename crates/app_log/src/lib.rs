//! BreezeFiler logging & observability
//!
//! Structured logging, panic handling and crash dumps.

mod logging;
mod panic_hook;

pub use logging::{cleanup_old_logs, init_logging};
pub use panic_hook::init_panic_hook;

use directories::ProjectDirs;
use std::path::PathBuf;

/// Directory that receives rolling log files.
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "BreezeFiler", "BreezeFiler")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialize logging and the panic hook.
pub fn init() -> anyhow::Result<()> {
    init_logging()?;
    init_panic_hook();
    Ok(())
}
