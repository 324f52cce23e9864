//! BreezeFiler - a modern file explorer
//!
//! Main entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use anyhow::Result;

fn main() -> Result<()> {
    // Logging and the panic hook come up before anything can fail
    app_log::init()?;

    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("BreezeFiler starting...");

    // Settings are loaded once here and owned by the application;
    // load failures fall back to defaults silently.
    let settings = app_core::Settings::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings: {}", e);
        app_core::Settings::default()
    });

    app::run(settings)
}
