//! Session settings
//!
//! Loaded once at startup, owned by the application, and rewritten after
//! every successful navigation and every accepted settings dialog.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The five color roles a theme must define. A persisted theme missing
/// any of them is rejected wholesale at load time.
pub const THEME_ROLES: [&str; 5] = ["background", "text", "selected_bg", "hover_bg", "tooltip_bg"];

/// The selectable animation durations, in milliseconds.
pub const ANIMATION_DURATIONS: [u64; 4] = [100, 200, 400, 800];

/// Session settings persisted across runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_path: PathBuf,
    pub animation: AnimationConfig,
    /// Color role -> hex color, validated against [`THEME_ROLES`].
    pub theme: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_path: dirs_next::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            animation: AnimationConfig::default(),
            theme: default_theme(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub kind: AnimationKind,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 200,
            kind: AnimationKind::Fade,
        }
    }
}

/// Visual effect used when the list content is swapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationKind {
    #[serde(rename = "fade")]
    Fade,
    #[serde(rename = "slide")]
    Slide,
    #[serde(rename = "none")]
    None,
}

impl AnimationKind {
    pub fn label(&self) -> &'static str {
        match self {
            AnimationKind::Fade => "Fade",
            AnimationKind::Slide => "Slide",
            AnimationKind::None => "None",
        }
    }
}

/// The default (dark) color table.
pub fn default_theme() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("background".to_string(), "#1e1e1e".to_string()),
        ("text".to_string(), "#dddddd".to_string()),
        ("selected_bg".to_string(), "#007acc".to_string()),
        ("hover_bg".to_string(), "#094771".to_string()),
        ("tooltip_bg".to_string(), "#333333".to_string()),
    ])
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing file yields defaults; a malformed file is an error the
    /// caller is expected to log and replace with defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!("No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut settings: Self = toml::from_str(&content)?;
        settings.validate();
        tracing::info!("Settings loaded from {:?}", path);
        Ok(settings)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save settings to an explicit path.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Settings saved to {:?}", path);
        Ok(())
    }

    /// The settings file path.
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "BreezeFiler", "BreezeFiler")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("./settings.toml"))
    }

    /// Replace invalid loaded values with defaults.
    ///
    /// The theme table is all-or-nothing: one missing role rejects the
    /// whole table. A duration outside the fixed set falls back to the
    /// default.
    fn validate(&mut self) {
        let complete = THEME_ROLES.iter().all(|role| self.theme.contains_key(*role));
        if !complete {
            tracing::warn!("Theme is missing color roles, using default theme");
            self.theme = default_theme();
        }

        if !ANIMATION_DURATIONS.contains(&self.animation.duration_ms) {
            tracing::warn!(
                "Unknown animation duration {} ms, using default",
                self.animation.duration_ms
            );
            self.animation.duration_ms = AnimationConfig::default().duration_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.last_path = PathBuf::from("/somewhere");
        settings.animation.duration_ms = 400;
        settings.animation.kind = AnimationKind::Slide;
        settings
            .theme
            .insert("background".to_string(), "#101010".to_string());
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.last_path, PathBuf::from("/somewhere"));
        assert_eq!(loaded.animation.duration_ms, 400);
        assert_eq!(loaded.animation.kind, AnimationKind::Slide);
        assert_eq!(loaded.theme, settings.theme);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.theme, default_theme());
        assert_eq!(loaded.animation.duration_ms, 200);
    }

    #[test]
    fn test_incomplete_theme_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.theme.remove("hover_bg");
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.theme, default_theme());
    }

    #[test]
    fn test_unknown_duration_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.animation.duration_ms = 123;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.animation.duration_ms, 200);
    }
}
