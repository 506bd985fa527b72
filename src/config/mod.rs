//! Persisted UI preferences.
//!
//! One small YAML file: `~/.proxyscope/config.yaml`. The theme toggle
//! is the only thing that survives a restart — view state (filters,
//! sort, page) is deliberately ephemeral.
//!
//! Loading never fails hard: a missing or unreadable file yields
//! defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Color scheme selection, toggled from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

/// Persisted preferences (user-level file).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeMode,
}

/// Path to `~/.proxyscope/`.
fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".proxyscope"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".proxyscope"))
    }
}

fn config_path() -> Option<PathBuf> {
    dirs_path().map(|p| p.join("config.yaml"))
}

impl UiConfig {
    /// Load from disk, falling back to defaults on any failure.
    pub fn load() -> Self {
        config_path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    fn load_from(path: &std::path::Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_yaml::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Best-effort save; the UI keeps working if the disk write fails.
    pub fn save(&self) {
        let Some(path) = config_path() else { return };
        if let Err(e) = self.save_to(&path) {
            tracing::warn!("failed to persist config: {e}");
        }
    }

    fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_yaml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, raw)
    }
}
