//! WMS Settings
//!
//! Grid behaviour that users can tune without touching code:
//! - Notification lifetime
//! - Default page size
//! - Log filter for the command line tool

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod settings_file;

pub use settings_file::*;

/// Notification lifetime used when no settings file says otherwise
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// How long a notification stays visible, in milliseconds
    pub notification_ttl_ms: u64,
    /// Rows per page; `None` shows every visible row on one page
    pub page_size: Option<usize>,
    /// `tracing` env-filter directive used by the command line tool
    pub log_filter: String,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            page_size: None,
            log_filter: "info".to_string(),
        }
    }
}

impl GridSettings {
    /// Load settings from the user config directory, falling back to defaults
    /// when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content).with_context(|| "Failed to parse settings JSON")
    }

    pub fn save(&self) -> Result<()> {
        ensure_config_dir()?;
        self.save_to(&Self::settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        Ok(())
    }

    pub fn settings_path() -> Result<PathBuf> {
        settings_file()
    }

    /// Notification lifetime as a `Duration`
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Page size with zero treated as "no paging"
    pub fn effective_page_size(&self) -> Option<usize> {
        self.page_size.filter(|size| *size > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = GridSettings::default();
        assert_eq!(settings.notification_ttl(), Duration::from_millis(3000));
        assert_eq!(settings.effective_page_size(), None);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings =
            GridSettings::load_from(&dir.path().join("settings.json")).expect("defaults");
        assert_eq!(settings, GridSettings::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.json");

        let settings = GridSettings {
            notification_ttl_ms: 1500,
            page_size: Some(25),
            log_filter: "wms_grid=debug".to_string(),
        };
        settings.save_to(&path).expect("save");

        let loaded = GridSettings::load_from(&path).expect("load");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"page_size": 0}"#).expect("write");

        let loaded = GridSettings::load_from(&path).expect("load");
        assert_eq!(loaded.notification_ttl_ms, DEFAULT_NOTIFICATION_TTL_MS);
        assert_eq!(loaded.page_size, Some(0));
        assert_eq!(loaded.effective_page_size(), None);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").expect("write");

        assert!(GridSettings::load_from(&path).is_err());
    }
}
