//! Application settings and paths.
//!
//! Settings are optional: without a settings file every value falls back
//! to its default.

use crate::client::{
    FetchOptions, DEFAULT_ENDPOINT, DEFAULT_MAX_RESULTS, DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE,
};
use crate::error::{ConfigError, ConfigResult};
use crate::output::{DEFAULT_COLUMN_WIDTH, DEFAULT_PREVIEW_ROWS};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Narrowest column the preview table can render.
const MIN_COLUMN_WIDTH: usize = 4;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/leakseek)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve the platform directories.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "leakseek", "leakseek")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Search endpoint URL.
    pub api_endpoint: String,
    /// Entries requested per page.
    pub page_size: u32,
    /// Stop paginating once this many entries are held.
    pub max_results: usize,
    /// Pause between page requests in milliseconds.
    pub page_delay_ms: u64,
    /// Per-request timeout in seconds; unset leaves the HTTP client default.
    pub request_timeout_secs: Option<u64>,
    /// Entries shown in the preview table.
    pub preview_rows: usize,
    /// Maximum width of a preview table cell.
    pub column_width: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_results: DEFAULT_MAX_RESULTS,
            page_delay_ms: DEFAULT_PAGE_DELAY.as_millis() as u64,
            request_timeout_secs: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, or defaults if there is no file.
    pub fn load() -> ConfigResult<Self> {
        let file = match Paths::new() {
            Ok(paths) => paths.settings_file(),
            Err(e) => {
                debug!(error = %e, "no configuration directory, using default settings");
                return Ok(Self::default());
            }
        };

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the fetch loop or the table cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "page_size must be greater than 0".to_string(),
            ));
        }

        if self.column_width < MIN_COLUMN_WIDTH {
            return Err(ConfigError::InvalidValue(format!(
                "column_width must be at least {}",
                MIN_COLUMN_WIDTH
            )));
        }

        if self.api_endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "api_endpoint cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Pause between page requests.
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Per-request timeout, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Fetch options seeded from these settings.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::new()
            .with_page_size(self.page_size)
            .with_max_results(self.max_results)
            .with_page_delay(self.page_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.page_size, 100);
        assert_eq!(settings.max_results, 10_000);
        assert_eq!(settings.page_delay(), Duration::from_millis(500));
        assert_eq!(settings.request_timeout(), None);
        assert_eq!(settings.preview_rows, 50);
        assert_eq!(settings.column_width, 30);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"page_size": 500, "request_timeout_secs": 20}"#).unwrap();

        let settings = AppSettings::load_from(&path).unwrap();

        assert_eq!(settings.page_size, 500);
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(20)));
        assert_eq!(settings.max_results, 10_000);
        assert_eq!(settings.api_endpoint, DEFAULT_ENDPOINT);

        let options = settings.fetch_options();
        assert_eq!(options.page_size, 500);
        assert_eq!(options.page_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"page_size": 0}"#).unwrap();

        assert!(matches!(
            AppSettings::load_from(&path),
            Err(ConfigError::InvalidValue(_))
        ));

        let narrow = AppSettings {
            column_width: 2,
            ..AppSettings::default()
        };
        assert!(narrow.validate().is_err());
    }

    #[test]
    fn test_malformed_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        assert!(matches!(
            AppSettings::load_from(&path),
            Err(ConfigError::ReadFailed { .. })
        ));

        fs::write(&path, "page_size = 10").unwrap();
        assert!(matches!(
            AppSettings::load_from(&path),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_settings_serialization() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
