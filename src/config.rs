use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_API_URL;
use crate::error::{AppError, Result};
use crate::store::LocalStorage;

const DEFAULT_NOTIFICATION_SECS: u64 = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

fn default_notification_secs() -> u64 {
    DEFAULT_NOTIFICATION_SECS
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_secs: DEFAULT_NOTIFICATION_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("repofav").join("config.toml"))
}

impl Config {
    /// Load the default config file. A missing or invalid file means defaults.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Config::default();
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Config::default()
            }
        }
    }

    /// Load a config file the user named explicitly; failures are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content).map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn api_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn store_dir(&self) -> Option<PathBuf> {
        self.storage.dir.clone().or_else(LocalStorage::default_dir)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.ui.notification_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[api]
base_url = "https://ghe.example.com/api/v3"

[storage]
dir = "/tmp/repofav"

[ui]
notification_secs = 10
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url(), "https://ghe.example.com/api/v3");
        assert_eq!(config.store_dir(), Some(PathBuf::from("/tmp/repofav")));
        assert_eq!(config.notification_duration(), Duration::from_secs(10));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api_url(), "https://api.github.com");
        assert_eq!(config.ui.notification_secs, 4);
    }

    #[test]
    fn partial_section_uses_defaults() {
        let config: Config = toml::from_str("[ui]\n").unwrap();
        assert_eq!(config.ui.notification_secs, 4);
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn load_from_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn load_from_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nnotification_secs = \"soon\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://localhost:8080\"\n").unwrap();
        assert_eq!(
            Config::load_from(&path).unwrap().api_url(),
            "http://localhost:8080"
        );
    }
}
