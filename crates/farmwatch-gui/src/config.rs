//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the farm monitoring service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// How often the dashboard refreshes readings, in seconds
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Directory PDF exports are written to. Empty means the platform
    /// downloads directory.
    #[serde(default)]
    pub export_directory: String,

    /// GUI-specific settings
    #[serde(default)]
    pub gui: GuiConfig,
}

/// GUI-specific configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuiConfig {
    /// Theme preference: "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            refresh_interval_secs: default_refresh_interval(),
            export_directory: String::new(),
            gui: GuiConfig::default(),
        }
    }
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Config {
    /// Get the path to the config file.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("farmwatch")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.refresh_interval_secs, 60);
        assert!(config.export_directory.is_empty());
        assert_eq!(config.gui.theme, "dark");
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config.api_url, default_api_url());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            api_url: "http://farm.example.com:9000".to_string(),
            refresh_interval_secs: 30,
            export_directory: "/tmp/exports".to_string(),
            gui: GuiConfig {
                theme: "light".to_string(),
            },
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.api_url, "http://farm.example.com:9000");
        assert_eq!(loaded.refresh_interval_secs, 30);
        assert_eq!(loaded.export_directory, "/tmp/exports");
        assert_eq!(loaded.gui.theme, "light");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"http://other:8000\"\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.api_url, "http://other:8000");
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.gui.theme, "dark");
    }
}
