//! CLI configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ethutil_abi::DebugOptions;

use crate::CliError;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log encoded call data by default
    #[serde(default)]
    pub show_input_data: bool,
    /// Log raw call output by default
    #[serde(default)]
    pub show_raw_output: bool,
    /// Default log filter when neither `RUST_LOG` nor `--log-level` is set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_input_data: false,
            show_raw_output: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ethutil"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from the default location, or return defaults
    pub fn load() -> Self {
        Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = Self::config_path()
            .ok_or_else(|| CliError::Config("Cannot determine config path".to_string()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Debug options with command-line switches layered on top
    pub fn debug_options(&self, show_input_data: bool, show_raw_output: bool) -> DebugOptions {
        DebugOptions {
            show_input_data: show_input_data || self.show_input_data,
            show_raw_output: show_raw_output || self.show_raw_output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.show_input_data);
        assert!(!config.show_raw_output);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: Config = toml::from_str("show_raw_output = true").unwrap();
        assert!(config.show_raw_output);
        assert!(!config.show_input_data);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            show_input_data: true,
            show_raw_output: false,
            log_level: "debug".to_string(),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_config_load_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "show_input_data = \"maybe\"").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load_from(&missing), Err(CliError::ReadFile { .. })));
    }

    #[test]
    fn test_debug_options_flags_override() {
        let config = Config {
            show_input_data: true,
            ..Config::default()
        };
        let options = config.debug_options(false, true);
        assert!(options.show_input_data);
        assert!(options.show_raw_output);

        let options = Config::default().debug_options(false, false);
        assert_eq!(options, DebugOptions::default());
    }
}
