//! Configuration module for scatch
//!
//! Manages the API endpoint and key, gallery tuning, and storage paths.
//! Configuration is stored in the user's config directory as TOML and can be
//! overridden with `SCATCH_*` environment variables (nested keys use a
//! double underscore, e.g. `SCATCH_UI__CARD_HEIGHT`).

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keys accepted by [`ScatchConfig::get`] and [`ScatchConfig::set`]
pub const KEYS: &[&str] = &[
    "api_endpoint",
    "api_key",
    "quiet",
    "timeout_secs",
    "scroll_threshold",
    "min_column_width",
    "ui.min_column_width",
    "ui.scroll_threshold",
    "ui.card_height",
    "library_path",
    "history_path",
];

/// Terminal gallery tuning, in terminal cells
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Minimum width of one grid column
    pub min_column_width: u32,
    /// Rows from the end of the grid at which the next page is requested
    pub scroll_threshold: u32,
    /// Height of one grid card
    pub card_height: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            min_column_width: 28,
            scroll_threshold: 8,
            card_height: 6,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScatchConfig {
    /// Root of the remote image API
    pub api_endpoint: String,

    /// Secret key sent by the proxy; never shown in full
    pub api_key: String,

    /// Suppress informational output by default
    pub quiet: bool,

    /// Upstream request timeout
    pub timeout_secs: u64,

    /// Pixel distance from the end of content that triggers the next page
    pub scroll_threshold: u32,

    /// Minimum column width in pixels, for `scatch layout`
    pub min_column_width: u32,

    /// Terminal gallery settings
    pub ui: UiConfig,

    /// Library location (defaults to the data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,

    /// Search history file (defaults to the data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
}

impl Default for ScatchConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.pexels.com".to_string(),
            api_key: String::new(),
            quiet: false,
            timeout_secs: 10,
            scroll_threshold: crate::feed::DEFAULT_SCROLL_THRESHOLD,
            min_column_width: crate::layout::DEFAULT_MIN_COLUMN_WIDTH,
            ui: UiConfig::default(),
            library_path: None,
            history_path: None,
        }
    }
}

impl ScatchConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("scatch").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file, layering `SCATCH_*` environment overrides
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or a value has the
    /// wrong type.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("SCATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory or file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    /// Whether an API key has been configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Library directory, falling back to the data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn library_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.library_path {
            Some(path) => Ok(path.clone()),
            None => crate::library::Library::default_path()
                .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string())),
        }
    }

    /// Search history file, falling back to the data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn history_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.history_path {
            Some(path) => Ok(path.clone()),
            None => crate::history::HistoryStore::default_path()
                .map_err(|e| ConfigError::Message(e.to_string())),
        }
    }

    /// Display value of a key; the API key is masked
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "api_endpoint" => self.api_endpoint.clone(),
            "api_key" => mask_secret(&self.api_key),
            "quiet" => self.quiet.to_string(),
            "timeout_secs" => self.timeout_secs.to_string(),
            "scroll_threshold" => self.scroll_threshold.to_string(),
            "min_column_width" => self.min_column_width.to_string(),
            "ui.min_column_width" => self.ui.min_column_width.to_string(),
            "ui.scroll_threshold" => self.ui.scroll_threshold.to_string(),
            "ui.card_height" => self.ui.card_height.to_string(),
            "library_path" => display_path(self.library_path.as_deref()),
            "history_path" => display_path(self.history_path.as_deref()),
            _ => return None,
        };
        Some(value)
    }

    /// Set a key from its string form
    ///
    /// Empty strings clear the optional path keys.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value that does not
    /// parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "api_endpoint" => self.api_endpoint = value.to_string(),
            "api_key" => self.api_key = value.to_string(),
            "quiet" => self.quiet = parse_value(key, value)?,
            "timeout_secs" => self.timeout_secs = parse_value(key, value)?,
            "scroll_threshold" => self.scroll_threshold = parse_value(key, value)?,
            "min_column_width" => self.min_column_width = parse_value(key, value)?,
            "ui.min_column_width" => self.ui.min_column_width = parse_value(key, value)?,
            "ui.scroll_threshold" => self.ui.scroll_threshold = parse_value(key, value)?,
            "ui.card_height" => self.ui.card_height = parse_value(key, value)?,
            "library_path" => self.library_path = optional_path(value),
            "history_path" => self.history_path = optional_path(value),
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown config key '{key}' (expected one of: {})",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Message(format!("Invalid value '{value}' for '{key}'")))
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "(default)".to_string(), |p| p.display().to_string())
}

/// `****` followed by the last four characters
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScatchConfig::default();
        assert_eq!(config.api_endpoint, "https://api.pexels.com");
        assert!(!config.has_api_key());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.scroll_threshold, 860);
        assert_eq!(config.min_column_width, 300);
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_save_and_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatch").join("config.toml");

        let mut config = ScatchConfig::default();
        config.api_key = "secret-key-1234".to_string();
        config.ui.card_height = 9;
        config.library_path = Some(PathBuf::from("/tmp/scatch-lib"));
        config.save_to(&path).unwrap();

        let loaded = ScatchConfig::load_from(&path).unwrap();
        assert_eq!(loaded.api_key, "secret-key-1234");
        assert_eq!(loaded.ui.card_height, 9);
        assert_eq!(loaded.library_path, Some(PathBuf::from("/tmp/scatch-lib")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 3\n[ui]\ncard_height = 4\n").unwrap();

        let loaded = ScatchConfig::load_from(&path).unwrap();
        assert_eq!(loaded.timeout_secs, 3);
        assert_eq!(loaded.ui.card_height, 4);
        assert_eq!(loaded.ui.min_column_width, 28);
        assert_eq!(loaded.api_endpoint, "https://api.pexels.com");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ScatchConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.timeout_secs, ScatchConfig::default().timeout_secs);
    }

    #[test]
    fn test_get_masks_api_key() {
        let mut config = ScatchConfig::default();
        assert_eq!(config.get("api_key").as_deref(), Some("(not set)"));
        config.api_key = "abcdefgh1234".to_string();
        assert_eq!(config.get("api_key").as_deref(), Some("****1234"));
        assert_eq!(config.get("nope"), None);
    }

    #[test]
    fn test_every_key_round_trips_through_get() {
        let config = ScatchConfig::default();
        for key in KEYS {
            assert!(config.get(key).is_some(), "missing getter for {key}");
        }
    }

    #[test]
    fn test_set_values() {
        let mut config = ScatchConfig::default();
        config.set("ui.card_height", "8").unwrap();
        config.set("quiet", "true").unwrap();
        config.set("history_path", "/tmp/h.json").unwrap();
        assert_eq!(config.ui.card_height, 8);
        assert!(config.quiet);
        assert_eq!(config.history_path().unwrap(), PathBuf::from("/tmp/h.json"));

        config.set("history_path", "").unwrap();
        assert_eq!(config.history_path, None);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = ScatchConfig::default();
        assert!(config.set("timeout_secs", "soon").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_mask_short_secret() {
        assert_eq!(mask_secret("abc"), "****");
    }
}
