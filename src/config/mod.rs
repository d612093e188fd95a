//! Configuration module for tagtree
//!
//! Manages application configuration: where the tag tree is stored and which
//! root tags scope notebooks and templates.
//! Configuration is stored in the user's config directory.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root tags whose descendants count as notebooks or templates
///
/// Selection inference prefers a note's template tags, then its notebook tags.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScopeRoots {
    /// Root tag of the notebooks scope
    #[serde(default = "default_notebooks")]
    pub notebooks: String,
    /// Root tag of the templates scope
    #[serde(default = "default_templates")]
    pub templates: String,
}

fn default_notebooks() -> String {
    "notebooks".to_string()
}

fn default_templates() -> String {
    "templates".to_string()
}

impl Default for ScopeRoots {
    fn default() -> Self {
        Self {
            notebooks: default_notebooks(),
            templates: default_templates(),
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TagtreeConfig {
    /// Path of the sled database holding the tag tree
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Scope roots used for selection inference
    #[serde(default)]
    pub scopes: ScopeRoots,
}

impl TagtreeConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("tagtree").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the default configuration; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
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

    /// Keys accepted by [`get`](Self::get) and [`set`](Self::set)
    pub const KEYS: [&'static str; 4] = ["database", "quiet", "notebooks", "templates"];

    /// Read a setting as text
    ///
    /// An unset database prints as an empty string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `key` is unknown.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "database" => Ok(self
                .database
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default()),
            "quiet" => Ok(self.quiet.to_string()),
            "notebooks" => Ok(self.scopes.notebooks.clone()),
            "templates" => Ok(self.scopes.templates.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a setting from text
    ///
    /// An empty database value resets it to the default location. Nothing is
    /// written; call [`save`](Self::save) or [`save_to`](Self::save_to).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `key` is unknown or `value` is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "database" => {
                self.database = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "quiet" => {
                self.quiet = value.parse().map_err(|_| {
                    ConfigError::Message(format!("Invalid value for quiet: '{value}'. Use 'true' or 'false'"))
                })?;
            }
            "notebooks" | "templates" => {
                if value.is_empty() {
                    return Err(ConfigError::Message(format!("Scope root for {key} cannot be empty")));
                }
                if key == "notebooks" {
                    self.scopes.notebooks = value.to_string();
                } else {
                    self.scopes.templates = value.to_string();
                }
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Database path, defaulting to `<data dir>/tagtree/db`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system data
    /// directory cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }

        dirs::data_dir()
            .map(|dir| dir.join("tagtree").join("db"))
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::Message(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        TagtreeConfig::KEYS.join(", ")
    ))
}
