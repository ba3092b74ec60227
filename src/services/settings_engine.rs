// webview-shell Settings Engine
// Loads and saves the shell configuration, updates individual values, and
// resolves the destination URL.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::platform;
use crate::types::errors::ConfigError;
use crate::types::settings::ShellSettings;

/// Destination used when neither the build nor the config file names one.
pub const DEFAULT_URL: &str = "https://ciptadesa.com";

/// Destination baked in at compile time (`WEBSITE_URL=... cargo build`).
pub const BUILD_TIME_URL: Option<&str> = option_env!("WEBSITE_URL");

const CONFIG_FILE: &str = "shell.json";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ShellSettings, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn get_settings(&self) -> &ShellSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), ConfigError>;
    fn reset(&mut self) -> Result<(), ConfigError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists the shell configuration as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ShellSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `shell.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join(CONFIG_FILE)
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: ShellSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults. Missing keys take their default value.
    /// A malformed file is an error and leaves the in-memory settings unchanged.
    fn load(&mut self) -> Result<ShellSettings, ConfigError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!(path = %self.config_path, "no config file, using defaults");
            self.settings = ShellSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ShellSettings = serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        if let Some(url) = settings.start_url.as_deref() {
            validate_url(url)?;
        }

        info!(path = %self.config_path, "config loaded");
        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Writes the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &ShellSettings {
        &self.settings
    }

    /// Updates one setting by dot-notation path and saves.
    ///
    /// # Examples
    /// - `"start_url"`
    /// - `"browser.support_multiple_windows"`
    /// - `"window.title"`
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), ConfigError> {
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(ConfigError::InvalidKey(format!("'{}' is not a settings path", key)));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        let pointer = format!("/{}", key.replace('.', "/"));
        let slot = json_value
            .pointer_mut(&pointer)
            .ok_or_else(|| ConfigError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        *slot = value;

        let updated: ShellSettings = serde_json::from_value(json_value).map_err(|e| {
            ConfigError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        if let Some(url) = updated.start_url.as_deref() {
            validate_url(url)?;
        }

        self.settings = updated;
        self.save()
    }

    /// Resets all settings to factory defaults and saves to disk.
    fn reset(&mut self) -> Result<(), ConfigError> {
        self.settings = ShellSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}

/// Accepts blank (meaning "use the fallback") or an http(s)/file URL.
pub fn validate_url(url: &str) -> Result<(), ConfigError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    let lower = trimmed.to_ascii_lowercase();
    let has_host = ["http://", "https://"]
        .iter()
        .any(|p| lower.starts_with(p) && lower.len() > p.len());
    if has_host || lower.starts_with("file://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl(trimmed.to_string()))
    }
}

/// Picks the destination: build-time value, then configured value, then [`DEFAULT_URL`].
///
/// Unset and blank values both fall through to the next source.
pub fn resolve_start_url(build_time: Option<&str>, configured: Option<&str>) -> Result<String, ConfigError> {
    let chosen = [build_time, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|u| !u.is_empty());

    match chosen {
        Some(url) => {
            validate_url(url)?;
            Ok(url.to_string())
        }
        None => Ok(DEFAULT_URL.to_string()),
    }
}
