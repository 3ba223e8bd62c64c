//! Configuration loading for the engine.
//!
//! All engine settings are loaded from a TOML configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridConfig,
    /// Presentation pacing windows
    #[serde(default)]
    pub pacing: PacingConfig,
    /// Behavior flags
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }
}

/// Grid settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Spiral rings addressable from the layout table
    pub radius: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { radius: 5 }
    }
}

/// Pacing windows. These are presentation hints: the state-machine
/// ordering holds at any duration, including zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay between drained steps
    pub step_ms: u64,
    /// Fall window before the actor resets to the origin
    pub fall_ms: u64,
    /// Respawn window before control returns
    pub respawn_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            step_ms: 500,
            fall_ms: 500,
            respawn_ms: 500,
        }
    }
}

/// Behavior flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Reset casting state automatically at end of reading
    pub auto_mode: bool,
    /// Hold casts for a user choice before committing a plan
    pub listening: bool,
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    IoError(std::io::Error),
    /// Error parsing TOML config
    TomlError(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::TomlError(e) => Some(e),
        }
    }
}

/// Error that can occur during TOML serialization.
#[derive(Debug)]
pub struct TomlSerializeError(pub toml::ser::Error);

impl std::fmt::Display for TomlSerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TOML serialize error: {}", self.0)
    }
}

impl std::error::Error for TomlSerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Engine Configuration

[grid]
radius = 5

[pacing]
step_ms = 500
fall_ms = 500
respawn_ms = 500

[behavior]
auto_mode = false
listening = false
"#
    .to_string()
}
