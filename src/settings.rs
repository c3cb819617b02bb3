//! Session settings
//!
//! Supplied once at session start. Any subset of fields may be given in
//! JSON; the rest keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::level::{ConfigError, LevelGenerationParams};

/// Player color choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayerColor {
    #[default]
    Blue,
    Red,
    Green,
    Purple,
    Orange,
}

impl PlayerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerColor::Blue => "Blue",
            PlayerColor::Red => "Red",
            PlayerColor::Green => "Green",
            PlayerColor::Purple => "Purple",
            PlayerColor::Orange => "Orange",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" => Some(PlayerColor::Blue),
            "red" => Some(PlayerColor::Red),
            "green" => Some(PlayerColor::Green),
            "purple" | "violet" => Some(PlayerColor::Purple),
            "orange" => Some(PlayerColor::Orange),
            _ => None,
        }
    }

    /// Render color (RGBA)
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            PlayerColor::Blue => [0.2, 0.4, 1.0, 1.0],
            PlayerColor::Red => [0.9, 0.15, 0.15, 1.0],
            PlayerColor::Green => [0.2, 0.8, 0.4, 1.0],
            PlayerColor::Purple => [0.6, 0.2, 0.8, 1.0],
            PlayerColor::Orange => [1.0, 0.55, 0.1, 1.0],
        }
    }
}

/// Settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Parsed fine, but the level parameters are unusable
    Config(ConfigError),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
            SettingsError::Config(e) => write!(f, "invalid level parameters: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Config(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<ConfigError> for SettingsError {
    fn from(e: ConfigError) -> Self {
        SettingsError::Config(e)
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Generator overrides
    pub level: LevelGenerationParams,
    pub player_color: PlayerColor,
    /// Extra diagnostics in the log
    pub development_mode: bool,
    /// Generate levels procedurally; otherwise play the classic level
    pub use_procedural_level: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelGenerationParams::default(),
            player_color: PlayerColor::default(),
            development_mode: false,
            use_procedural_level: true,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.level.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
