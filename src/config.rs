//src/config.rs
use crate::injury::InjuryKey;
use crate::session::IntensityMode;
use comfy_table::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_CONFIG_DIR: &str = "firstrep";
const CONFIG_ENV_VAR: &str = "FIRSTREP_CONFIG_DIR"; // Environment variable name

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid color name: {0}")]
    InvalidColor(String),
    #[error("Invalid default: {0}")]
    InvalidDefault(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial, // lbs
    Metric, // kg
}

impl Units {
    #[must_use]
    pub const fn weight_label(self) -> &'static str {
        match self {
            Self::Imperial => "lbs",
            Self::Metric => "kg",
        }
    }
}

// Define standard colors using strum for easy iteration/parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGrey,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    Grey,
}

impl From<StandardColor> for Color {
    fn from(value: StandardColor) -> Self {
        match value {
            StandardColor::Black => Self::Black,
            StandardColor::Red => Self::Red,
            StandardColor::Green => Self::Green,
            StandardColor::Yellow => Self::Yellow,
            StandardColor::Blue => Self::Blue,
            StandardColor::Magenta => Self::Magenta,
            StandardColor::Cyan => Self::Cyan,
            StandardColor::White => Self::White,
            StandardColor::DarkGrey => Self::DarkGrey,
            StandardColor::DarkRed => Self::DarkRed,
            StandardColor::DarkGreen => Self::DarkGreen,
            StandardColor::DarkYellow => Self::DarkYellow,
            StandardColor::DarkBlue => Self::DarkBlue,
            StandardColor::DarkMagenta => Self::DarkMagenta,
            StandardColor::DarkCyan => Self::DarkCyan,
            StandardColor::Grey => Self::Grey,
        }
    }
}

/// Parses a color name case-insensitively.
/// # Errors
/// Returns `ConfigError::InvalidColor` for unknown names.
pub fn parse_color(color_str: &str) -> Result<StandardColor, ConfigError> {
    StandardColor::iter()
        .find(|color| format!("{color:?}").eq_ignore_ascii_case(color_str))
        .ok_or_else(|| ConfigError::InvalidColor(color_str.to_string()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Theme {
    pub header_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_color: "Green".to_string(),
        }
    }
}

/// Values `generate` falls back to when a flag is omitted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SessionDefaults {
    pub days_per_week: u8,
    pub session_minutes: u16,
    pub injury: InjuryKey,
    pub intensity: IntensityMode,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            days_per_week: 3,
            session_minutes: 45,
            injury: InjuryKey::None,
            intensity: IntensityMode::Normal,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Config {
    pub units: Units,
    pub defaults: SessionDefaults,
    /// How many PR hits are listed before the "+N more" tail.
    pub pr_display_limit: usize,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            units: Units::default(),
            defaults: SessionDefaults::default(),
            pr_display_limit: 4,
            theme: Theme::default(),
        }
    }
}

/// Determines the path to the configuration file, creating its directory.
/// # Errors
/// Returns `ConfigError` if no config directory can be determined or created.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir_path = if let Ok(path_str) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(path_str);
        if !path.is_dir() {
            tracing::warn!(
                "{} points to '{}', which is not a directory. Trying to create it.",
                CONFIG_ENV_VAR,
                path.display()
            );
        }
        path
    } else {
        dirs::config_dir()
            .ok_or(ConfigError::CannotDetermineConfigDir)?
            .join(APP_CONFIG_DIR)
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

/// Loads the configuration, writing the defaults first if the file is missing.
/// # Errors
/// Returns `ConfigError` on I/O or TOML failures.
pub fn load(config_path: &Path) -> Result<Config, ConfigError> {
    if config_path.exists() {
        let config_content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    } else {
        let default_config = Config::default();
        save(config_path, &default_config)?;
        Ok(default_config)
    }
}

/// Saves the configuration to the TOML file.
/// # Errors
/// Returns `ConfigError` on I/O or TOML failures.
pub fn save(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config)?;
    fs::write(config_path, config_content)?;
    Ok(())
}
