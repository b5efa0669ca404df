//! Engine configuration persisted as TOML
//!
//! Stored in ~/.config/puyors/config.toml (or platform equivalent)

use crate::color::PuyoColor;
use crate::score::ALL_CLEAR_BONUS;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    /// Total rows, hidden buffer included
    pub height: usize,
    /// Buffer rows above the visible area
    pub hidden_rows: usize,
}

impl Default for GridConfig {
    /// 6 x 12 visible with one hidden row on top
    fn default() -> Self {
        Self {
            width: 6,
            height: 13,
            hidden_rows: 1,
        }
    }
}

impl GridConfig {
    /// 6 x 16 layout with one hidden row, roomy enough for stacking scenarios
    pub fn tall() -> Self {
        Self {
            width: 6,
            height: 16,
            hidden_rows: 1,
        }
    }

    pub fn visible_rows(&self) -> usize {
        self.height.saturating_sub(self.hidden_rows)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid width must be at least 2, got {}",
                self.width
            )));
        }
        if self.hidden_rows < 1 {
            return Err(ConfigError::Invalid(
                "at least one hidden row is required for spawning".to_string(),
            ));
        }
        if self.visible_rows() < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid needs at least 2 visible rows, got {}",
                self.visible_rows()
            )));
        }
        Ok(())
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of palette colors dealt
    pub color_count: usize,
    /// Awarded when a cascade empties the grid
    pub all_clear_bonus: u64,
    /// Fixed seed for a reproducible session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub grid: GridConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            color_count: 4,
            all_clear_bonus: ALL_CLEAR_BONUS,
            seed: None,
            grid: GridConfig::default(),
        }
    }
}

impl GameConfig {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "puyors", "puyors").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load from the platform config file, or defaults if there is none
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save to the platform config file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if !(1..=PuyoColor::MAX_COLORS).contains(&self.color_count) {
            return Err(ConfigError::Invalid(format!(
                "color_count must be between 1 and {}, got {}",
                PuyoColor::MAX_COLORS,
                self.color_count
            )));
        }
        Ok(())
    }
}
