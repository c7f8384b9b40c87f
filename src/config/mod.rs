//! Runtime settings, stored as TOML.
//!
//! ```no_run
//! use vimag_ui::config::{self, Config, CycleMode};
//! use std::path::Path;
//!
//! let path = Path::new("settings.toml");
//! let mut config = config::load_from_path(path).unwrap_or_default();
//! config.navigation.cycle = CycleMode::Wrap;
//! config::save_to_path(&config, path).expect("failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
pub use crate::navigation::CycleMode;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub interaction: InteractionConfig,
    pub animation: AnimationConfig,
    pub navigation: NavigationConfig,
}

/// Pointer gesture thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub double_click_time: f64,
    pub double_click_distance: f32,
    pub drag_threshold: f32,
    pub click_slop: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            double_click_time: DEFAULT_DOUBLE_CLICK_TIME,
            double_click_distance: DEFAULT_DOUBLE_CLICK_DISTANCE,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            click_slop: DEFAULT_CLICK_SLOP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub switch_speed: f32,
    pub default_duration: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            switch_speed: DEFAULT_SWITCH_SPEED,
            default_duration: DEFAULT_ANIMATION_DURATION,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub cycle: CycleMode,
}

/// Loads settings from a TOML file.
///
/// A file that exists but can't be parsed yields the defaults; only I/O errors are returned.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), %err, "invalid settings file, using defaults");
        Config::default()
    }))
}

/// Saves settings to a TOML file, creating parent directories as needed.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
