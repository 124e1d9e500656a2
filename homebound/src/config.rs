//! Startup configuration with defaults and RON persistence.

use std::path::{Path, PathBuf};

use retro_cockpit::window::{StartOptions, WindowMode};
use serde::{Deserialize, Serialize};

use crate::constants::ENGINE_VOLUME;

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CockpitConfig {
    pub window: WindowConfig,
    pub audio: AudioConfig,
    /// Directory holding the optional `images/` and `sounds/` folders.
    pub assets_dir: PathBuf,
    /// Fixed seed for the belt and hit timing, random when absent.
    pub seed: Option<u64>,
    /// Streaks drawn while the ship tumbles, none by default.
    pub speed_lines: u32
}

/// Framebuffer resolution, the window itself is freely resizable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Wide480x270,
    Wide640x360
}

impl From<Resolution> for WindowMode {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Wide480x270 => WindowMode::Wide480x270,
            Resolution::Wide640x360 => WindowMode::Wide640x360
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    pub fullscreen: bool,
    pub resolution: Resolution
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0 - 1.0).
    pub master_volume: f32,
    /// Volume of the looping engine hum (0.0 - 1.0).
    pub engine_volume: f32
}

impl Default for CockpitConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            audio: AudioConfig::default(),
            assets_dir: PathBuf::from("assets"),
            seed: None,
            speed_lines: 0
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            resolution: Resolution::Wide640x360
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            engine_volume: ENGINE_VOLUME
        }
    }
}

impl CockpitConfig {
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("homebound"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: CockpitConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = CockpitConfig::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    pub fn start_options(&self) -> StartOptions {
        StartOptions {
            window_width: self.window.width as i32,
            window_height: self.window.height as i32,
            fullscreen: self.window.fullscreen
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.assets_dir.join("images")
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.assets_dir.join("sounds")
    }
}
