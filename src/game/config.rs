// Game configuration - every tunable in one place, defaulting to the shipped values
//
// Values come from three layers, later ones winning: built-in defaults, an
// optional RON file named by `PLATFORMER_CONFIG`, then individual
// `PLATFORMER_*` environment overrides.

use crate::engine::game_loop::{TimestepMode, UnknownTimestepMode};
use crate::engine::input::Action;
use crate::engine::physics::PhysicsConfig;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use winit::keyboard::KeyCode;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "PLATFORMER_";

/// Environment variable holding the path of a RON config file
pub const CONFIG_FILE_VAR: &str = "PLATFORMER_CONFIG";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Player size must be positive, got {width}x{height}")]
    InvalidPlayerSize { width: f32, height: f32 },

    #[error("Physics value '{name}' must be finite and non-negative, got {value}")]
    InvalidPhysics { name: &'static str, value: f32 },

    #[error("Animation needs at least one frame and a frame duration of at least one tick")]
    InvalidAnimation,

    #[error("Viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("World height must be positive, got {0}")]
    InvalidWorldHeight(f32),

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error(transparent)]
    Timestep(#[from] UnknownTimestepMode),
}

/// Player body and spawn
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal spawn position; vertical spawn is on top of the first platform
    pub spawn_x: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 50.0,
            spawn_x: 100.0,
        }
    }
}

/// Walk-cycle timing and sprite strip layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub frame_count: u32,
    pub frame_duration_ticks: u32,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_count: 4,
            frame_duration_ticks: 8,
            frame_width: 40,
            frame_height: 50,
        }
    }
}

/// Where images come from
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    pub directory: PathBuf,
    pub player_sprite: String,
    pub platform_tile: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets"),
            player_sprite: "player.png".to_string(),
            platform_tile: "platform.png".to_string(),
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub animation: AnimationConfig,
    pub assets: AssetConfig,
    /// Bodies below this y respawn
    pub world_height: f32,
    /// Design resolution; also fixes the letterbox aspect ratio
    pub base_width: f32,
    pub base_height: f32,
    pub timestep: TimestepMode,
    /// Stop the camera at the level's right edge
    pub clamp_camera_to_level: bool,
    /// Keys bound on top of the arrow keys and Space
    pub extra_key_bindings: Vec<(KeyCode, Action)>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            animation: AnimationConfig::default(),
            assets: AssetConfig::default(),
            world_height: 450.0,
            base_width: 800.0,
            base_height: 450.0,
            timestep: TimestepMode::PerFrame,
            clamp_camera_to_level: false,
            extra_key_bindings: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Configuration from the process environment, validated
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = std::env::var_os(CONFIG_FILE_VAR).map(PathBuf::from);
        let overrides = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX) && key != CONFIG_FILE_VAR);
        Self::load(file.as_deref(), overrides)
    }

    /// Defaults, then `file` if given, then `overrides`; validated
    pub fn load<I, K, V>(file: Option<&Path>, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a RON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Apply `(KEY, value)` overrides. Unknown keys are logged and skipped.
    pub fn apply_overrides<I, K, V>(&mut self, overrides: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in overrides {
            let key = key.as_ref();
            let value = value.as_ref().trim();
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                warn!("Ignoring config override without {} prefix: {}", ENV_PREFIX, key);
                continue;
            };

            match name {
                "ASSET_DIR" => self.assets.directory = PathBuf::from(value),
                "TIMESTEP" => self.timestep = value.parse()?,
                "CLAMP_CAMERA" => self.clamp_camera_to_level = parse_value(key, value)?,
                "GRAVITY" => self.physics.gravity = parse_finite(key, value)?,
                "MOVE_SPEED" => self.physics.move_speed = parse_finite(key, value)?,
                "JUMP_POWER" => self.physics.jump_power = parse_finite(key, value)?,
                _ => warn!("Ignoring unknown config override {}", key),
            }
        }

        Ok(())
    }

    /// Check every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let PlayerConfig { width, height, .. } = self.player;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidPlayerSize { width, height });
        }

        for (name, value) in [
            ("gravity", self.physics.gravity),
            ("move_speed", self.physics.move_speed),
            ("jump_power", self.physics.jump_power),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidPhysics { name, value });
            }
        }

        if self.animation.frame_count == 0 || self.animation.frame_duration_ticks == 0 {
            return Err(ConfigError::InvalidAnimation);
        }

        if !(self.base_width > 0.0 && self.base_height > 0.0) {
            return Err(ConfigError::InvalidViewport {
                width: self.base_width,
                height: self.base_height,
            });
        }

        if !(self.world_height.is_finite() && self.world_height > 0.0) {
            return Err(ConfigError::InvalidWorldHeight(self.world_height));
        }

        Ok(())
    }

    /// Width / height of the design resolution
    pub fn aspect_ratio(&self) -> f32 {
        self.base_width / self.base_height
    }
}

/// Parse an override value as a RON literal
fn parse_value<T: DeserializeOwned>(key: &str, value: &str) -> Result<T, ConfigError> {
    ron::from_str(value).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_finite(key: &str, value: &str) -> Result<f32, ConfigError> {
    let number: f32 = parse_value(key, value)?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
