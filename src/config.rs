//! TOML configuration for the `blockfall` binary.
//!
//! Every section and field has a default, so a partial file (or no file at
//! all) is fine. `$BLOCKFALL_CONFIG` names the file when set; otherwise
//! `<config dir>/blockfall/config.toml` is used if it exists, and
//! `./blockfall.toml` if not.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{SessionSettings, SpawnPolicy};
use crate::types::{
    PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, GRAVITY_TICKS, INPUT_REPEAT_TICKS,
    TARGET_FPS,
};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "BLOCKFALL_CONFIG";

const FALLBACK_CONFIG_PATH: &str = "blockfall.toml";

const MAX_FPS: u32 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub timing: TimingConfig,
    pub spawn: SpawnConfig,
    pub view: ViewConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Frames (ticks) per second
    pub fps: u32,
    pub gravity_ticks: u32,
    pub input_repeat_ticks: u32,
    pub key_release_timeout_ms: u32,
    pub lock_on_landing: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps: TARGET_FPS,
            gravity_ticks: GRAVITY_TICKS,
            input_repeat_ticks: INPUT_REPEAT_TICKS,
            key_release_timeout_ms: crate::input::DEFAULT_RELEASE_TIMEOUT_MS,
            lock_on_landing: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnMode {
    Fixed,
    #[default]
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub mode: SpawnMode,
    /// Piece letter used in fixed mode
    pub kind: String,
    pub seed: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            mode: SpawnMode::Random,
            kind: "t".to_string(),
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub cell_width: u16,
    pub cell_height: u16,
    pub grid_lines: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cell_width: 3,
            cell_height: 1,
            grid_lines: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter, overridden by `RUST_LOG`
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("blockfall.log"),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents, path)
    }

    /// Load from the resolved default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width == 0 || self.board.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "board must be at least 1x1, got {}x{}",
                self.board.width, self.board.height
            )));
        }
        if !(1..=MAX_FPS).contains(&self.timing.fps) {
            return Err(ConfigError::Invalid(format!(
                "timing.fps must be between 1 and {MAX_FPS}, got {}",
                self.timing.fps
            )));
        }
        if self.timing.gravity_ticks == 0 || self.timing.input_repeat_ticks == 0 {
            return Err(ConfigError::Invalid(
                "timing.gravity_ticks and timing.input_repeat_ticks must be non-zero".into(),
            ));
        }
        if self.view.cell_width == 0 || self.view.cell_height == 0 {
            return Err(ConfigError::Invalid("view cell size must be non-zero".into()));
        }
        if self.spawn.mode == SpawnMode::Fixed && PieceKind::from_str(&self.spawn.kind).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown piece kind {:?}",
                self.spawn.kind
            )));
        }
        Ok(())
    }

    pub fn spawn_policy(&self) -> SpawnPolicy {
        match (self.spawn.mode, PieceKind::from_str(&self.spawn.kind)) {
            (SpawnMode::Fixed, Some(kind)) => SpawnPolicy::Fixed(kind),
            _ => SpawnPolicy::Random {
                seed: self.spawn.seed,
            },
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            width: self.board.width,
            height: self.board.height,
            gravity_ticks: self.timing.gravity_ticks,
            input_repeat_ticks: self.timing.input_repeat_ticks,
            spawn: self.spawn_policy(),
            lock_on_landing: self.timing.lock_on_landing,
        }
    }
}

/// Resolve the config file location.
pub fn config_path() -> PathBuf {
    resolve_path(
        std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        dirs::config_dir(),
    )
}

fn resolve_path(env_override: Option<PathBuf>, config_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = env_override {
        return path;
    }
    config_dir
        .map(|dir| dir.join("blockfall").join("config.toml"))
        .filter(|path| path.is_file())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CONFIG_PATH))
}
