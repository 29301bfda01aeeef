use std::path::PathBuf;

use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::constants::{body, timing, STARTING_LIVES};
use crate::error::ConfigError;

/// Name recorded in the score file when none is configured.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Prefix of every environment variable read by [`load_config`].
pub const ENV_PREFIX: &str = "MAZECHASE_";

/// Tick cadences, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub animation_ms: u64,
    pub movement_ms: u64,
    pub enemy_ms: u64,
    pub power_mode_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            animation_ms: timing::ANIMATION_MS,
            movement_ms: timing::MOVEMENT_MS,
            enemy_ms: timing::ENEMY_MS,
            power_mode_ms: timing::POWER_MODE_MS,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Key under which high scores are stored
    pub player_name: String,
    /// JSON file holding every player's best score
    pub score_file: PathBuf,
    /// Log output; the terminal is owned by the renderer
    pub log_file: PathBuf,
    /// Fallback filter when RUST_LOG is unset
    pub log_filter: String,
    pub starting_lives: u8,
    /// Distance the player covers per movement tick
    pub player_step: f32,
    pub timing: TimingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            score_file: PathBuf::from("scores.json"),
            log_file: PathBuf::from("mazechase.log"),
            log_filter: "info".to_string(),
            starting_lives: STARTING_LIVES,
            player_step: body::PLAYER_STEP,
            timing: TimingConfig::default(),
        }
    }
}

/// Raw configuration loaded directly from the environment.
/// This is an intermediate representation that gets validated and converted to GameConfig
#[derive(Debug, Deserialize)]
struct RawConfig {
    player_name: Option<String>,
    score_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_filter: Option<String>,
    starting_lives: Option<u8>,
    player_step: Option<f32>,
    animation_ms: Option<u64>,
    movement_ms: Option<u64>,
    enemy_ms: Option<u64>,
    power_mode_ms: Option<u64>,
}

impl TryFrom<RawConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let defaults = GameConfig::default();

        let player_name = raw
            .player_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or(defaults.player_name);

        let starting_lives = raw.starting_lives.unwrap_or(defaults.starting_lives);
        if starting_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "starting_lives",
                reason: "at least one life is required".to_string(),
            });
        }

        let player_step = raw.player_step.unwrap_or(defaults.player_step);
        if !(player_step > 0.0 && player_step <= body::PLAYER_SIZE) {
            return Err(ConfigError::Invalid {
                field: "player_step",
                reason: format!("{player_step} is outside (0, {}]", body::PLAYER_SIZE),
            });
        }

        let timing = TimingConfig {
            animation_ms: positive("animation_ms", raw.animation_ms, defaults.timing.animation_ms)?,
            movement_ms: positive("movement_ms", raw.movement_ms, defaults.timing.movement_ms)?,
            enemy_ms: positive("enemy_ms", raw.enemy_ms, defaults.timing.enemy_ms)?,
            power_mode_ms: positive("power_mode_ms", raw.power_mode_ms, defaults.timing.power_mode_ms)?,
        };

        Ok(GameConfig {
            player_name,
            score_file: raw.score_file.unwrap_or(defaults.score_file),
            log_file: raw.log_file.unwrap_or(defaults.log_file),
            log_filter: raw.log_filter.unwrap_or(defaults.log_filter),
            starting_lives,
            player_step,
            timing,
        })
    }
}

fn positive(field: &'static str, value: Option<u64>, default: u64) -> Result<u64, ConfigError> {
    match value.unwrap_or(default) {
        0 => Err(ConfigError::Invalid {
            field,
            reason: "interval must be greater than zero".to_string(),
        }),
        ms => Ok(ms),
    }
}

/// Loads configuration from `MAZECHASE_*` environment variables, falling back to defaults.
pub fn load_config() -> Result<GameConfig, ConfigError> {
    load_config_from(Figment::new().merge(Env::prefixed(ENV_PREFIX)))
}

/// Extracts and validates configuration from an arbitrary figment.
pub fn load_config_from(figment: Figment) -> Result<GameConfig, ConfigError> {
    let raw: RawConfig = figment.extract().map_err(Box::new)?;
    GameConfig::try_from(raw)
}
