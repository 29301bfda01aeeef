//! Centralized error types for the simulation.
//!
//! Level data problems are fatal and surface through [`GameError`]. Score
//! persistence has its own error type that never crosses into a tick.

use std::io;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Score store error: {0}")]
    Scores(#[from] ScoreStoreError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors related to level data.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("Level {0} does not exist")]
    UnknownLevel(u8),

    #[error("Invalid map configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised by the file-backed score store.
#[derive(thiserror::Error, Debug)]
pub enum ScoreStoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed score file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
