//! Maze-chase arcade simulation library crate.

pub mod app;
pub mod audio;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod logging;
pub mod map;
pub mod scores;
pub mod sinks;
pub mod systems;
pub mod terminal;
