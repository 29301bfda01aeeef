//! This module contains all the constants used by the simulation.

use std::time::Duration;

/// Target frame time of the host loop.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Width and height of the square playfield, in world units.
pub const BOARD_SIZE: f32 = 600.0;
/// Thickness of the outer border; nothing may be placed inside it.
pub const BORDER: f32 = 20.0;
/// Spacing of the lanes the player snaps to and the cells enemies walk on.
pub const GRID_STEP: f32 = 10.0;
/// Margin shaved off every side of a body before it is tested against walls.
pub const COLLISION_INSET: f32 = 1.25;

/// Body sizes and movement steps.
pub mod body {
    /// Side length of the player's square body.
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Side length of an enemy's square body.
    pub const ENEMY_SIZE: f32 = 30.0;
    /// Default distance the player covers per movement tick.
    pub const PLAYER_STEP: f32 = 5.0;
    /// Distance an enemy covers per enemy tick; also its pathfinding grid step.
    pub const ENEMY_STEP: i32 = 10;
    /// How far off a lane the player may be and still count as aligned.
    pub const LANE_TOLERANCE: f32 = 0.5;
    /// Top-left corner of the player spawn shared by every level.
    pub const PLAYER_SPAWN: (f32, f32) = (40.0, 140.0);
}

/// Collectible placement.
pub mod items {
    /// Distance between neighbouring pellet cells.
    pub const PELLET_SPACING: i32 = 30;
    /// Centre of the first pellet cell on each axis.
    pub const PELLET_ORIGIN: i32 = 35;
    pub const PELLET_SIZE: f32 = 6.0;
    pub const POWER_UP_SIZE: f32 = 20.0;
}

/// Points awarded for each kind of event.
pub mod score {
    pub const PELLET: u32 = 10;
    pub const POWER_UP: u32 = 50;
    pub const ENEMY: u32 = 200;
}

/// Default tick cadences, in milliseconds.
pub mod timing {
    pub const ANIMATION_MS: u64 = 155;
    pub const MOVEMENT_MS: u64 = 50;
    pub const ENEMY_MS: u64 = 120;
    pub const POWER_MODE_MS: u64 = 7_000;
}

/// The boss appears once on this level after every other enemy is gone.
pub const BOSS_LEVEL: u8 = 3;
/// Top-left corner of the boss spawn.
pub const BOSS_SPAWN: (f32, f32) = (280.0, 280.0);

/// Lives granted at the start of a run unless configured otherwise.
pub const STARTING_LIVES: u8 = 3;
