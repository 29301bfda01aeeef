//! The built-in level layouts.

use glam::Vec2;

use crate::map::geometry::{Rect, Wall};

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Visual identity of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgb,
    pub wall: Rgb,
}

/// Static description of one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub number: u8,
    pub theme: Theme,
    /// How many of `enemy_spawns` are used.
    pub enemy_count: usize,
    /// Top-left corners of the regular enemies, in id order.
    pub enemy_spawns: &'static [(f32, f32)],
    pub walls: &'static [Wall],
    /// Nominal top-left corners of the power-ups, before snapping to reachable cells.
    pub power_ups: &'static [(f32, f32)],
}

impl LevelConfig {
    /// Spawn corners of the enemies that take part in this level.
    pub fn active_spawns(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.enemy_spawns
            .iter()
            .take(self.enemy_count)
            .map(|&(x, y)| Vec2::new(x, y))
    }
}

const fn wall(x: f32, y: f32, width: f32, height: f32) -> Wall {
    Rect::new(x, y, width, height)
}

const OUTER: [Wall; 4] = [
    wall(0.0, 0.0, 600.0, 20.0),
    wall(0.0, 580.0, 600.0, 20.0),
    wall(0.0, 0.0, 20.0, 600.0),
    wall(580.0, 0.0, 20.0, 600.0),
];

const AURORA_WALLS: [Wall; 12] = [
    OUTER[0],
    OUTER[1],
    OUTER[2],
    OUTER[3],
    wall(80.0, 80.0, 140.0, 20.0),
    wall(80.0, 80.0, 20.0, 140.0),
    wall(220.0, 160.0, 160.0, 20.0),
    wall(380.0, 80.0, 20.0, 180.0),
    wall(120.0, 260.0, 180.0, 20.0),
    wall(300.0, 360.0, 180.0, 20.0),
    wall(180.0, 460.0, 240.0, 20.0),
    wall(500.0, 220.0, 20.0, 180.0),
];

const COBALT_WALLS: [Wall; 13] = [
    OUTER[0],
    OUTER[1],
    OUTER[2],
    OUTER[3],
    wall(70.0, 70.0, 20.0, 220.0),
    wall(70.0, 70.0, 180.0, 20.0),
    wall(350.0, 70.0, 180.0, 20.0),
    wall(510.0, 70.0, 20.0, 220.0),
    wall(170.0, 200.0, 260.0, 20.0),
    wall(170.0, 200.0, 20.0, 170.0),
    wall(410.0, 200.0, 20.0, 170.0),
    wall(120.0, 430.0, 360.0, 20.0),
    wall(280.0, 290.0, 40.0, 140.0),
];

const CRIMSON_WALLS: [Wall; 14] = [
    OUTER[0],
    OUTER[1],
    OUTER[2],
    OUTER[3],
    wall(90.0, 70.0, 420.0, 20.0),
    wall(90.0, 70.0, 20.0, 170.0),
    wall(490.0, 70.0, 20.0, 170.0),
    wall(170.0, 170.0, 260.0, 20.0),
    wall(170.0, 170.0, 20.0, 180.0),
    wall(410.0, 170.0, 20.0, 180.0),
    wall(110.0, 390.0, 380.0, 20.0),
    wall(110.0, 390.0, 20.0, 130.0),
    wall(470.0, 390.0, 20.0, 130.0),
    wall(200.0, 510.0, 200.0, 20.0),
];

/// The three levels, in play order.
pub static LEVELS: [LevelConfig; 3] = [
    LevelConfig {
        number: 1,
        theme: Theme {
            name: "Aurora",
            background: Rgb(0x0D, 0x1B, 0x2A),
            wall: Rgb(0x3A, 0x86, 0xFF),
        },
        enemy_count: 2,
        enemy_spawns: &[(300.0, 300.0), (260.0, 300.0)],
        walls: &AURORA_WALLS,
        power_ups: &[(40.0, 540.0), (540.0, 540.0)],
    },
    LevelConfig {
        number: 2,
        theme: Theme {
            name: "Cobalt Lab",
            background: Rgb(0x1B, 0x1B, 0x2F),
            wall: Rgb(0x06, 0xD6, 0xA0),
        },
        enemy_count: 3,
        enemy_spawns: &[(240.0, 300.0), (360.0, 300.0), (300.0, 240.0)],
        walls: &COBALT_WALLS,
        power_ups: &[(40.0, 540.0), (540.0, 540.0), (540.0, 40.0)],
    },
    LevelConfig {
        number: 3,
        theme: Theme {
            name: "Crimson Forge",
            background: Rgb(0x2B, 0x0A, 0x0A),
            wall: Rgb(0xFF, 0x7F, 0x11),
        },
        enemy_count: 4,
        enemy_spawns: &[(300.0, 300.0), (260.0, 300.0), (340.0, 300.0), (300.0, 260.0)],
        walls: &CRIMSON_WALLS,
        power_ups: &[(40.0, 540.0), (540.0, 540.0), (540.0, 40.0), (40.0, 40.0)],
    },
];

/// Looks up a level by its 1-based number.
pub fn level(number: u8) -> Option<&'static LevelConfig> {
    LEVELS.get(usize::from(number).checked_sub(1)?)
}

/// Number of the last level.
pub fn final_level() -> u8 {
    LEVELS.len() as u8
}
