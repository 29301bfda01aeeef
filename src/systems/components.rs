use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;

use crate::constants::body::{ENEMY_SIZE, ENEMY_STEP, PLAYER_SIZE};
use crate::events::{EnemyId, ItemId, ItemKind};
use crate::map::direction::Direction;
use crate::map::geometry::Rect;

/// A tag component for the entity that is controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// Top-left corner of a body, in world units.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Width and height of a body.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BodySize(pub Vec2);

impl BodySize {
    pub fn square(side: f32) -> Self {
        Self(Vec2::splat(side))
    }
}

impl Position {
    pub fn bounds(&self, size: &BodySize) -> Rect {
        Rect::from_corner(self.0, size.0)
    }
}

/// Heading state of the player.
///
/// `desired` holds the last requested direction until it can be taken;
/// `current` is the direction actually being travelled, if any.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Steering {
    pub current: Option<Direction>,
    pub desired: Option<Direction>,
}

/// Distance covered per movement tick.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerAnimation {
    pub mouth_open: bool,
    pub facing: Direction,
}

impl Default for PlayerAnimation {
    fn default() -> Self {
        Self {
            mouth_open: true,
            facing: Direction::Right,
        }
    }
}

/// Where the player returns to after losing a life or loading a level.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint(pub Vec2);

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub size: BodySize,
    pub steering: Steering,
    pub speed: Speed,
    pub animation: PlayerAnimation,
    pub spawn: SpawnPoint,
}

impl PlayerBundle {
    pub fn new(spawn: Vec2, step: f32) -> Self {
        Self {
            player: PlayerControlled,
            position: Position(spawn),
            size: BodySize::square(PLAYER_SIZE),
            steering: Steering::default(),
            speed: Speed(step),
            animation: PlayerAnimation::default(),
            spawn: SpawnPoint(spawn),
        }
    }
}

/// An enemy body; deactivated enemies stay in the world but are hidden and inert.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub id: EnemyId,
    /// Grid step used both for movement and for pathfinding.
    pub step: i32,
    pub active: bool,
    pub vulnerable: bool,
    /// Bosses pursue even in power mode and are never vulnerable.
    pub boss: bool,
}

#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub position: Position,
    pub size: BodySize,
    pub spawn: SpawnPoint,
}

impl EnemyBundle {
    pub fn new(id: EnemyId, spawn: Vec2, boss: bool) -> Self {
        Self {
            enemy: Enemy {
                id,
                step: ENEMY_STEP,
                active: true,
                vulnerable: false,
                boss,
            },
            position: Position(spawn),
            size: BodySize::square(ENEMY_SIZE),
            spawn: SpawnPoint(spawn),
        }
    }
}

/// A pellet or power-up waiting to be collected.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub id: ItemId,
    pub kind: ItemKind,
    pub bounds: Rect,
}

impl ItemKind {
    pub fn score_value(&self) -> u32 {
        match self {
            ItemKind::Pellet => crate::constants::score::PELLET,
            ItemKind::PowerUp => crate::constants::score::POWER_UP,
        }
    }
}

/// A resource to track the score of the current run.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// Remaining lives.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lives(pub u8);

/// Whether enemies are currently edible.
///
/// The countdown itself lives in the tick clock's power deadline.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerMode {
    pub active: bool,
}

/// Per-level bookkeeping, reset on every level load.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelState {
    pub number: u8,
    pub boss_spawned: bool,
    pub board_cleared: bool,
}

impl LevelState {
    pub fn new(number: u8) -> Self {
        Self {
            number,
            boss_spawned: false,
            board_cleared: false,
        }
    }
}
