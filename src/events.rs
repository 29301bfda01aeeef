//! Inbound commands and outbound notifications.
//!
//! Systems only ever write outbound notifications; `Game` drains them after each
//! tick pass and hands them to the registered sinks.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::map::direction::Direction;
use crate::map::geometry::{Rect, Wall};
use crate::map::layout::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    MovePlayer(Direction),
    Restart,
    TogglePause,
    ToggleMute,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Stable identifier of an enemy within a level; the boss takes the id after the regular enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u8);

/// Stable identifier of a collectible within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Pellet,
    PowerUp,
}

/// Which body a position update refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Player,
    Enemy(EnemyId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Hidden,
    GameOver,
    Won,
}

/// Text shown above the playfield.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub level: u8,
    pub theme: &'static str,
    pub score: u32,
    pub lives: u8,
}

/// Everything a renderer needs to mirror the simulation.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum RenderEvent {
    MazeBuilt { level: u8, theme: Theme, walls: Vec<Wall> },
    ItemAdded { id: ItemId, kind: ItemKind, bounds: Rect },
    ItemRemoved { id: ItemId },
    EntityMoved { actor: Actor, position: Vec2 },
    EnemyVisibility { id: EnemyId, visible: bool, boss: bool },
    EnemyVulnerability { id: EnemyId, vulnerable: bool },
    PlayerFacing { angle: f32 },
    MouthToggled { open: bool },
    Hud(Hud),
    Overlay(Overlay),
}

/// One-shot cues for the audio collaborator.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    PelletEaten,
    PowerUpCollected,
    LevelUp,
    PlayerDeath,
}

/// Emitted whenever the score resource changes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged(pub u32);

/// Emitted once per level when the last collectible is removed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCleared {
    pub level: u8,
}
