use bevy_ecs::{resource::Resource, system::Res};

use crate::clock::{TickClock, TickKind};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// A level is being built; nothing ticks until it is ready.
    Loading(u8),
    /// The main gameplay loop is active. Power mode is tracked separately.
    Playing,
    /// Every collectible of the level is gone; the next level (or the win) follows.
    LevelCleared,
    /// The last level was cleared.
    Won,
    /// No lives remain.
    Lost,
}

/// The finished state of a run; exactly one holds at any time.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl GameStage {
    pub fn outcome(&self) -> Outcome {
        match self {
            GameStage::Won => Outcome::Won,
            GameStage::Lost => Outcome::Lost,
            GameStage::Loading(_) | GameStage::Playing | GameStage::LevelCleared => Outcome::InProgress,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome() != Outcome::InProgress
    }
}

/// Run condition: the stage is [`GameStage::Playing`].
pub fn is_playing(stage: Res<GameStage>) -> bool {
    *stage == GameStage::Playing
}

/// Run condition factory: the tick being processed is one of `kinds`.
pub fn on_tick(kinds: &'static [TickKind]) -> impl FnMut(Res<TickClock>) -> bool + Clone {
    move |clock: Res<TickClock>| clock.current().is_some_and(|kind| kinds.contains(&kind))
}
