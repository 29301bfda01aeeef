//! Interfaces to the collaborators that sit outside the simulation.
//!
//! The simulation only ever pushes into these; nothing is read back.

use crate::events::{AudioEvent, RenderEvent};

/// Mirrors the simulation on screen.
pub trait RenderSink {
    fn render(&mut self, event: &RenderEvent);

    /// Called once at the end of every frame, after all ticks of the frame ran.
    fn present(&mut self) {}
}

/// Plays one-shot cues.
pub trait AudioSink {
    fn pellet_eaten(&mut self);
    fn power_up_collected(&mut self);
    fn level_up(&mut self);
    fn player_death(&mut self);

    fn set_muted(&mut self, _muted: bool) {}

    fn play(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::PelletEaten => self.pellet_eaten(),
            AudioEvent::PowerUpCollected => self.power_up_collected(),
            AudioEvent::LevelUp => self.level_up(),
            AudioEvent::PlayerDeath => self.player_death(),
        }
    }
}

/// Receives the score after every change.
///
/// Implementations must keep the best score per player and must not block.
pub trait ScoreSink {
    fn update_score(&mut self, score: u32);
}

/// The collaborators a game reports to.
pub struct Sinks {
    pub render: Box<dyn RenderSink>,
    pub audio: Box<dyn AudioSink>,
    pub scores: Box<dyn ScoreSink>,
}

/// Discards everything; useful for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _event: &RenderEvent) {}
}

impl AudioSink for NullSink {
    fn pellet_eaten(&mut self) {}
    fn power_up_collected(&mut self) {}
    fn level_up(&mut self) {}
    fn player_death(&mut self) {}
}

impl ScoreSink for NullSink {
    fn update_score(&mut self, _score: u32) {}
}

impl Sinks {
    pub fn null() -> Self {
        Self {
            render: Box::new(NullSink),
            audio: Box::new(NullSink),
            scores: Box::new(NullSink),
        }
    }
}
