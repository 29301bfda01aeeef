//! This module handles the audio cues for the game.
//!
//! A terminal has no mixer, so cues are logged and the important ones ring the bell.

use std::io::Write;

use tracing::{trace, warn};

use crate::sinks::AudioSink;

/// Terminal bell character.
const BELL: &[u8] = b"\x07";

/// The audio system for the game.
#[derive(Debug, Default)]
pub struct Audio {
    muted: bool,
}

impl Audio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the audio is muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn cue(&mut self, name: &'static str, bell: bool) {
        trace!(cue = name, muted = self.muted, "Audio cue");
        if !bell || self.muted {
            return;
        }

        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(BELL).and_then(|_| stdout.flush()) {
            warn!("Could not ring terminal bell: {}", e);
        }
    }
}

impl AudioSink for Audio {
    fn pellet_eaten(&mut self) {
        self.cue("pellet", false);
    }

    fn power_up_collected(&mut self) {
        self.cue("power_up", true);
    }

    fn level_up(&mut self) {
        self.cue("level_up", true);
    }

    fn player_death(&mut self) {
        self.cue("death", true);
    }

    /// Instantly mute or unmute all cues.
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
