//! Fixed-cadence tick scheduling driven by elapsed frame time.
//!
//! The host advances the clock by its frame delta; the clock then hands out
//! every tick that fell due inside that window, oldest first. Nothing here reads
//! a real clock, so tests drive it with exact deltas.

use bevy_ecs::resource::Resource;
use strum_macros::{AsRefStr, EnumIter};
use tracing::trace;

use crate::config::TimingConfig;

/// Slack for floating point drift when comparing due times.
const EPSILON: f64 = 1e-6;

/// The independent concerns the simulation advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum TickKind {
    /// Player steering, movement and collection.
    Movement,
    /// Enemy AI and contact checks.
    Enemy,
    /// Mouth toggle.
    Animation,
    /// One-shot end of power mode.
    PowerExpiry,
}

#[derive(Debug, Clone, Copy)]
struct Cadence {
    interval: f64,
    next_due: f64,
}

impl Cadence {
    fn new(interval: f64) -> Self {
        Self {
            interval,
            next_due: interval,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct TickClock {
    /// Simulation time of the tick being processed.
    now: f64,
    /// How far the host has advanced the clock.
    horizon: f64,
    movement: Cadence,
    enemy: Cadence,
    animation: Cadence,
    power_duration: f64,
    power_deadline: Option<f64>,
    current: Option<TickKind>,
    stopped: bool,
    ticks: u64,
}

impl TickClock {
    pub fn new(timing: &TimingConfig) -> Self {
        let secs = |ms: u64| ms as f64 / 1000.0;
        Self {
            now: 0.0,
            horizon: 0.0,
            movement: Cadence::new(secs(timing.movement_ms)),
            enemy: Cadence::new(secs(timing.enemy_ms)),
            animation: Cadence::new(secs(timing.animation_ms)),
            power_duration: secs(timing.power_mode_ms),
            power_deadline: None,
            current: None,
            stopped: false,
            ticks: 0,
        }
    }

    /// Extends the window of time that may be processed. Ignored once stopped.
    pub fn advance(&mut self, dt: f32) {
        if !self.stopped && dt > 0.0 {
            self.horizon += f64::from(dt);
        }
    }

    /// Pops the earliest tick that is due, marking it as the current one.
    ///
    /// Simultaneous ticks come out in [`TickKind`] declaration order.
    pub fn next_due(&mut self) -> Option<TickKind> {
        self.current = None;
        if self.stopped {
            return None;
        }

        let mut due: Option<(f64, TickKind)> = None;
        let mut consider = |at: f64, kind: TickKind| {
            if at <= self.horizon + EPSILON && due.is_none_or(|(best, _)| at < best - EPSILON) {
                due = Some((at, kind));
            }
        };
        consider(self.movement.next_due, TickKind::Movement);
        consider(self.enemy.next_due, TickKind::Enemy);
        consider(self.animation.next_due, TickKind::Animation);
        if let Some(deadline) = self.power_deadline {
            consider(deadline, TickKind::PowerExpiry);
        }

        let Some((at, kind)) = due else {
            self.now = self.horizon;
            return None;
        };

        self.now = at;
        match kind {
            TickKind::Movement => self.movement.next_due += self.movement.interval,
            TickKind::Enemy => self.enemy.next_due += self.enemy.interval,
            TickKind::Animation => self.animation.next_due += self.animation.interval,
            TickKind::PowerExpiry => self.power_deadline = None,
        }
        self.current = Some(kind);
        self.ticks += 1;
        trace!(tick = self.ticks, kind = kind.as_ref(), at, "Tick due");
        Some(kind)
    }

    /// The tick currently being processed, if any.
    pub fn current(&self) -> Option<TickKind> {
        self.current
    }

    /// Starts the power-mode countdown, replacing any countdown already running.
    pub fn arm_power(&mut self) {
        self.power_deadline = Some(self.now + self.power_duration);
    }

    pub fn disarm_power(&mut self) {
        self.power_deadline = None;
    }

    /// Seconds of power mode left, measured from the tick being processed.
    pub fn power_remaining(&self) -> Option<f64> {
        self.power_deadline.map(|deadline| (deadline - self.now).max(0.0))
    }

    pub fn power_duration(&self) -> f64 {
        self.power_duration
    }

    /// Halts all cadences; no tick is handed out until [`TickClock::restart`].
    pub fn stop(&mut self) {
        self.stopped = true;
        self.current = None;
        self.power_deadline = None;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Resets every cadence to its first interval and resumes.
    pub fn restart(&mut self) {
        for cadence in [&mut self.movement, &mut self.enemy, &mut self.animation] {
            *cadence = Cadence::new(cadence.interval);
        }
        self.now = 0.0;
        self.horizon = 0.0;
        self.power_deadline = None;
        self.current = None;
        self.stopped = false;
    }

    /// Total number of ticks handed out since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulation time of the last processed tick, in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }
}
