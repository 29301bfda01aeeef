use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::event;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use tracing::{debug, error, info, warn};

use crate::config::GameConfig;
use crate::constants::LOOP_TIME;
use crate::game::Game;
use crate::sinks::Sinks;
use crate::terminal::Bindings;

fn sleep(value: Duration) {
    spin_sleep::sleep(value);
}

/// Puts the terminal into raw, alternate-screen mode and restores it on drop.
struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.stdout, Show, LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
    }
}

pub struct App {
    game: Game,
    bindings: Bindings,
    last_tick: Instant,
    _guard: TerminalGuard,
}

impl App {
    /// Takes over the terminal and starts the first level.
    pub fn new(config: GameConfig, sinks: Sinks) -> Result<Self> {
        let guard = TerminalGuard::enter()?;
        let game = Game::new(config, sinks)?;

        Ok(Self {
            game,
            bindings: Bindings::default(),
            last_tick: Instant::now(),
            _guard: guard,
        })
    }

    /// Runs one frame. Returns `false` once the player asked to leave.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        if let Err(e) = self.poll_input() {
            error!("Failed to read terminal input: {e}");
            return false;
        }
        if self.game.exit_requested() {
            info!("Exit requested. Exiting...");
            return false;
        }

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = Instant::now();

        if let Err(e) = self.game.tick(dt) {
            error!("Simulation failed: {e}");
            return false;
        }

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                sleep(time);
            }
        } else {
            debug!("Game loop behind schedule by: {:?}", start.elapsed() - LOOP_TIME);
        }

        true
    }

    fn poll_input(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Some(command) = self.bindings.command_for(&event) {
                self.game.handle_command(command)?;
            }
        }
        Ok(())
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
}
