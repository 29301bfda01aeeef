//! This module contains the main game logic and state.

use bevy_ecs::{
    event::{EventRegistry, Events},
    schedule::{ExecutorKind, IntoScheduleConfigs, Schedule},
    world::World,
};
use tracing::{debug, info};

use crate::clock::{TickClock, TickKind};
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::events::{AudioEvent, BoardCleared, GameCommand, GameEvent, Overlay, RenderEvent, ScoreChanged};
use crate::formatter;
use crate::map::builder::load_level;
use crate::map::layout;
use crate::sinks::Sinks;
use crate::systems::{
    enemy_collision_system, enemy_movement_system, hud_system, is_playing, item_system, mouth_animation_system,
    on_tick, player_control_system, player_movement_system, power_expiry_system, GameStage, LevelState, Lives, Outcome,
    PowerMode, ScoreResource,
};

/// Core game state manager built on the Bevy ECS architecture.
///
/// Owns the `World` holding every entity and resource, the schedules that advance it,
/// and the sinks that mirror it. The host calls [`Game::tick`] once per frame with the
/// elapsed time; the tick clock decides which concerns run.
pub struct Game {
    world: World,
    /// Runs once per due tick; systems gate themselves on the tick kind.
    schedule: Schedule,
    /// Runs once per frame to apply buffered input.
    input: Schedule,
    sinks: Sinks,
    config: GameConfig,
    paused: bool,
    muted: bool,
    exit_requested: bool,
}

impl Game {
    /// Builds the world and loads the first level.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Map` if the first level fails validation.
    pub fn new(config: GameConfig, sinks: Sinks) -> GameResult<Game> {
        info!(player = %config.player_name, lives = config.starting_lives, "Starting game initialization");

        let mut world = World::default();
        Self::setup_ecs(&mut world, &config);

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        Self::configure_schedule(&mut schedule);

        let mut input = Schedule::default();
        input.set_executor_kind(ExecutorKind::SingleThreaded);
        input.add_systems(player_control_system.run_if(is_playing));

        load_level(&mut world, 1, config.player_step)?;

        let mut game = Game {
            world,
            schedule,
            input,
            sinks,
            config,
            paused: false,
            muted: false,
            exit_requested: false,
        };
        game.dispatch();
        game.sinks.render.present();
        info!("Game initialization completed successfully");
        Ok(game)
    }

    fn setup_ecs(world: &mut World, config: &GameConfig) {
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<RenderEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
        EventRegistry::register_event::<ScoreChanged>(world);
        EventRegistry::register_event::<BoardCleared>(world);

        world.insert_resource(TickClock::new(&config.timing));
        world.insert_resource(ScoreResource(0));
        world.insert_resource(Lives(config.starting_lives));
        world.insert_resource(PowerMode::default());
        world.insert_resource(LevelState::new(1));
        world.insert_resource(GameStage::Loading(1));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        const MOVEMENT: &[TickKind] = &[TickKind::Movement];
        const ENEMY: &[TickKind] = &[TickKind::Enemy];
        const CONTACT: &[TickKind] = &[TickKind::Movement, TickKind::Enemy];
        const ANIMATION: &[TickKind] = &[TickKind::Animation];
        const EXPIRY: &[TickKind] = &[TickKind::PowerExpiry];

        schedule.add_systems(
            (
                player_movement_system.run_if(on_tick(MOVEMENT)).run_if(is_playing),
                item_system.run_if(on_tick(MOVEMENT)).run_if(is_playing),
                enemy_movement_system.run_if(on_tick(ENEMY)).run_if(is_playing),
                enemy_collision_system.run_if(on_tick(CONTACT)).run_if(is_playing),
                mouth_animation_system.run_if(on_tick(ANIMATION)).run_if(is_playing),
                power_expiry_system.run_if(on_tick(EXPIRY)).run_if(is_playing),
                hud_system,
            )
                .chain(),
        );
    }

    /// Applies a discrete input command.
    ///
    /// Direction requests are buffered and take effect on the next movement tick.
    pub fn handle_command(&mut self, command: GameCommand) -> GameResult<()> {
        match command {
            GameCommand::MovePlayer(_) => {
                if !self.stage().is_terminal() {
                    self.world.resource_mut::<Events<GameEvent>>().send(command.into());
                }
            }
            GameCommand::TogglePause => {
                if !self.stage().is_terminal() {
                    self.paused = !self.paused;
                    info!(paused = self.paused, "Pause toggled");
                }
            }
            GameCommand::ToggleMute => {
                self.muted = !self.muted;
                self.sinks.audio.set_muted(self.muted);
                debug!(muted = self.muted, "Mute toggled");
            }
            GameCommand::Restart => self.restart()?,
            GameCommand::Exit => {
                info!("Exit requested");
                self.exit_requested = true;
                self.teardown();
            }
        }
        Ok(())
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Every tick that falls due inside the window runs in order; the notifications
    /// each one produces reach the sinks before the next one starts.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Map` if the next level fails validation.
    pub fn tick(&mut self, dt: f32) -> GameResult<()> {
        self.input.run(&mut self.world);

        if !self.paused {
            self.world.resource_mut::<TickClock>().advance(dt);
        }

        while let Some(kind) = self.world.resource_mut::<TickClock>().next_due() {
            formatter::increment_tick();
            self.schedule.run(&mut self.world);
            self.dispatch();
            self.resolve_stage(kind)?;
        }

        self.world.resource_mut::<Events<GameEvent>>().update();
        self.sinks.render.present();
        Ok(())
    }

    /// Handles the stage transitions the systems request.
    fn resolve_stage(&mut self, kind: TickKind) -> GameResult<()> {
        if *self.world.resource::<GameStage>() != GameStage::LevelCleared {
            return Ok(());
        }

        let cleared = self.world.resource::<LevelState>().number;
        if cleared >= layout::final_level() {
            info!(level = cleared, score = self.score(), "All levels cleared");
            self.world.insert_resource(GameStage::Won);
            self.world.resource_mut::<TickClock>().stop();
            self.world
                .resource_mut::<Events<RenderEvent>>()
                .send(RenderEvent::Overlay(Overlay::Won));
        } else {
            debug!(level = cleared, tick = kind.as_ref(), "Advancing to next level");
            self.world.resource_mut::<Events<AudioEvent>>().send(AudioEvent::LevelUp);
            load_level(&mut self.world, cleared + 1, self.config.player_step)?;
        }
        self.dispatch();
        Ok(())
    }

    /// Hands every pending notification to the sinks.
    fn dispatch(&mut self) {
        for event in self.world.resource_mut::<Events<ScoreChanged>>().drain() {
            self.sinks.scores.update_score(event.0);
        }
        for event in self.world.resource_mut::<Events<AudioEvent>>().drain() {
            self.sinks.audio.play(event);
        }
        for event in self.world.resource_mut::<Events<RenderEvent>>().drain() {
            self.sinks.render.render(&event);
        }
        for event in self.world.resource_mut::<Events<BoardCleared>>().drain() {
            debug!(level = event.level, "Board cleared notification");
        }
    }

    /// Starts a fresh run from level 1 with the configured lives and zero score.
    pub fn restart(&mut self) -> GameResult<()> {
        info!("Restarting run");
        self.paused = false;
        self.world.insert_resource(ScoreResource(0));
        self.world.insert_resource(Lives(self.config.starting_lives));
        self.world.resource_mut::<TickClock>().restart();
        self.world.resource_mut::<Events<GameEvent>>().clear();
        self.world.resource_mut::<Events<ScoreChanged>>().send(ScoreChanged(0));
        load_level(&mut self.world, 1, self.config.player_step)?;
        self.dispatch();
        Ok(())
    }

    /// Stops every ticker; nothing mutates the world afterwards until a restart.
    pub fn teardown(&mut self) {
        let mut clock = self.world.resource_mut::<TickClock>();
        if !clock.is_stopped() {
            clock.stop();
            debug!("Tick clock stopped");
        }
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn outcome(&self) -> Outcome {
        self.stage().outcome()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn lives(&self) -> u8 {
        self.world.resource::<Lives>().0
    }

    pub fn level(&self) -> u8 {
        self.world.resource::<LevelState>().number
    }

    pub fn power_active(&self) -> bool {
        self.world.resource::<PowerMode>().active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn clock(&self) -> &TickClock {
        self.world.resource::<TickClock>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access, for tooling and tests that stage specific situations.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
