#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::query::With;
use glam::Vec2;
use mazechase::config::GameConfig;
use mazechase::events::{AudioEvent, RenderEvent};
use mazechase::game::Game;
use mazechase::map::geometry::{Rect, Wall};
use mazechase::map::layout;
use mazechase::map::maze::Maze;
use mazechase::sinks::{AudioSink, RenderSink, ScoreSink, Sinks};
use mazechase::systems::{Enemy, PlayerControlled, Position};

/// Shared logs of everything the game pushed to its sinks.
#[derive(Clone, Default)]
pub struct Recorder {
    pub render: Rc<RefCell<Vec<RenderEvent>>>,
    pub audio: Rc<RefCell<Vec<AudioEvent>>>,
    pub scores: Rc<RefCell<Vec<u32>>>,
}

struct RecordingRender(Rc<RefCell<Vec<RenderEvent>>>);
struct RecordingAudio(Rc<RefCell<Vec<AudioEvent>>>);
struct RecordingScores(Rc<RefCell<Vec<u32>>>);

impl RenderSink for RecordingRender {
    fn render(&mut self, event: &RenderEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

impl AudioSink for RecordingAudio {
    fn pellet_eaten(&mut self) {
        self.0.borrow_mut().push(AudioEvent::PelletEaten);
    }
    fn power_up_collected(&mut self) {
        self.0.borrow_mut().push(AudioEvent::PowerUpCollected);
    }
    fn level_up(&mut self) {
        self.0.borrow_mut().push(AudioEvent::LevelUp);
    }
    fn player_death(&mut self) {
        self.0.borrow_mut().push(AudioEvent::PlayerDeath);
    }
}

impl ScoreSink for RecordingScores {
    fn update_score(&mut self, score: u32) {
        self.0.borrow_mut().push(score);
    }
}

impl Recorder {
    pub fn sinks(&self) -> Sinks {
        Sinks {
            render: Box::new(RecordingRender(self.render.clone())),
            audio: Box::new(RecordingAudio(self.audio.clone())),
            scores: Box::new(RecordingScores(self.scores.clone())),
        }
    }

    pub fn render_count(&self, matches: impl Fn(&RenderEvent) -> bool) -> usize {
        self.render.borrow().iter().filter(|event| matches(event)).count()
    }

    pub fn clear(&self) {
        self.render.borrow_mut().clear();
        self.audio.borrow_mut().clear();
        self.scores.borrow_mut().clear();
    }
}

pub fn create_test_game(starting_lives: u8) -> (Game, Recorder) {
    let recorder = Recorder::default();
    let config = GameConfig {
        starting_lives,
        ..GameConfig::default()
    };
    let game = Game::new(config, recorder.sinks()).expect("level 1 should load");
    (game, recorder)
}

/// A playfield with only the outer border.
pub fn open_maze() -> Maze {
    maze_with(&[])
}

/// The outer border plus `extra` walls.
pub fn maze_with(extra: &[Wall]) -> Maze {
    let border = [
        Rect::new(0.0, 0.0, 600.0, 20.0),
        Rect::new(0.0, 580.0, 600.0, 20.0),
        Rect::new(0.0, 0.0, 20.0, 600.0),
        Rect::new(580.0, 0.0, 20.0, 600.0),
    ];
    Maze::new(border.into_iter().chain(extra.iter().copied()), layout::LEVELS[0].theme)
}

pub fn set_player_position(game: &mut Game, corner: Vec2) {
    let world = game.world_mut();
    for mut position in world
        .query_filtered::<&mut Position, With<PlayerControlled>>()
        .iter_mut(world)
    {
        position.0 = corner;
    }
}

pub fn player_position(game: &mut Game) -> Vec2 {
    let world = game.world_mut();
    world
        .query_filtered::<&Position, With<PlayerControlled>>()
        .iter(world)
        .next()
        .map(|position| position.0)
        .expect("player exists")
}

/// Every enemy as (enemy, top-left corner), in id order.
pub fn enemies(game: &mut Game) -> Vec<(Enemy, Vec2)> {
    let world = game.world_mut();
    let mut enemies: Vec<(Enemy, Vec2)> = world
        .query::<(&Enemy, &Position)>()
        .iter(world)
        .map(|(enemy, position)| (*enemy, position.0))
        .collect();
    enemies.sort_by_key(|(enemy, _)| enemy.id);
    enemies
}

pub fn set_enemy_position(game: &mut Game, index: usize, corner: Vec2) {
    let world = game.world_mut();
    for (enemy, mut position) in world.query::<(&Enemy, &mut Position)>().iter_mut(world) {
        if usize::from(enemy.id.0) == index {
            position.0 = corner;
        }
    }
}
