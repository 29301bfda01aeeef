//! Character-cell renderer.
//!
//! The playfield is sampled onto a grid of [`COLUMNS`] x [`ROWS`] cells, each one
//! covering [`CELL_WIDTH`] x [`CELL_HEIGHT`] board units, with the HUD on the line above.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use glam::Vec2;
use thousands::Separable;
use tracing::warn;

use crate::constants::BOARD_SIZE;
use crate::events::{Actor, EnemyId, Hud, ItemId, ItemKind, Overlay, RenderEvent};
use crate::map::geometry::{Rect, Wall};
use crate::map::layout::{Rgb, Theme};
use crate::sinks::RenderSink;

pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;
pub const COLUMNS: usize = (BOARD_SIZE / CELL_WIDTH) as usize;
pub const ROWS: usize = (BOARD_SIZE / CELL_HEIGHT) as usize;

const PELLET_COLOR: Color = Color::Rgb { r: 255, g: 220, b: 180 };
const POWER_UP_COLOR: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const PLAYER_COLOR: Color = Color::Rgb { r: 255, g: 255, b: 0 };
const ENEMY_COLOR: Color = Color::Rgb { r: 255, g: 80, b: 80 };
const VULNERABLE_COLOR: Color = Color::Rgb { r: 60, g: 90, b: 255 };
const BOSS_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 255 };
const TEXT_COLOR: Color = Color::Rgb { r: 230, g: 230, b: 230 };

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub position: Vec2,
    pub visible: bool,
    pub vulnerable: bool,
    pub boss: bool,
}

/// Everything the renderer has been told so far.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub level: u8,
    pub theme: Option<Theme>,
    pub walls: Vec<Wall>,
    pub items: BTreeMap<ItemId, (ItemKind, Rect)>,
    pub player: Option<Vec2>,
    pub facing: f32,
    pub mouth_open: bool,
    pub enemies: BTreeMap<EnemyId, EnemyView>,
    pub hud: Option<Hud>,
    pub overlay: Option<Overlay>,
}

impl Scene {
    pub fn apply(&mut self, event: &RenderEvent) {
        match event {
            RenderEvent::MazeBuilt { level, theme, walls } => {
                self.level = *level;
                self.theme = Some(*theme);
                self.walls = walls.clone();
                self.items.clear();
                self.enemies.clear();
            }
            RenderEvent::ItemAdded { id, kind, bounds } => {
                self.items.insert(*id, (*kind, *bounds));
            }
            RenderEvent::ItemRemoved { id } => {
                self.items.remove(id);
            }
            RenderEvent::EntityMoved { actor, position } => match actor {
                Actor::Player => self.player = Some(*position),
                Actor::Enemy(id) => {
                    self.enemies
                        .entry(*id)
                        .or_insert(EnemyView {
                            position: *position,
                            visible: true,
                            vulnerable: false,
                            boss: false,
                        })
                        .position = *position;
                }
            },
            RenderEvent::EnemyVisibility { id, visible, boss } => {
                if let Some(enemy) = self.enemies.get_mut(id) {
                    enemy.visible = *visible;
                    enemy.boss = *boss;
                }
            }
            RenderEvent::EnemyVulnerability { id, vulnerable } => {
                if let Some(enemy) = self.enemies.get_mut(id) {
                    enemy.vulnerable = *vulnerable;
                }
            }
            RenderEvent::PlayerFacing { angle } => self.facing = *angle,
            RenderEvent::MouthToggled { open } => self.mouth_open = *open,
            RenderEvent::Hud(hud) => self.hud = Some(hud.clone()),
            RenderEvent::Overlay(overlay) => {
                self.overlay = (*overlay != Overlay::Hidden).then_some(*overlay);
            }
        }
    }

    /// The glyph for the player, pointing its mouth along the facing angle.
    pub fn player_glyph(&self) -> char {
        if !self.mouth_open {
            return 'O';
        }
        match self.facing.rem_euclid(360.0).round() as u32 {
            90 => '^',
            180 => '>',
            270 => 'v',
            _ => '<',
        }
    }

    /// Samples the scene onto the character grid.
    pub fn rasterize(&self) -> Vec<Vec<(char, Color)>> {
        let blank = (' ', TEXT_COLOR);
        let mut grid = vec![vec![blank; COLUMNS]; ROWS];

        let wall_color = self.theme.map_or(Color::Grey, |theme| color(theme.wall));
        for row in 0..ROWS {
            for column in 0..COLUMNS {
                let cell = Rect::new(
                    column as f32 * CELL_WIDTH,
                    row as f32 * CELL_HEIGHT,
                    CELL_WIDTH,
                    CELL_HEIGHT,
                );
                if self.walls.iter().any(|wall| wall.intersects(&cell)) {
                    grid[row][column] = ('#', wall_color);
                }
            }
        }

        let mut plot = |point: Vec2, glyph: char, color: Color| {
            let column = (point.x / CELL_WIDTH).floor();
            let row = (point.y / CELL_HEIGHT).floor();
            if (0.0..COLUMNS as f32).contains(&column) && (0.0..ROWS as f32).contains(&row) {
                grid[row as usize][column as usize] = (glyph, color);
            }
        };

        for (kind, bounds) in self.items.values() {
            match kind {
                ItemKind::Pellet => plot(bounds.center(), '.', PELLET_COLOR),
                ItemKind::PowerUp => plot(bounds.center(), 'o', POWER_UP_COLOR),
            }
        }
        if let Some(player) = self.player {
            plot(player, self.player_glyph(), PLAYER_COLOR);
        }
        for enemy in self.enemies.values().filter(|enemy| enemy.visible) {
            let (glyph, color) = match (enemy.boss, enemy.vulnerable) {
                (true, _) => ('B', BOSS_COLOR),
                (false, true) => ('w', VULNERABLE_COLOR),
                (false, false) => ('M', ENEMY_COLOR),
            };
            plot(enemy.position, glyph, color);
        }
        grid
    }

    pub fn hud_line(&self) -> String {
        match &self.hud {
            Some(hud) => format!(
                "Level {} ({})   Score {}   Lives {}",
                hud.level,
                hud.theme,
                hud.score.separate_with_commas(),
                hud.lives
            ),
            None => String::new(),
        }
    }

    pub fn overlay_text(&self) -> Option<&'static str> {
        match self.overlay? {
            Overlay::Hidden => None,
            Overlay::GameOver => Some(" GAME OVER - press r to restart "),
            Overlay::Won => Some(" YOU WIN - press r to play again "),
        }
    }
}

/// Draws the scene to a terminal, once per frame and only when something changed.
pub struct TerminalRenderer<W: Write> {
    out: W,
    scene: Scene,
    dirty: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            scene: Scene::default(),
            dirty: true,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn draw(&mut self) -> io::Result<()> {
        let background = self.scene.theme.map_or(Color::Black, |theme| color(theme.background));
        queue!(
            self.out,
            SetBackgroundColor(background),
            Clear(ClearType::All),
            MoveTo(0, 0),
            SetForegroundColor(TEXT_COLOR),
            Print(self.scene.hud_line())
        )?;

        for (row, cells) in self.scene.rasterize().into_iter().enumerate() {
            queue!(self.out, MoveTo(0, row as u16 + 1))?;
            let mut current = None;
            for (glyph, fg) in cells {
                if current != Some(fg) {
                    queue!(self.out, SetForegroundColor(fg))?;
                    current = Some(fg);
                }
                queue!(self.out, Print(glyph))?;
            }
        }

        if let Some(text) = self.scene.overlay_text() {
            let column = COLUMNS.saturating_sub(text.len()) / 2;
            queue!(
                self.out,
                MoveTo(column as u16, ROWS as u16 / 2 + 1),
                SetBackgroundColor(Color::Black),
                SetForegroundColor(Color::White),
                Print(text)
            )?;
        }

        queue!(
            self.out,
            ResetColor,
            MoveTo(0, ROWS as u16 + 1),
            Print("arrows/wasd move  p pause  m mute  r restart  q quit")
        )?;
        self.out.flush()
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render(&mut self, event: &RenderEvent) {
        self.scene.apply(event);
        self.dirty = true;
    }

    fn present(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        if let Err(e) = self.draw() {
            warn!("Failed to draw frame: {}", e);
        }
    }
}
