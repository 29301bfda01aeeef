use std::cmp::Reverse;

use bevy_ecs::{
    event::EventWriter,
    query::{With, Without},
    system::{Query, Res},
};
use glam::Vec2;
use pathfinding::prelude::bfs;
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::events::{Actor, RenderEvent};
use crate::map::geometry::Cell;
use crate::map::maze::Maze;
use crate::systems::{BodySize, Enemy, PlayerControlled, Position};

/// How many grid steps outward stuck recovery searches.
pub const RECOVERY_RADIUS: i32 = 3;

/// How an enemy picks its next cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Shortest path toward the player.
    Pursue,
    /// Greedy step away from the player.
    Flee,
}

impl Behavior {
    pub fn of(enemy: &Enemy) -> Self {
        if enemy.vulnerable && !enemy.boss {
            Behavior::Flee
        } else {
            Behavior::Pursue
        }
    }
}

/// Result of planning a single enemy tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    /// Cell to move to.
    pub next: Cell,
    /// Set when the enemy had to be relocated before it could move.
    pub recovered_from: Option<Cell>,
}

/// Neighbouring cells where an enemy body of `size` fits, in +x, -x, +y, -y order.
pub fn open_neighbors(maze: &Maze, cell: Cell, step: i32, size: Vec2) -> SmallVec<[Cell; 4]> {
    cell.neighbors(step)
        .into_iter()
        .filter(|next| maze.fits(next.as_vec2(), size))
        .collect()
}

/// Chooses the next cell for an enemy at `enemy_pos` given the player's position.
///
/// Returns `None` when the enemy is walled in and no recovery spot exists.
pub fn plan_step(
    maze: &Maze,
    enemy_pos: Vec2,
    size: Vec2,
    step: i32,
    player_pos: Vec2,
    behavior: Behavior,
) -> Option<StepPlan> {
    let mut from = Cell::quantize(enemy_pos, step);
    let target = Cell::quantize(player_pos, step);
    let mut recovered_from = None;

    let mut candidates = open_neighbors(maze, from, step, size);
    if candidates.is_empty() {
        let spot = recover(maze, from, step, size)?;
        recovered_from = Some(from);
        from = spot;
        candidates = open_neighbors(maze, from, step, size);
        if candidates.is_empty() {
            // The relocation alone is this tick's move
            return Some(StepPlan {
                next: spot,
                recovered_from,
            });
        }
    }

    let next = match behavior {
        Behavior::Pursue => pursue(maze, from, target, step, size, &candidates),
        Behavior::Flee => flee(target, &candidates),
    };

    Some(StepPlan { next, recovered_from })
}

/// First step of a shortest path to `target`, or the closest open neighbour when none exists.
fn pursue(maze: &Maze, from: Cell, target: Cell, step: i32, size: Vec2, candidates: &[Cell]) -> Cell {
    let path = bfs(&from, |cell| open_neighbors(maze, *cell, step, size), |cell| *cell == target);

    if let Some(next) = path.as_deref().and_then(|path| path.get(1)) {
        if candidates.contains(next) {
            return *next;
        }
    }

    // min_by_key keeps the first of equal candidates
    candidates
        .iter()
        .copied()
        .min_by_key(|cell| cell.manhattan(&target))
        .unwrap_or(from)
}

fn flee(threat: Cell, candidates: &[Cell]) -> Cell {
    candidates
        .iter()
        .copied()
        .min_by_key(|cell| Reverse(cell.manhattan(&threat)))
        .unwrap_or(threat)
}

/// The first spot within [`RECOVERY_RADIUS`] steps, scanning outward, where the body fits.
pub fn recover(maze: &Maze, from: Cell, step: i32, size: Vec2) -> Option<Cell> {
    (1..=RECOVERY_RADIUS)
        .flat_map(|radius| from.neighbors(step * radius))
        .find(|spot| maze.fits(spot.as_vec2(), size))
}

/// Advances every active enemy by one grid step.
pub fn enemy_movement_system(
    maze: Res<Maze>,
    players: Query<&Position, (With<PlayerControlled>, Without<Enemy>)>,
    mut enemies: Query<(&Enemy, &mut Position, &BodySize), Without<PlayerControlled>>,
    mut render: EventWriter<RenderEvent>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    for (enemy, mut position, size) in enemies.iter_mut() {
        if !enemy.active {
            continue;
        }

        let behavior = Behavior::of(enemy);
        let Some(plan) = plan_step(&maze, position.0, size.0, enemy.step, player.0, behavior) else {
            warn!(enemy = enemy.id.0, position = ?position.0, "Enemy boxed in; skipping tick");
            continue;
        };

        if let Some(stuck_at) = plan.recovered_from {
            warn!(enemy = enemy.id.0, from = ?stuck_at, "Enemy recovered from a blocked cell");
        }

        let next = plan.next.as_vec2();
        if next != position.0 {
            trace!(enemy = enemy.id.0, ?behavior, to = ?plan.next, "Enemy stepped");
            position.0 = next;
            render.write(RenderEvent::EntityMoved {
                actor: Actor::Enemy(enemy.id),
                position: next,
            });
        }
    }
}
