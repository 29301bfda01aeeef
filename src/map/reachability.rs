//! Decides where collectibles may be placed.
//!
//! Candidate cells sit on a coarse grid; a cell qualifies when a player-sized
//! body centred on it fits the maze. Only candidates connected to the player's
//! spawn through 4-neighbour steps receive pellets, so every collectible is
//! guaranteed to be collectable.

use std::collections::BTreeSet;

use glam::Vec2;
use pathfinding::prelude::bfs_reach;
use tracing::trace;

use crate::constants::items::{PELLET_ORIGIN, PELLET_SPACING};
use crate::constants::{BOARD_SIZE, BORDER};
use crate::map::geometry::{Cell, Rect};
use crate::map::maze::Maze;

/// Every pellet-grid centre where a body of size `body` fits, in row-major order.
pub fn candidate_cells(maze: &Maze, body: Vec2) -> BTreeSet<Cell> {
    let limit = (BOARD_SIZE - BORDER) as i32;
    let axis = || (PELLET_ORIGIN..limit).step_by(PELLET_SPACING as usize);

    axis()
        .flat_map(|y| axis().map(move |x| Cell::new(x, y)))
        .filter(|cell| maze.is_free(Rect::centered(cell.as_vec2(), body)))
        .collect()
}

/// The cell closest to `point` by Manhattan distance; ties go to the first cell in iteration order.
pub fn nearest_cell<'a>(cells: impl IntoIterator<Item = &'a Cell>, point: Vec2) -> Option<Cell> {
    let target = Cell::new(point.x.round() as i32, point.y.round() as i32);
    cells.into_iter().copied().min_by_key(|cell| cell.manhattan(&target))
}

/// All candidates connected to `start` through 4-neighbour steps at the pellet spacing.
///
/// An empty set is returned when `start` is not itself a candidate.
pub fn compute_reachable(candidates: &BTreeSet<Cell>, start: Cell) -> BTreeSet<Cell> {
    if !candidates.contains(&start) {
        return BTreeSet::new();
    }

    let reachable: BTreeSet<Cell> = bfs_reach(start, |cell| {
        cell.neighbors(PELLET_SPACING)
            .into_iter()
            .filter(|next| candidates.contains(next))
    })
    .collect();

    trace!(
        candidates = candidates.len(),
        reachable = reachable.len(),
        start = ?start,
        "Reachability computed"
    );
    reachable
}

/// Where a level's collectibles go.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub reachable: BTreeSet<Cell>,
    /// Cells holding pellets (reachable cells minus power-up cells).
    pub pellets: Vec<Cell>,
    /// Snapped power-up cells, in the order the level lists them; duplicates are dropped.
    pub power_ups: Vec<Cell>,
}

/// Computes pellet and power-up cells for `maze` given where the player starts.
///
/// `power_ups` are nominal top-left corners of power-up boxes of `power_up_size`.
pub fn plan_placement(
    maze: &Maze,
    player_spawn_center: Vec2,
    body: Vec2,
    power_ups: impl IntoIterator<Item = Vec2>,
    power_up_size: f32,
) -> Placement {
    let candidates = candidate_cells(maze, body);
    let reachable = nearest_cell(&candidates, player_spawn_center)
        .map(|start| compute_reachable(&candidates, start))
        .unwrap_or_default();

    let mut snapped: Vec<Cell> = Vec::new();
    for corner in power_ups {
        let center = corner + Vec2::splat(power_up_size / 2.0);
        if let Some(cell) = nearest_cell(&reachable, center) {
            if !snapped.contains(&cell) {
                snapped.push(cell);
            }
        }
    }

    let pellets = reachable.iter().copied().filter(|cell| !snapped.contains(cell)).collect();

    Placement {
        reachable,
        pellets,
        power_ups: snapped,
    }
}
