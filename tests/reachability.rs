use std::collections::BTreeSet;

use glam::Vec2;
use mazechase::map::builder::LevelPlan;
use mazechase::map::geometry::{Cell, Rect};
use mazechase::map::layout;
use mazechase::map::reachability::{candidate_cells, compute_reachable, nearest_cell};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn plan(number: u8) -> LevelPlan {
    LevelPlan::new(layout::level(number).expect("level exists")).expect("level is valid")
}

#[test]
fn test_collectible_counts_per_level() {
    let expected = [(1, 256, 2), (2, 224, 3), (3, 228, 4)];
    for (number, pellets, power_ups) in expected {
        let plan = plan(number);
        assert_eq!(plan.placement.pellets.len(), pellets, "pellets on level {number}");
        assert_eq!(plan.placement.power_ups.len(), power_ups, "power-ups on level {number}");
    }
}

#[test]
fn test_power_ups_snap_to_nearest_reachable_cell() {
    assert_eq!(
        plan(3).placement.power_ups,
        vec![
            Cell::new(35, 545),
            Cell::new(545, 545),
            Cell::new(545, 35),
            Cell::new(35, 35),
        ]
    );
}

#[test]
fn test_collectibles_lie_in_reachable_set() {
    for number in 1..=layout::final_level() {
        let placement = plan(number).placement;
        for cell in placement.pellets.iter().chain(&placement.power_ups) {
            assert_that(&placement.reachable.contains(cell)).is_true();
        }
        for cell in &placement.power_ups {
            assert_that(&placement.pellets.contains(cell)).is_false();
        }
        assert_eq!(
            placement.pellets.len() + placement.power_ups.len(),
            placement.reachable.len()
        );
    }
}

#[test]
fn test_reachability_is_idempotent() {
    let plan = plan(2);
    let candidates = candidate_cells(&plan.maze, Vec2::splat(30.0));
    let reachable = &plan.placement.reachable;

    // Starting anywhere inside the component yields the same component
    for start in reachable.iter().step_by(37) {
        assert_eq!(&compute_reachable(&candidates, *start), reachable);
    }
    assert_eq!(&compute_reachable(reachable, *reachable.iter().next().unwrap()), reachable);
}

#[test]
fn test_disconnected_start_reaches_nothing() {
    let candidates: BTreeSet<Cell> = [Cell::new(35, 35), Cell::new(65, 35)].into_iter().collect();
    assert_that(&compute_reachable(&candidates, Cell::new(95, 95)).is_empty()).is_true();
    assert_eq!(compute_reachable(&candidates, Cell::new(35, 35)).len(), 2);
}

#[test]
fn test_nearest_cell_prefers_first_on_tie() {
    let cells = [Cell::new(35, 545), Cell::new(65, 545)];
    assert_eq!(nearest_cell(&cells, Vec2::new(50.0, 550.0)), Some(Cell::new(35, 545)));
    assert_eq!(nearest_cell(&[] as &[Cell], Vec2::ZERO), None);
}

#[test]
fn test_walled_in_pocket_gets_no_pellets() {
    // A closed box in the open maze; its inside is a candidate but is not reachable
    let maze = common::maze_with(&[
        Rect::new(200.0, 200.0, 100.0, 10.0),
        Rect::new(200.0, 290.0, 100.0, 10.0),
        Rect::new(200.0, 200.0, 10.0, 100.0),
        Rect::new(290.0, 200.0, 10.0, 100.0),
    ]);
    let candidates = candidate_cells(&maze, Vec2::splat(30.0));
    let inside = Cell::new(245, 245);
    assert_that(&candidates.contains(&inside)).is_true();

    let reachable = compute_reachable(&candidates, Cell::new(35, 35));
    assert_that(&reachable.contains(&inside)).is_false();
    assert_that(&reachable.is_empty()).is_false();
}
