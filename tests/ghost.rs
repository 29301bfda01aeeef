use glam::Vec2;
use mazechase::events::EnemyId;
use mazechase::map::geometry::{Cell, Rect};
use mazechase::systems::{open_neighbors, plan_step, recover, Behavior, Enemy};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const BODY: Vec2 = Vec2::splat(30.0);
const STEP: i32 = 10;

fn enemy(vulnerable: bool, boss: bool) -> Enemy {
    Enemy {
        id: EnemyId(0),
        step: STEP,
        active: true,
        vulnerable,
        boss,
    }
}

#[test]
fn test_behavior_selection() {
    assert_eq!(Behavior::of(&enemy(false, false)), Behavior::Pursue);
    assert_eq!(Behavior::of(&enemy(true, false)), Behavior::Flee);
    assert_eq!(Behavior::of(&enemy(true, true)), Behavior::Pursue);
}

#[test]
fn test_pursuit_steps_toward_player() {
    let maze = common::open_maze();
    let plan = plan_step(
        &maze,
        Vec2::new(100.0, 100.0),
        BODY,
        STEP,
        Vec2::new(200.0, 100.0),
        Behavior::Pursue,
    )
    .expect("open maze always has a move");

    assert_eq!(plan.next, Cell::new(110, 100));
    assert_eq!(plan.recovered_from, None);
}

#[test]
fn test_pursuit_escapes_dead_end() {
    // A pocket open only at the top; the player waits below its floor
    let maze = common::maze_with(&[
        Rect::new(80.0, 100.0, 10.0, 110.0),
        Rect::new(150.0, 100.0, 10.0, 110.0),
        Rect::new(80.0, 200.0, 80.0, 10.0),
    ]);
    let player = Vec2::new(110.0, 260.0);
    let target = Cell::new(110, 260);
    let mut position = Vec2::new(110.0, 170.0);

    let mut steps = 0;
    while Cell::quantize(position, STEP) != target {
        let plan = plan_step(&maze, position, BODY, STEP, player, Behavior::Pursue).expect("never boxed in");
        assert_that(&maze.fits(plan.next.as_vec2(), BODY)).is_true();
        position = plan.next.as_vec2();
        steps += 1;
        assert_that(&steps).is_less_than_or_equal_to(39);
    }
    assert_eq!(steps, 39);
}

#[test]
fn test_flee_maximizes_distance() {
    let maze = common::open_maze();
    let plan = plan_step(
        &maze,
        Vec2::new(300.0, 300.0),
        BODY,
        STEP,
        Vec2::new(250.0, 300.0),
        Behavior::Flee,
    )
    .expect("open maze always has a move");

    // +x and both vertical moves tie at 60; +x is considered first
    assert_eq!(plan.next, Cell::new(310, 300));
}

#[test]
fn test_stuck_enemy_recovers_to_nearby_spot() {
    let maze = common::maze_with(&[Rect::new(100.0, 100.0, 40.0, 40.0)]);
    let stuck = Cell::new(100, 100);

    assert_eq!(recover(&maze, stuck, STEP, BODY), Some(Cell::new(70, 100)));

    let plan = plan_step(
        &maze,
        stuck.as_vec2(),
        BODY,
        STEP,
        Vec2::new(40.0, 100.0),
        Behavior::Pursue,
    )
    .expect("recovery spot exists");
    assert_eq!(plan.recovered_from, Some(stuck));
    assert_eq!(plan.next, Cell::new(60, 100));
}

#[test]
fn test_recovery_into_closed_slot_still_relocates() {
    // The enemy is buried in a block; a body-sized slot three steps to its right has no exits
    let maze = common::maze_with(&[
        Rect::new(60.0, 60.0, 70.0, 110.0),
        Rect::new(160.0, 60.0, 10.0, 110.0),
        Rect::new(130.0, 90.0, 30.0, 10.0),
        Rect::new(130.0, 130.0, 30.0, 10.0),
    ]);
    let stuck = Cell::new(100, 100);
    let slot = Cell::new(130, 100);

    assert_eq!(recover(&maze, stuck, STEP, BODY), Some(slot));
    assert_that(&open_neighbors(&maze, slot, STEP, BODY).is_empty()).is_true();

    let plan = plan_step(
        &maze,
        stuck.as_vec2(),
        BODY,
        STEP,
        Vec2::new(40.0, 40.0),
        Behavior::Pursue,
    )
    .expect("recovery spot exists");
    assert_eq!(plan.next, slot);
    assert_eq!(plan.recovered_from, Some(stuck));
}

#[test]
fn test_boxed_in_enemy_skips_its_tick() {
    let maze = common::maze_with(&[Rect::new(100.0, 100.0, 200.0, 200.0)]);
    let plan = plan_step(
        &maze,
        Vec2::new(180.0, 180.0),
        BODY,
        STEP,
        Vec2::new(40.0, 40.0),
        Behavior::Pursue,
    );
    assert_that(&plan).is_none();
}
