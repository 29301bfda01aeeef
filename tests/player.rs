use bevy_ecs::{event::Events, system::RunSystemOnce, world::World};
use glam::Vec2;
use mazechase::events::RenderEvent;
use mazechase::map::direction::Direction;
use mazechase::map::geometry::Rect;
use mazechase::systems::{advance_player, mouth_animation_system, PlayerAnimation, PlayerBundle, Steering};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const BODY: Vec2 = Vec2::splat(30.0);
const STEP: f32 = 5.0;

fn heading(desired: Direction) -> Steering {
    Steering {
        current: None,
        desired: Some(desired),
    }
}

#[test]
fn test_turn_from_rest_commits_and_moves() {
    let maze = common::open_maze();
    let mut position = Vec2::new(40.0, 140.0);
    let mut steering = heading(Direction::Right);

    let outcome = advance_player(&maze, &mut position, BODY, &mut steering, STEP);

    assert_eq!(outcome.turned, Some(Direction::Right));
    assert_that(&outcome.moved).is_true();
    assert_eq!(position, Vec2::new(45.0, 140.0));
    assert_eq!(steering.current, Some(Direction::Right));
}

#[test]
fn test_small_offset_snaps_onto_lane() {
    let maze = common::open_maze();
    let mut position = Vec2::new(40.0, 142.0);
    let mut steering = heading(Direction::Right);

    advance_player(&maze, &mut position, BODY, &mut steering, STEP);

    assert_eq!(position, Vec2::new(45.0, 140.0));
}

#[test]
fn test_large_offset_takes_several_ticks_to_align() {
    let maze = common::open_maze();
    let mut position = Vec2::new(40.0, 146.0);
    let mut steering = heading(Direction::Right);

    // Nudged half a step toward the lane at 150, not yet aligned
    let first = advance_player(&maze, &mut position, BODY, &mut steering, STEP);
    assert_eq!(first.turned, None);
    assert_that(&first.moved).is_false();
    assert_eq!(position, Vec2::new(40.0, 148.5));

    let second = advance_player(&maze, &mut position, BODY, &mut steering, STEP);
    assert_eq!(second.turned, Some(Direction::Right));
    assert_eq!(position, Vec2::new(45.0, 150.0));
}

#[test]
fn test_blocked_turn_stays_buffered_until_open() {
    // A ledge above the corridor ends at x = 120
    let maze = common::maze_with(&[Rect::new(20.0, 70.0, 100.0, 10.0)]);
    let mut position = Vec2::new(50.0, 80.0);
    let mut steering = Steering {
        current: Some(Direction::Right),
        desired: Some(Direction::Up),
    };

    let mut turned_at = None;
    for tick in 0..40 {
        let outcome = advance_player(&maze, &mut position, BODY, &mut steering, STEP);
        if outcome.turned.is_some() {
            turned_at = Some(tick);
            break;
        }
        assert_eq!(position.y, 80.0);
        assert_eq!(steering.desired, Some(Direction::Up));
    }

    assert_eq!(turned_at, Some(14));
    assert_eq!(steering.current, Some(Direction::Up));
    assert_eq!(position, Vec2::new(120.0, 75.0));
}

#[test]
fn test_hitting_a_wall_clears_heading_but_keeps_request() {
    let maze = common::open_maze();
    let mut position = Vec2::new(545.0, 100.0);
    let mut steering = Steering {
        current: Some(Direction::Right),
        desired: Some(Direction::Right),
    };

    // Clamped against the border on the first tick
    let outcome = advance_player(&maze, &mut position, BODY, &mut steering, STEP);
    assert_that(&outcome.moved).is_true();
    assert_eq!(position.x, 550.0);

    let outcome = advance_player(&maze, &mut position, BODY, &mut steering, STEP);
    assert_that(&outcome.moved).is_false();
    assert_eq!(steering.current, None);
    assert_eq!(steering.desired, Some(Direction::Right));

    // Still blocked: the request is kept but not committed
    let outcome = advance_player(&maze, &mut position, BODY, &mut steering, STEP);
    assert_eq!(outcome, Default::default());
    assert_eq!(position, Vec2::new(550.0, 100.0));
}

#[test]
fn test_moving_along_the_border() {
    let maze = common::open_maze();
    let mut position = Vec2::new(100.0, 550.0);
    let mut steering = Steering {
        current: Some(Direction::Left),
        desired: Some(Direction::Left),
    };

    let outcome = advance_player(&maze, &mut position, BODY, &mut steering, STEP);
    assert_that(&outcome.moved).is_true();
    assert_eq!(position, Vec2::new(95.0, 550.0));
}

#[test]
fn test_reverse_needs_no_lane_snap() {
    let maze = common::open_maze();
    let mut position = Vec2::new(100.0, 143.0);
    let mut steering = Steering {
        current: Some(Direction::Right),
        desired: Some(Direction::Left),
    };

    let outcome = advance_player(&maze, &mut position, BODY, &mut steering, STEP);
    assert_eq!(outcome.turned, Some(Direction::Left));
    assert_eq!(position, Vec2::new(95.0, 143.0));
}

#[test]
fn test_mouth_toggles_each_animation_tick() {
    let mut world = World::default();
    world.init_resource::<Events<RenderEvent>>();
    let player = world.spawn(PlayerBundle::new(Vec2::new(40.0, 140.0), STEP)).id();

    world
        .run_system_once(mouth_animation_system)
        .expect("System should run successfully");
    world
        .run_system_once(mouth_animation_system)
        .expect("System should run successfully");

    let animation = world.get::<PlayerAnimation>(player).expect("player has animation");
    assert_that(&animation.mouth_open).is_true();

    let events: Vec<RenderEvent> = world.resource_mut::<Events<RenderEvent>>().drain().collect();
    assert_eq!(
        events,
        vec![
            RenderEvent::MouthToggled { open: false },
            RenderEvent::MouthToggled { open: true },
        ]
    );
}
