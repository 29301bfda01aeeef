use glam::Vec2;
use mazechase::map::geometry::Rect;
use mazechase::map::layout;
use mazechase::map::maze::Maze;
use speculoos::prelude::*;

mod common;

fn level_one() -> Maze {
    let config = layout::level(1).expect("level 1 exists");
    Maze::new(config.walls.iter().copied(), config.theme)
}

const BODY: Vec2 = Vec2::splat(30.0);

#[test]
fn test_touching_edges_do_not_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_that(&a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0))).is_false();
    assert_that(&a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0))).is_false();
    assert_that(&a.intersects(&Rect::new(9.9, 9.9, 10.0, 10.0))).is_true();
}

#[test]
fn test_border_uses_full_rectangle() {
    let maze = common::open_maze();
    assert_that(&maze.fits(Vec2::new(20.0, 100.0), BODY)).is_true();
    assert_that(&maze.fits(Vec2::new(19.0, 100.0), BODY)).is_false();
    assert_that(&maze.fits(Vec2::new(550.0, 100.0), BODY)).is_true();
    assert_that(&maze.fits(Vec2::new(551.0, 100.0), BODY)).is_false();
    assert_that(&maze.fits(Vec2::new(100.0, 551.0), BODY)).is_false();
}

#[test]
fn test_grazing_a_wall_is_tolerated() {
    let maze = level_one();
    // Wall at (80, 80); a body ending at 81 only grazes it
    assert_that(&maze.fits(Vec2::new(50.0, 50.0), BODY)).is_true();
    assert_that(&maze.fits(Vec2::new(51.0, 51.0), BODY)).is_true();
    assert_that(&maze.fits(Vec2::new(52.0, 52.0), BODY)).is_false();
    assert_that(&maze.fits(Vec2::new(60.0, 60.0), BODY)).is_false();
}

#[test]
fn test_is_free_matches_fits() {
    let maze = level_one();
    for corner in [Vec2::new(40.0, 140.0), Vec2::new(90.0, 90.0), Vec2::new(300.0, 300.0)] {
        assert_that(&maze.is_free(Rect::from_corner(corner, BODY))).is_equal_to(maze.fits(corner, BODY));
    }
}
