use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res},
};
use glam::Vec2;
use tracing::trace;

use crate::constants::body::LANE_TOLERANCE;
use crate::constants::{BOARD_SIZE, BORDER, GRID_STEP};
use crate::events::{Actor, GameCommand, GameEvent, RenderEvent};
use crate::map::direction::Direction;
use crate::map::maze::Maze;
use crate::systems::{BodySize, PlayerAnimation, PlayerControlled, Position, Speed, Steering};

/// What one movement tick did to the player.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Set when the buffered heading was committed this tick.
    pub turned: Option<Direction>,
    pub moved: bool,
}

/// Buffers the most recent direction request on the player.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut players: Query<&mut Steering, With<PlayerControlled>>,
) {
    for event in events.read() {
        let GameEvent::Command(GameCommand::MovePlayer(direction)) = event else {
            continue;
        };
        for mut steering in players.iter_mut() {
            if steering.desired != Some(*direction) {
                trace!(direction = direction.as_ref(), "Direction buffered");
                steering.desired = Some(*direction);
            }
        }
    }
}

/// Moves the player one step, turning first if the buffered heading allows it.
pub fn player_movement_system(
    maze: Res<Maze>,
    mut players: Query<
        (&mut Position, &BodySize, &mut Steering, &Speed, &mut PlayerAnimation),
        With<PlayerControlled>,
    >,
    mut render: EventWriter<RenderEvent>,
) {
    for (mut position, size, mut steering, speed, mut animation) in players.iter_mut() {
        let outcome = advance_player(&maze, &mut position.0, size.0, &mut steering, speed.0);

        if let Some(direction) = outcome.turned {
            animation.facing = direction;
            render.write(RenderEvent::PlayerFacing {
                angle: direction.angle(),
            });
        }
        if outcome.moved {
            render.write(RenderEvent::EntityMoved {
                actor: Actor::Player,
                position: position.0,
            });
        }
    }
}

/// Flips the player's mouth on every animation tick.
pub fn mouth_animation_system(
    mut players: Query<&mut PlayerAnimation, With<PlayerControlled>>,
    mut render: EventWriter<RenderEvent>,
) {
    for mut animation in players.iter_mut() {
        animation.mouth_open = !animation.mouth_open;
        render.write(RenderEvent::MouthToggled {
            open: animation.mouth_open,
        });
    }
}

/// Runs the steering state machine for one tick.
///
/// 1. A buffered heading on a new axis first pulls the body onto the nearest lane.
/// 2. Once aligned, the heading is committed if the first step that way is open.
/// 3. The body then steps along the current heading, X before Y, so blocked axes slide.
///    If nothing moves the heading is cleared, leaving the buffered one intact.
pub fn advance_player(maze: &Maze, position: &mut Vec2, size: Vec2, steering: &mut Steering, step: f32) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    if let Some(desired) = steering.desired {
        if steering.current != Some(desired) {
            let needs_lane = steering.current.is_none_or(|current| current.is_perpendicular(desired));
            let aligned = !needs_lane || snap_to_lane(maze, position, size, desired, step);

            if aligned && maze.fits(*position + desired.as_vec2() * step, size) {
                trace!(from = ?steering.current, to = desired.as_ref(), "Heading committed");
                steering.current = Some(desired);
                outcome.turned = Some(desired);
            }
        }
    }

    let Some(current) = steering.current else {
        return outcome;
    };

    let delta = current.as_vec2() * step;
    let target = Vec2::new(
        (position.x + delta.x).clamp(BORDER, BOARD_SIZE - BORDER - size.x),
        (position.y + delta.y).clamp(BORDER, BOARD_SIZE - BORDER - size.y),
    );

    let mut next = *position;
    if maze.fits(Vec2::new(target.x, next.y), size) {
        next.x = target.x;
    }
    if maze.fits(Vec2::new(next.x, target.y), size) {
        next.y = target.y;
    }

    if next == *position {
        steering.current = None;
    } else {
        *position = next;
        outcome.moved = true;
    }
    outcome
}

/// Nudges the coordinate across the travel axis of `heading` toward the nearest lane.
///
/// Returns whether the body now sits on a lane.
fn snap_to_lane(maze: &Maze, position: &mut Vec2, size: Vec2, heading: Direction, step: f32) -> bool {
    let value = *off_axis(position, heading);
    let lane = (value / GRID_STEP).round() * GRID_STEP;
    let deviation = value - lane;

    let mut candidate = *position;
    if deviation.abs() <= LANE_TOLERANCE {
        *off_axis(&mut candidate, heading) = lane;
    } else {
        *off_axis(&mut candidate, heading) -= deviation.clamp(-step / 2.0, step / 2.0);
    }

    if candidate != *position && maze.fits(candidate, size) {
        *position = candidate;
    }

    (*off_axis(position, heading) - lane).abs() <= LANE_TOLERANCE
}

/// The coordinate perpendicular to travel along `heading`.
fn off_axis(position: &mut Vec2, heading: Direction) -> &mut f32 {
    if heading.is_vertical() {
        &mut position.x
    } else {
        &mut position.y
    }
}
