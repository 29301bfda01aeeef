use bevy_ecs::resource::Resource;
use glam::Vec2;

use crate::constants::{BOARD_SIZE, BORDER, COLLISION_INSET};
use crate::map::geometry::{Rect, Wall};
use crate::map::layout::Theme;

/// The wall arena of the level being played.
///
/// Replaced wholesale on every level load; walls never change while a level runs.
#[derive(Resource, Debug, Clone)]
pub struct Maze {
    walls: Vec<Wall>,
    pub theme: Theme,
}

impl Maze {
    pub fn new(walls: impl IntoIterator<Item = Wall>, theme: Theme) -> Self {
        Self {
            walls: walls.into_iter().collect(),
            theme,
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Whether a body occupying `rect` fits inside the playfield without touching a wall.
    ///
    /// The border test uses the full rectangle; the wall test uses the rectangle shrunk
    /// by [`COLLISION_INSET`] so grazing contact is tolerated.
    pub fn is_free(&self, rect: Rect) -> bool {
        if rect.x < BORDER || rect.y < BORDER {
            return false;
        }
        if rect.right() > BOARD_SIZE - BORDER || rect.bottom() > BOARD_SIZE - BORDER {
            return false;
        }

        let body = rect.shrink(COLLISION_INSET);
        !self.walls.iter().any(|wall| wall.intersects(&body))
    }

    /// Convenience form of [`Maze::is_free`] for a body at `corner` with `size`.
    pub fn fits(&self, corner: Vec2, size: Vec2) -> bool {
        self.is_free(Rect::from_corner(corner, size))
    }
}
