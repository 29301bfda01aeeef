//! Rectangles and grid cells.

use std::cmp::Ordering;

use glam::Vec2;
use smallvec::SmallVec;

/// An axis-aligned rectangle given by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Walls are plain rectangles.
pub type Wall = Rect;

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self::new(corner.x, corner.y, size.x, size.y)
    }

    /// A rectangle of `size` centred on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::from_corner(center - size / 2.0, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    /// Shrinks every side by `inset`, never letting an extent drop below 1.
    pub fn shrink(&self, inset: f32) -> Rect {
        Rect::new(
            self.x + inset,
            self.y + inset,
            (self.width - 2.0 * inset).max(1.0),
            (self.height - 2.0 * inset).max(1.0),
        )
    }
}

/// An integer grid coordinate, expressed in world units.
///
/// Ordering is row-major (y first, then x), which is the iteration order used
/// wherever ties between cells must be broken deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rounds a continuous position to the nearest multiple of `step` on each axis.
    pub fn quantize(position: Vec2, step: i32) -> Self {
        let step_f = step as f32;
        Self::new(
            (position.x / step_f).round() as i32 * step,
            (position.y / step_f).round() as i32 * step,
        )
    }

    pub fn manhattan(&self, other: &Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four cardinal neighbours `step` away, in the order +x, -x, +y, -y.
    pub fn neighbors(&self, step: i32) -> SmallVec<[Cell; 4]> {
        SmallVec::from_buf([
            Cell::new(self.x + step, self.y),
            Cell::new(self.x - step, self.y),
            Cell::new(self.x, self.y + step),
            Cell::new(self.x, self.y - step),
        ])
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9.5, 9.5, 1.0, 1.0)));
    }

    #[test]
    fn test_shrink_keeps_minimum_extent() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0).shrink(1.25);
        assert_eq!(r.width, 1.0);
        assert_eq!(r.height, 1.0);
    }

    #[test]
    fn test_quantize_rounds_half_away_from_zero() {
        assert_eq!(Cell::quantize(Vec2::new(45.0, 44.9), 10), Cell::new(50, 40));
    }

    #[test]
    fn test_cells_order_row_major() {
        assert!(Cell::new(90, 10) < Cell::new(10, 20));
        assert!(Cell::new(10, 20) < Cell::new(20, 20));
    }
}
