use glam::Vec2;
use strum_macros::{AsRefStr, EnumIter};

/// The four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True for Up and Down.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Whether turning from `self` to `other` changes the axis of travel.
    pub const fn is_perpendicular(self, other: Direction) -> bool {
        self.is_vertical() != other.is_vertical()
    }

    /// Unit vector in screen space (y grows downward).
    pub fn as_vec2(self) -> Vec2 {
        self.into()
    }

    /// Rotation of the player sprite, in degrees, when facing this way.
    pub const fn angle(self) -> f32 {
        match self {
            Direction::Up => 270.0,
            Direction::Down => 90.0,
            Direction::Left => 180.0,
            Direction::Right => 0.0,
        }
    }
}

impl From<Direction> for Vec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -Vec2::Y,
            Direction::Down => Vec2::Y,
            Direction::Left => -Vec2::X,
            Direction::Right => Vec2::X,
        }
    }
}
