//! Grid coordinates and cardinal directions.
//!
//! `(0, 0)` is the bottom-left tile; `x` grows east and `y` grows north, the
//! same frame the host reports agent positions in.  Coordinates are `i16` so
//! that stepping off the edge of a 256-wide map is representable and can be
//! rejected by bounds checks instead of wrapping.

use std::fmt;

use crate::OrderCode;

/// A tile position on the square arena map.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub x: i16,
    pub y: i16,
}

impl TileCoord {
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step in `dir`.  May lie off the map.
    #[inline]
    pub fn step(self, dir: Direction) -> TileCoord {
        let (dx, dy) = dir.offset();
        TileCoord::new(self.x + dx, self.y + dy)
    }

    /// Taxicab distance: the exact number of moves on an open 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: TileCoord) -> u32 {
        let dx = (i32::from(other.x) - i32::from(self.x)).unsigned_abs();
        let dy = (i32::from(other.y) - i32::from(self.y)).unsigned_abs();
        dx + dy
    }

    /// Octile distance (`max + (√2 − 1) · min`).
    ///
    /// Not a move count on this grid; it only feeds the search tie-breaker,
    /// where it favours routes that hug the straight line to the goal.
    #[inline]
    pub fn octile(self, other: TileCoord) -> f32 {
        let dx = (f32::from(other.x) - f32::from(self.x)).abs();
        let dy = (f32::from(other.y) - f32::from(self.y)).abs();
        dx.max(dy) + (std::f32::consts::SQRT_2 - 1.0) * dx.min(dy)
    }

    /// One greedy step along the dominant axis toward `goal`.
    ///
    /// Ties go to the vertical axis.  Returns `None` when already at `goal`.
    pub fn greedy_direction_to(self, goal: TileCoord) -> Option<Direction> {
        let dx = i32::from(goal.x) - i32::from(self.x);
        let dy = i32::from(goal.y) - i32::from(self.y);
        if dx == 0 && dy == 0 {
            return None;
        }
        Some(if dx.abs() > dy.abs() {
            if dx < 0 { Direction::West } else { Direction::East }
        } else if dy < 0 {
            Direction::South
        } else {
            Direction::North
        })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// The four cardinal moves.  Order matches the host's move order codes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// `(dx, dy)` for one step.
    #[inline]
    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::East  => (1, 0),
            Direction::North => (0, 1),
            Direction::West  => (-1, 0),
            Direction::South => (0, -1),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::East  => Direction::West,
            Direction::North => Direction::South,
            Direction::West  => Direction::East,
            Direction::South => Direction::North,
        }
    }

    /// The move order for this direction.
    #[inline]
    pub fn move_order(self) -> OrderCode {
        match self {
            Direction::East  => OrderCode::MoveEast,
            Direction::North => OrderCode::MoveNorth,
            Direction::West  => OrderCode::MoveWest,
            Direction::South => OrderCode::MoveSouth,
        }
    }

    /// The remote-dig order for this direction.
    #[inline]
    pub fn dig_order(self) -> OrderCode {
        match self {
            Direction::East  => OrderCode::DigEast,
            Direction::North => OrderCode::DigNorth,
            Direction::West  => OrderCode::DigWest,
            Direction::South => OrderCode::DigSouth,
        }
    }
}
