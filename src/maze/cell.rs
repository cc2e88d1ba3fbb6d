use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Open passages leading out of a cell, one bit per compass direction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Cell: u8 {
        const N = 1;
        const S = 2;
        const E = 4;
        const W = 8;
    }
}

impl Cell {
    /// A cell no passage has been carved into or out of yet.
    pub fn is_unvisited(self) -> bool {
        self.is_empty()
    }

    pub fn is_open(self, direction: Direction) -> bool {
        self.contains(direction.bit())
    }
}

/// A compass direction on the grid. The origin is the top-left cell, so north
/// decreases `y` and east increases `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn bit(self) -> Cell {
        match self {
            Direction::North => Cell::N,
            Direction::South => Cell::S,
            Direction::East => Cell::E,
            Direction::West => Cell::W,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Coordinate delta `(dx, dy)` of one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        };
        write!(f, "{}", name)
    }
}
