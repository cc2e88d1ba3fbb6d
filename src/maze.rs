pub mod ascii;
pub mod cell;
pub mod grid;

use std::fmt;

pub use cell::{Cell, Direction};
pub use grid::{Coord, Grid};

/// Errors that abort a maze generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height was zero.
    InvalidDimension { width: usize, height: usize },
    /// A step observer asked the run to stop between two carving steps.
    Cancelled,
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimension { width, height } => write!(
                f,
                "invalid maze dimensions {}x{}: width and height must be at least 1",
                width, height
            ),
            MazeError::Cancelled => write!(f, "maze generation was cancelled"),
        }
    }
}

impl std::error::Error for MazeError {}
