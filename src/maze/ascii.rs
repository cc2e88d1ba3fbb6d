//! Plain-text rendering of a grid.
//!
//! Each cell takes two columns: the wall below it (`_` or a space) and the wall
//! to its right (`|`, or a space/underscore when the passage east is open). The
//! output contains no escape sequences, so it can be compared byte for byte.

use std::fmt;

use super::cell::{Cell, Direction};
use super::grid::Grid;

/// The line drawn above the first row.
pub fn top_line(width: usize) -> String {
    format!(" {}", "_".repeat(width * 2 - 1))
}

/// The two glyphs drawn for the cell at `(x, y)`: its floor, then its east side.
pub fn cell_glyphs(grid: &Grid, x: usize, y: usize) -> [char; 2] {
    let cell = grid[(x, y)];
    let floor = if cell.is_open(Direction::South) { ' ' } else { '_' };
    let side = if cell.is_open(Direction::East) {
        let east = grid
            .neighbor(x, y, Direction::East)
            .map_or(Cell::empty(), |c| grid[c]);
        if (cell | east).contains(Cell::S) { ' ' } else { '_' }
    } else {
        '|'
    };
    [floor, side]
}

/// One text line per grid row, preceded by the top line.
pub fn render_lines(grid: &Grid) -> Vec<String> {
    let mut lines = Vec::with_capacity(grid.height() + 1);
    lines.push(top_line(grid.width()));
    for y in 0..grid.height() {
        let mut line = String::with_capacity(grid.width() * 2 + 1);
        line.push('|');
        for x in 0..grid.width() {
            line.extend(cell_glyphs(grid, x, y));
        }
        lines.push(line);
    }
    lines
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in render_lines(self) {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
