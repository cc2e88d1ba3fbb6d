use crate::generators::Carving;
use crate::maze::{Coord, Direction, MazeError};

/// A cell on the depth-first path, with its shuffled directions and how many
/// of them have been tried.
struct Frame {
    cell: Coord,
    directions: [Direction; 4],
    next: usize,
}

/// Depth-first carving from `(0, 0)`: try the four directions in random order,
/// and step into the first unvisited neighbour before trying the rest.
///
/// The path is kept on an explicit stack since it can grow as long as the
/// number of cells.
pub fn recursive_backtrack(carving: &mut Carving<'_, '_>) -> Result<(), MazeError> {
    let mut stack = vec![enter((0, 0), carving)];

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.next) else {
            // Dead end: back up to the previous cell
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(neighbor) = carving.grid.neighbor(cell.0, cell.1, direction) else {
            continue;
        };
        if carving.grid[neighbor].is_unvisited() {
            carving.carve(cell, direction, Some(neighbor))?;
            let frame = enter(neighbor, carving);
            stack.push(frame);
        }
    }
    Ok(())
}

fn enter(cell: Coord, carving: &mut Carving<'_, '_>) -> Frame {
    let mut directions = Direction::ALL;
    carving.rng.shuffle(&mut directions);
    Frame {
        cell,
        directions,
        next: 0,
    }
}
