use crate::generators::Carving;
use crate::maze::{Direction, MazeError};

/// Visits every cell once in row-major order and opens either its north or
/// its west wall. The top row and left column each end up as one straight
/// corridor, which gives the maze its diagonal bias.
pub fn binary_tree(carving: &mut Carving<'_, '_>) -> Result<(), MazeError> {
    let (width, height) = (carving.grid.width(), carving.grid.height());
    let mut candidates = Vec::with_capacity(2);
    for y in 0..height {
        for x in 0..width {
            candidates.clear();
            if y > 0 {
                candidates.push(Direction::North);
            }
            if x > 0 {
                candidates.push(Direction::West);
            }
            if let Some(&direction) = carving.rng.choose(&candidates) {
                carving.carve((x, y), direction, Some((x, y)))?;
            }
        }
    }
    Ok(())
}
