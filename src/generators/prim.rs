use crate::generators::Carving;
use crate::maze::{Coord, Direction, Grid, MazeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Unvisited,
    Frontier,
    InMaze,
}

/// Per-run bookkeeping for Prim's algorithm. Cell status lives here rather
/// than in the grid, so the grid only ever carries passage bits.
struct PrimState {
    status: Vec<Status>,
    frontier: Vec<Coord>,
}

impl PrimState {
    /// Marks a random cell as part of the maze and seeds the frontier with its
    /// neighbours.
    fn start(carving: &mut Carving<'_, '_>) -> Self {
        let mut state = PrimState {
            status: vec![Status::Unvisited; carving.grid.len()],
            frontier: Vec::new(),
        };
        let start = (
            carving.rng.uniform_int(carving.grid.width()),
            carving.rng.uniform_int(carving.grid.height()),
        );
        state.mark(carving.grid, start);
        state
    }

    fn status(&self, grid: &Grid, coord: Coord) -> Status {
        self.status[grid.index_of(coord)]
    }

    /// Moves `coord` into the maze and adds its unvisited neighbours to the frontier.
    fn mark(&mut self, grid: &Grid, coord: Coord) {
        let idx = grid.index_of(coord);
        self.status[idx] = Status::InMaze;
        for (_, neighbor) in grid.neighbors(coord.0, coord.1) {
            let idx = grid.index_of(neighbor);
            if self.status[idx] == Status::Unvisited {
                self.status[idx] = Status::Frontier;
                self.frontier.push(neighbor);
            }
        }
    }

    /// Pulls one random frontier cell into the maze through a random in-maze
    /// neighbour. Returns `Ok(false)` once the frontier is empty.
    fn step(&mut self, carving: &mut Carving<'_, '_>) -> Result<bool, MazeError> {
        if self.frontier.is_empty() {
            return Ok(false);
        }
        let picked = carving.rng.uniform_int(self.frontier.len());
        let cell = self.frontier.swap_remove(picked);

        let grid: &Grid = carving.grid;
        let joined = grid
            .neighbors(cell.0, cell.1)
            .filter(|&(_, n)| self.status(grid, n) == Status::InMaze)
            .map(|(d, _)| d)
            .collect::<Vec<Direction>>();
        // A frontier cell always has at least the neighbour that put it there.
        let Some(&direction) = carving.rng.choose(&joined) else {
            unreachable!("frontier cell {:?} has no neighbour in the maze", cell);
        };

        carving.carve(cell, direction, Some(cell))?;
        self.mark(carving.grid, cell);
        Ok(true)
    }
}

/// Randomized Prim: grow the maze from one random cell by repeatedly joining a
/// random frontier cell to the maze.
pub fn randomized_prim(carving: &mut Carving<'_, '_>) -> Result<(), MazeError> {
    let mut state = PrimState::start(carving);
    while state.step(carving)? {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::RandomSource;

    fn carve(width: usize, height: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        let mut rng = RandomSource::from_seed(seed);
        randomized_prim(&mut Carving::new(&mut grid, &mut rng, None)).unwrap();
        grid
    }

    fn assert_frontier_disjoint(state: &PrimState, grid: &Grid) {
        let mut seen = std::collections::HashSet::new();
        for &coord in &state.frontier {
            assert!(seen.insert(coord), "{:?} is in the frontier twice", coord);
            assert_eq!(state.status(grid, coord), Status::Frontier);
        }
        let marked = state
            .status
            .iter()
            .filter(|&&s| s == Status::Frontier)
            .count();
        assert_eq!(marked, state.frontier.len());
    }

    #[test]
    fn test_frontier_never_holds_maze_cells() {
        let mut grid = Grid::new(9, 7).unwrap();
        let mut rng = RandomSource::from_seed(21);
        let mut carving = Carving::new(&mut grid, &mut rng, None);
        let mut state = PrimState::start(&mut carving);
        assert_frontier_disjoint(&state, carving.grid);
        let mut in_maze = 1;
        while state.step(&mut carving).unwrap() {
            in_maze += 1;
            assert_frontier_disjoint(&state, carving.grid);
            let counted = state.status.iter().filter(|&&s| s == Status::InMaze).count();
            assert_eq!(counted, in_maze);
        }
        assert!(state.status.iter().all(|&s| s == Status::InMaze));
        assert!(grid.is_perfect());
    }

    #[test]
    fn test_single_cell() {
        let grid = carve(1, 1, 4);
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn test_row_corridor() {
        let grid = carve(7, 1, 4);
        (1..7).for_each(|x| assert!(grid.is_open(x, 0, Direction::West)));
    }

    #[test]
    fn test_perfect_and_deterministic() {
        let grid = carve(20, 15, 77);
        assert!(grid.is_perfect());
        assert_eq!(grid, carve(20, 15, 77));
    }
}
