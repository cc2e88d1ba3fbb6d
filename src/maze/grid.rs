use std::collections::VecDeque;

use super::MazeError;
use super::cell::{Cell, Direction};

/// Cell coordinate `(x, y)`, origin at the top-left corner.
pub type Coord = (usize, usize);

/// Rectangular, row-major array of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates a grid with every wall standing.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width < 1 || height < 1 {
            return Err(MazeError::InvalidDimension { width, height });
        }
        let size = width
            .checked_mul(height)
            .ok_or(MazeError::InvalidDimension { width, height })?;
        Ok(Grid {
            data: vec![Cell::empty(); size].into_boxed_slice(),
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Never true: a grid always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn ravel_index(&self, x: usize, y: usize) -> usize {
        if !self.in_bounds(x, y) {
            panic!(
                "coordinate ({}, {}) is out of bounds for a {}x{} grid",
                x, y, self.width, self.height
            );
        }
        y * self.width + x
    }

    /// Row-major index of `(x, y)`, as used by per-cell side tables.
    pub fn index_of(&self, coord: Coord) -> usize {
        self.ravel_index(coord.0, coord.1)
    }

    /// The cell one step from `(x, y)` in `direction`, if it is on the grid.
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<Coord> {
        let (dx, dy) = direction.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.in_bounds(nx, ny).then_some((nx, ny))
    }

    /// All on-grid neighbours of `(x, y)` with the direction leading to each.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(x, y, d).map(|c| (d, c)))
    }

    /// Opens the passage between `(x, y)` and its neighbour in `direction`,
    /// setting the bit on both sides.
    ///
    /// # Panics
    /// If `(x, y)` or the neighbour lies outside the grid.
    pub fn open(&mut self, x: usize, y: usize, direction: Direction) {
        let Some((nx, ny)) = self.neighbor(x, y, direction) else {
            panic!(
                "cannot open {} from ({}, {}): neighbour is outside the {}x{} grid",
                direction, x, y, self.width, self.height
            );
        };
        let from = self.ravel_index(x, y);
        let to = self.ravel_index(nx, ny);
        self.data[from] |= direction.bit();
        self.data[to] |= direction.opposite().bit();
    }

    pub fn is_open(&self, x: usize, y: usize, direction: Direction) -> bool {
        self[(x, y)].is_open(direction)
    }

    /// Number of open passages, each counted once.
    pub fn passage_count(&self) -> usize {
        // Every passage sets exactly one S or E bit on exactly one of its two cells.
        self.data
            .iter()
            .map(|c| c.intersection(Cell::S | Cell::E).bits().count_ones() as usize)
            .sum()
    }

    /// Number of cells reachable from `start` through open passages.
    pub fn reachable_from(&self, start: Coord) -> usize {
        let mut seen = vec![false; self.data.len()];
        let mut queue = VecDeque::from([start]);
        seen[self.index_of(start)] = true;
        let mut count = 0;
        while let Some((x, y)) = queue.pop_front() {
            count += 1;
            for (direction, next) in self.neighbors(x, y) {
                let idx = self.index_of(next);
                if self.is_open(x, y, direction) && !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// Whether every open bit is mirrored by the opposite bit on the neighbour,
    /// and no bit points off the grid.
    pub fn is_consistent(&self) -> bool {
        (0..self.height).all(|y| {
            (0..self.width).all(|x| {
                Direction::ALL.into_iter().all(|d| {
                    if !self.is_open(x, y, d) {
                        return true;
                    }
                    match self.neighbor(x, y, d) {
                        Some((nx, ny)) => self.is_open(nx, ny, d.opposite()),
                        None => false,
                    }
                })
            })
        })
    }

    /// Connected, consistent and acyclic: a spanning tree of the grid graph.
    pub fn is_perfect(&self) -> bool {
        self.is_consistent()
            && self.passage_count() == self.len() - 1
            && self.reachable_from((0, 0)) == self.len()
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(MazeError::InvalidDimension {
                width: 0,
                height: 4
            })
        );
        assert!(Grid::new(4, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_new_grid_is_all_walls() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.len(), 6);
        assert!(grid.cells().iter().all(|c| c.is_unvisited()));
        assert_eq!(grid.passage_count(), 0);
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_open_sets_both_sides() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open(1, 1, Direction::North);
        assert!(grid.is_open(1, 1, Direction::North));
        assert!(grid.is_open(1, 0, Direction::South));
        grid.open(1, 1, Direction::West);
        assert!(grid.is_open(0, 1, Direction::East));
        assert_eq!(grid.passage_count(), 2);
        assert!(grid.is_consistent());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_open_off_grid_panics() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.open(0, 0, Direction::North);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let grid = Grid::new(2, 2).unwrap();
        let _ = grid[(2, 0)];
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(5, 4).unwrap();
        assert!(grid.in_bounds(4, 3));
        assert!(!grid.in_bounds(5, 0));
        assert!(!grid.in_bounds(0, 4));
        assert_eq!(grid.neighbor(0, 0, Direction::West), None);
        assert_eq!(grid.neighbor(0, 0, Direction::North), None);
        assert_eq!(grid.neighbor(4, 3, Direction::East), None);
        assert_eq!(grid.neighbor(2, 2, Direction::South), Some((2, 3)));
    }

    #[test]
    fn test_neighbors_of_corner_and_center() {
        let grid = Grid::new(3, 3).unwrap();
        let corner = grid.neighbors(0, 0).map(|(_, c)| c).collect::<Vec<_>>();
        assert_eq!(corner, vec![(0, 1), (1, 0)]);
        assert_eq!(grid.neighbors(1, 1).count(), 4);
    }

    #[test]
    fn test_perfect_corridor() {
        let mut grid = Grid::new(3, 1).unwrap();
        assert!(!grid.is_perfect());
        grid.open(0, 0, Direction::East);
        grid.open(1, 0, Direction::East);
        assert!(grid.is_perfect());
    }

    #[test]
    fn test_cycle_is_not_perfect() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.open(0, 0, Direction::East);
        grid.open(0, 0, Direction::South);
        grid.open(1, 1, Direction::North);
        assert!(grid.is_perfect());
        grid.open(1, 1, Direction::West);
        assert_eq!(grid.passage_count(), 4);
        assert!(!grid.is_perfect());
    }
}
