use crate::generators::{Carving, DisjointSet};
use crate::maze::{Coord, Direction, Grid, MazeError};

/// Interior wall between a cell and its north or west neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    cell: Coord,
    direction: Direction,
}

/// Every interior wall of the grid, in row-major order.
fn interior_walls(grid: &Grid) -> Vec<Edge> {
    let (width, height) = (grid.width(), grid.height());
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .flat_map(|(x, y)| {
            [
                (y > 0).then_some(Edge {
                    cell: (x, y),
                    direction: Direction::North,
                }),
                (x > 0).then_some(Edge {
                    cell: (x, y),
                    direction: Direction::West,
                }),
            ]
        })
        .flatten()
        .collect()
}

/// Randomized Kruskal: knock down walls in random order, skipping any wall
/// whose two sides are already connected. Returns the final forest, which is
/// a single tree over every cell.
pub fn randomized_kruskal(carving: &mut Carving<'_, '_>) -> Result<DisjointSet, MazeError> {
    let mut edges = interior_walls(carving.grid);
    carving.rng.shuffle(&mut edges);

    let mut sets = DisjointSet::new(carving.grid.len());

    while let Some(Edge { cell, direction }) = edges.pop() {
        let Some(neighbor) = carving.grid.neighbor(cell.0, cell.1, direction) else {
            unreachable!("interior wall {:?} {} has no neighbour", cell, direction);
        };
        let a = carving.grid.index_of(cell);
        let b = carving.grid.index_of(neighbor);
        // Already joined: this wall would close a loop
        if sets.connected(a, b) {
            continue;
        }
        sets.union(a, b);
        carving.carve(cell, direction, None)?;
    }
    Ok(sets)
}
