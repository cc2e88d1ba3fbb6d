use std::ops::ControlFlow;

mod backtrack;
mod binary_tree;
pub mod disjoint_set;
mod kruskal;
mod prim;
pub mod source;

use backtrack::recursive_backtrack;
use binary_tree::binary_tree;
use kruskal::randomized_kruskal;
use prim::randomized_prim;

pub use disjoint_set::DisjointSet;
pub use source::RandomSource;

use crate::maze::{Coord, Direction, Grid, MazeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Generator {
    BinaryTree,
    Backtracker,
    Prim,
    Kruskal,
}

impl Generator {
    pub const ALL: [Generator; 4] = [
        Generator::BinaryTree,
        Generator::Backtracker,
        Generator::Prim,
        Generator::Kruskal,
    ];

    /// Short tag used in the metadata line.
    pub fn tag(self) -> &'static str {
        match self {
            Generator::BinaryTree => "BinaryTree",
            Generator::Backtracker => "BackTracker",
            Generator::Prim => "Prim",
            Generator::Kruskal => "Kruskal",
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::BinaryTree => write!(f, "Binary Tree"),
            Generator::Backtracker => write!(f, "Recursive Backtracker (DFS)"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

/// One opened passage, reported to the observer right after it was carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarveStep {
    pub from: Coord,
    pub direction: Direction,
    /// The cell the carver is working on, if the algorithm has one.
    pub cursor: Option<Coord>,
}

/// Receives carving steps synchronously. Returning `Break` stops the run
/// before the next step.
pub trait StepObserver {
    fn on_step(&mut self, grid: &Grid, step: &CarveStep) -> ControlFlow<()>;

    /// Called once after the last step of a completed run.
    fn on_finish(&mut self, _grid: &Grid) {}
}

impl<F> StepObserver for F
where
    F: FnMut(&Grid, &CarveStep) -> ControlFlow<()>,
{
    fn on_step(&mut self, grid: &Grid, step: &CarveStep) -> ControlFlow<()> {
        self(grid, step)
    }
}

/// State owned by one in-flight carving run.
pub(crate) struct Carving<'a, 'o> {
    pub grid: &'a mut Grid,
    pub rng: &'a mut RandomSource,
    observer: Option<&'a mut (dyn StepObserver + 'o)>,
    passages: usize,
}

impl<'a, 'o> Carving<'a, 'o> {
    pub fn new(
        grid: &'a mut Grid,
        rng: &'a mut RandomSource,
        observer: Option<&'a mut (dyn StepObserver + 'o)>,
    ) -> Self {
        Carving {
            grid,
            rng,
            observer,
            passages: 0,
        }
    }

    /// Opens one passage and notifies the observer.
    pub fn carve(
        &mut self,
        from: Coord,
        direction: Direction,
        cursor: Option<Coord>,
    ) -> Result<(), MazeError> {
        self.grid.open(from.0, from.1, direction);
        self.passages += 1;
        if let Some(observer) = self.observer.as_mut() {
            let step = CarveStep {
                from,
                direction,
                cursor,
            };
            if observer.on_step(&*self.grid, &step).is_break() {
                tracing::debug!("Carving cancelled by observer after {} passages", self.passages);
                return Err(MazeError::Cancelled);
            }
        }
        Ok(())
    }

    fn finish(mut self) -> usize {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_finish(&*self.grid);
        }
        self.passages
    }
}

/// Carves a perfect maze into `grid` and returns the number of passages opened.
///
/// # Panics
/// If any passage is already open in `grid`.
pub fn generate_maze(
    grid: &mut Grid,
    generator: Generator,
    rng: &mut RandomSource,
    observer: Option<&mut dyn StepObserver>,
) -> Result<usize, MazeError> {
    assert!(
        grid.cells().iter().all(|c| c.is_unvisited()),
        "cannot carve a maze into a grid that already has passages"
    );
    tracing::debug!(
        "Generating {}x{} maze with {} (seed {})",
        grid.width(),
        grid.height(),
        generator,
        rng.seed()
    );
    let mut carving = Carving::new(grid, rng, observer);
    match generator {
        Generator::BinaryTree => binary_tree(&mut carving)?,
        Generator::Backtracker => recursive_backtrack(&mut carving)?,
        Generator::Prim => randomized_prim(&mut carving)?,
        Generator::Kruskal => {
            randomized_kruskal(&mut carving)?;
        }
    }
    let passages = carving.finish();
    debug_assert!(grid.is_perfect(), "{} produced an imperfect maze", generator);
    tracing::debug!("{} finished with {} passages", generator, passages);
    Ok(passages)
}

/// Parameters of a one-shot generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeRequest {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub generator: Generator,
}

/// A finished maze together with what is needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMaze {
    pub grid: Grid,
    /// The seed actually used, drawn from entropy if none was requested.
    pub seed: u64,
    pub generator: Generator,
    pub passages: usize,
}

impl GeneratedMaze {
    /// `"<program> <width> <height> <seed> [<Algorithm>]"`.
    pub fn metadata(&self, program: &str) -> String {
        format!(
            "{} {} {} {} [{}]",
            program,
            self.grid.width(),
            self.grid.height(),
            self.seed,
            self.generator.tag()
        )
    }
}

/// Builds the grid, seeds the random source and runs the requested algorithm
/// to completion.
pub fn build_maze(
    request: MazeRequest,
    observer: Option<&mut dyn StepObserver>,
) -> Result<GeneratedMaze, MazeError> {
    let mut grid = Grid::new(request.width, request.height)?;
    let mut rng = RandomSource::new(request.seed);
    let passages = generate_maze(&mut grid, request.generator, &mut rng, observer)?;
    Ok(GeneratedMaze {
        grid,
        seed: rng.seed(),
        generator: request.generator,
        passages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(generator: Generator, width: usize, height: usize, seed: u64) -> MazeRequest {
        MazeRequest {
            width,
            height,
            seed: Some(seed),
            generator,
        }
    }

    #[test]
    fn test_every_generator_builds_perfect_maze() {
        for generator in Generator::ALL {
            let maze = build_maze(request(generator, 12, 7, 99), None).unwrap();
            assert!(maze.grid.is_perfect(), "{} is not perfect", generator);
            assert_eq!(maze.passages, 12 * 7 - 1);
            assert_eq!(maze.seed, 99);
        }
    }

    #[test]
    fn test_invalid_dimension() {
        let err = build_maze(request(Generator::Prim, 0, 3, 1), None).unwrap_err();
        assert_eq!(
            err,
            MazeError::InvalidDimension {
                width: 0,
                height: 3
            }
        );
    }

    #[test]
    #[should_panic(expected = "already has passages")]
    fn test_generate_into_carved_grid_panics() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open(1, 1, Direction::East);
        let mut rng = RandomSource::from_seed(5);
        let _ = generate_maze(&mut grid, Generator::Backtracker, &mut rng, None);
    }

    #[test]
    fn test_observer_sees_every_step_with_invariant_intact() {
        for generator in Generator::ALL {
            let mut steps = 0;
            let mut finished = false;
            struct Counter<'a> {
                steps: &'a mut usize,
                finished: &'a mut bool,
            }
            impl StepObserver for Counter<'_> {
                fn on_step(&mut self, grid: &Grid, step: &CarveStep) -> ControlFlow<()> {
                    assert!(grid.is_consistent());
                    assert!(grid.is_open(step.from.0, step.from.1, step.direction));
                    *self.steps += 1;
                    ControlFlow::Continue(())
                }

                fn on_finish(&mut self, grid: &Grid) {
                    assert!(grid.is_perfect());
                    *self.finished = true;
                }
            }
            let mut counter = Counter {
                steps: &mut steps,
                finished: &mut finished,
            };
            let maze = build_maze(request(generator, 6, 5, 3), Some(&mut counter)).unwrap();
            assert_eq!(steps, maze.passages);
            assert!(finished);
        }
    }

    #[test]
    fn test_observer_can_cancel() {
        for generator in Generator::ALL {
            let mut seen = 0;
            let mut stop_after_three = |_: &Grid, _: &CarveStep| {
                seen += 1;
                if seen == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            };
            let result = build_maze(request(generator, 8, 8, 5), Some(&mut stop_after_three));
            assert_eq!(result, Err(MazeError::Cancelled));
            assert_eq!(seen, 3);
        }
    }

    #[test]
    fn test_metadata_line() {
        let maze = build_maze(request(Generator::Kruskal, 4, 3, 17), None).unwrap();
        assert_eq!(maze.metadata("mazes"), "mazes 4 3 17 [Kruskal]");
    }

    #[test]
    fn test_unseeded_run_reports_reproducible_seed() {
        let first = build_maze(
            MazeRequest {
                width: 9,
                height: 9,
                seed: None,
                generator: Generator::Backtracker,
            },
            None,
        )
        .unwrap();
        let replay = build_maze(request(Generator::Backtracker, 9, 9, first.seed), None).unwrap();
        assert_eq!(first.grid, replay.grid);
    }
}
