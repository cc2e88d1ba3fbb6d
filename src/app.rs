mod renderer;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    cursor, execute,
    style::{self, Attribute, Color, Stylize},
    terminal,
};

use crate::{
    config::Config,
    generators::{GeneratedMaze, Generator, MazeRequest, build_maze},
    maze::{MazeError, ascii::render_lines},
};

pub use renderer::TerminalAnimator;

/// Outcome of one `App::run`.
#[derive(Debug)]
pub enum RunOutcome {
    Finished(GeneratedMaze),
    /// The user stopped the animation; no maze is returned.
    Cancelled,
}

pub struct App {
    config: Config,
    /// Program name printed at the start of the metadata line
    program: String,
}

impl App {
    pub fn new(config: Config, program: impl Into<String>) -> Self {
        Self {
            config,
            program: program.into(),
        }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode with a hidden cursor
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Enable raw mode so key presses can cancel the animation, then clear the screen.
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        execute!(stdout, cursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Generate one maze and print it, animating if configured.
    pub fn run(&self, stdout: &mut Stdout) -> Result<RunOutcome> {
        let request = self.config.request;
        tracing::info!(
            "Starting {} on a {}x{} grid (seed {:?}, animate {})",
            request.generator,
            request.width,
            request.height,
            request.seed,
            self.config.animate
        );

        let result = if self.config.animate {
            self.run_animated(stdout, request)?
        } else {
            build_maze(request, None)
        };

        let maze = match result {
            Ok(maze) => maze,
            Err(MazeError::Cancelled) => {
                tracing::info!("Generation was cancelled by user.");
                writeln!(stdout, "Cancelled.")?;
                return Ok(RunOutcome::Cancelled);
            }
            Err(e) => return Err(e).context("maze generation failed"),
        };

        if !self.config.animate {
            for line in render_lines(&maze.grid) {
                writeln!(stdout, "{}", line)?;
            }
        }
        writeln!(stdout, "{}", self.metadata(&maze))?;
        stdout.flush()?;
        tracing::info!("Finished with seed {} ({} passages)", maze.seed, maze.passages);
        Ok(RunOutcome::Finished(maze))
    }

    fn run_animated(
        &self,
        stdout: &mut Stdout,
        request: MazeRequest,
    ) -> Result<Result<GeneratedMaze, MazeError>> {
        // Check if terminal height and width are sufficient
        let (term_width, term_height) = terminal::size().context("failed to query the terminal size")?;
        if !fits_terminal(request.width, request.height, (term_width, term_height)) {
            execute!(
                stdout,
                style::PrintStyledContent(
                    format!(
                        "Terminal size is too small ({}x{}) for a {}x{} maze to display. Please resize the terminal.\n",
                        term_width, term_height, request.width, request.height
                    )
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
                )
            )?;
            anyhow::bail!(
                "terminal is {}x{} but the animation needs {}x{}",
                term_width,
                term_height,
                request.width.saturating_mul(2).saturating_add(1),
                request.height.saturating_add(2)
            );
        }

        App::setup_terminal(stdout).context("failed to prepare the terminal for animation")?;
        let mut animator = TerminalAnimator::new(std::io::stdout(), self.config.delay);
        let result = build_maze(request, Some(&mut animator));
        App::restore_terminal(stdout).context("failed to restore the terminal")?;
        tracing::debug!("[app] animation drew {} frames", animator.frames());
        if let Some(e) = animator.take_error() {
            return Err(e).context("failed to draw animation frame");
        }
        Ok(result)
    }

    fn metadata(&self, maze: &GeneratedMaze) -> String {
        let line = maze.metadata(&self.program);
        if self.config.animate {
            format!("{} {}", line, self.config.delay.as_secs_f64())
        } else {
            line
        }
    }

    /// Time `iterations` runs of every algorithm on a `width` x `height` grid.
    pub fn profile(width: usize, height: usize, iterations: usize) -> Result<Vec<(Generator, Duration)>> {
        Generator::ALL
            .into_iter()
            .map(|generator| -> Result<(Generator, Duration)> {
                let started = Instant::now();
                for seed in 0..iterations as u64 {
                    let maze = build_maze(
                        MazeRequest {
                            width,
                            height,
                            seed: Some(seed),
                            generator,
                        },
                        None,
                    )?;
                    anyhow::ensure!(
                        maze.grid.is_perfect(),
                        "{} produced an imperfect maze for seed {}",
                        generator,
                        seed
                    );
                }
                let elapsed = started.elapsed();
                tracing::info!("[profile] {}: {:?} for {} runs", generator, elapsed, iterations);
                Ok((generator, elapsed))
            })
            .collect()
    }
}

/// Whether a `width` x `height` maze plus its metadata line fits on a terminal
/// of `(columns, rows)`.
fn fits_terminal(width: usize, height: usize, (columns, rows): (u16, u16)) -> bool {
    let needed_columns = width.saturating_mul(2).saturating_add(1);
    let needed_rows = height.saturating_add(2);
    needed_columns <= usize::from(columns) && needed_rows <= usize::from(rows)
}
