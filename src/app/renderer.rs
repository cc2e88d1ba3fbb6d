use std::{
    io::{self, Write},
    ops::ControlFlow,
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{self, Color, Stylize},
};

use crate::{
    generators::{CarveStep, StepObserver},
    maze::{
        Coord, Grid,
        ascii::{cell_glyphs, top_line},
    },
};

/// Redraws the maze after every carving step, pausing between frames.
///
/// Cells nothing has been carved into are drawn on grey, the cursor cell on red.
/// Pressing Esc, `q` or Ctrl-C stops the run before the next step.
pub struct TerminalAnimator<W: Write> {
    out: W,
    /// Pause after each frame
    delay: Duration,
    /// Set once drawing to the terminal failed; later frames are skipped
    io_error: Option<io::Error>,
    frames: usize,
}

impl<W: Write> TerminalAnimator<W> {
    pub fn new(out: W, delay: Duration) -> Self {
        Self {
            out,
            delay,
            io_error: None,
            frames: 0,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// The first I/O error hit while drawing, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }

    /// Draws the whole grid from the top-left corner, highlighting `cursor`.
    pub fn draw(&mut self, grid: &Grid, cursor: Option<Coord>) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            style::Print(top_line(grid.width()))
        )?;
        for y in 0..grid.height() {
            queue!(self.out, cursor::MoveTo(0, row(y + 1)), style::Print('|'))?;
            for x in 0..grid.width() {
                let glyphs: String = cell_glyphs(grid, x, y).iter().collect();
                if cursor == Some((x, y)) {
                    queue!(self.out, style::PrintStyledContent(glyphs.on(Color::Red)))?;
                } else if grid[(x, y)].is_unvisited() {
                    queue!(self.out, style::PrintStyledContent(glyphs.on(Color::Grey)))?;
                } else {
                    queue!(self.out, style::Print(glyphs))?;
                }
            }
        }
        queue!(self.out, cursor::MoveTo(0, row(grid.height() + 1)))?;
        self.out.flush()
    }

    /// Whether the user asked to stop, without blocking.
    fn cancel_requested() -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl_c =
                    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    tracing::debug!("[animator] {:?} pressed, cancelling", key.code);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn frame(&mut self, grid: &Grid, cursor: Option<Coord>) -> io::Result<bool> {
        self.draw(grid, cursor)?;
        self.frames += 1;
        std::thread::sleep(self.delay);
        TerminalAnimator::<W>::cancel_requested()
    }
}

/// Terminal row for a grid line, saturating on absurdly tall grids.
fn row(line: usize) -> u16 {
    u16::try_from(line).unwrap_or(u16::MAX)
}

impl<W: Write> StepObserver for TerminalAnimator<W> {
    fn on_step(&mut self, grid: &Grid, step: &CarveStep) -> ControlFlow<()> {
        match self.frame(grid, step.cursor) {
            Ok(false) => ControlFlow::Continue(()),
            Ok(true) => ControlFlow::Break(()),
            Err(e) => {
                tracing::error!("[animator] failed to draw frame {}: {}", self.frames, e);
                self.io_error = Some(e);
                ControlFlow::Break(())
            }
        }
    }

    fn on_finish(&mut self, grid: &Grid) {
        // Final frame with no cursor
        if let Err(e) = self.draw(grid, None) {
            self.io_error = Some(e);
        }
    }
}
