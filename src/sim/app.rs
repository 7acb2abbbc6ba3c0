/// The application loop.
///
/// Two states: Running until the input slot's running flag drops, then
/// Stopped for good. Each tick, in order:
///   1. take the last captured key (if any) and hand it to the game
///   2. advance the game
///   3. stamp the tick time
///   4. present the grid
///
/// Between ticks the loop sleeps in short slices instead of spinning, so
/// a quit from the input thread is seen within a few milliseconds.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::style::Color;

use super::clock::FramePacer;
use super::game::Game;
use crate::config::GameConfig;
use crate::domain::glyph::{EMPTY, PLAYER};
use crate::domain::grid::Grid;
use crate::error::{Error, Result};
use crate::ui::input::InputSlot;

pub const FAREWELL: &str = "Goodbye!";

/// Longest single sleep while waiting for the next tick.
const MAX_SLEEP: Duration = Duration::from_millis(5);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    Running,
    Stopped,
}

pub struct App {
    pub grid: Grid,
    pub game: Game,
    input: Arc<InputSlot>,
    pacer: FramePacer,
    color: Option<Color>,
    ticks: u64,
    finished: bool,
}

impl App {
    pub fn new(config: &GameConfig, input: Arc<InputSlot>) -> Self {
        let grid = Grid::new(
            config.grid.width,
            config.grid.height,
            config.grid.cell_size,
            config.glyphs.get_or_blank(EMPTY),
        );
        let game = Game::new(config.glyphs.get_or_blank(PLAYER), config.keys.clone());
        App {
            grid,
            game,
            input,
            pacer: FramePacer::new(config.fps),
            color: config.color,
            ticks: 0,
            finished: false,
        }
    }

    pub fn state(&self) -> AppState {
        if self.input.is_running() {
            AppState::Running
        } else {
            AppState::Stopped
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Rows the presented frame occupies on screen.
    pub fn frame_rows(&self) -> u16 {
        let rows = self.grid.height() * self.grid.cell_size() + 2;
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    /// Start the game, clear the screen and tick until stopped.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.game.start(&mut self.grid);
        Grid::reset_display(out).map_err(Error::Render)?;
        // first present only fills the frame cache
        self.grid.present(out, self.color).map_err(Error::Render)?;

        log::info!(
            "loop running at {:?} per tick on a {}x{} grid ({} cells)",
            self.pacer.delay(), self.grid.width(), self.grid.height(), self.grid.cell_count(),
        );

        while self.state() == AppState::Running {
            let now = Instant::now();
            if !self.pacer.is_due(now) {
                std::thread::sleep(self.pacer.remaining(now).min(MAX_SLEEP));
                continue;
            }
            self.tick(out)?;
        }

        log::info!("loop stopped after {} ticks", self.ticks);
        Ok(())
    }

    /// Print the farewell line. Only the first call writes anything.
    pub fn finish<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        log::info!("finished after {} ticks", self.ticks());
        writeln!(out, "{FAREWELL}").and_then(|()| out.flush()).map_err(Error::Render)
    }

    /// One loop iteration, regardless of pacing.
    pub fn tick<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let Some(key) = self.input.take() {
            log::debug!("tick {}: key '{key}'", self.ticks);
            self.game.handle_input(&mut self.grid, &key);
        }
        self.game.update(&mut self.grid);
        self.pacer.mark(Instant::now());
        self.ticks += 1;
        self.grid.present(out, self.color).map_err(Error::Render)
    }
}
