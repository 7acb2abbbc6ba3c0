/// Terminal lifecycle: raw mode in, raw mode out.
///
/// Frames are drawn by cursor repositioning, not by clearing, so the
/// screen is cleared once at startup and the last frame is left on
/// screen at exit.

use std::io::{self, BufWriter, Stdout};

use crossterm::{
    cursor::{self, MoveToNextLine},
    execute,
    style::ResetColor,
    terminal,
};

pub struct Terminal {
    writer: BufWriter<Stdout>,
}

impl Terminal {
    pub fn new() -> Self {
        Terminal {
            writer: BufWriter::with_capacity(16384, io::stdout()),
        }
    }

    /// Enter raw mode and hide the cursor. Raw mode is switched back
    /// off if the rest of the setup fails.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        rollback_on_error(execute!(self.writer, cursor::Hide), terminal::disable_raw_mode)
    }

    /// Undo `init`. `frame_rows` is how many rows the last frame took,
    /// so the cursor ends up below it.
    pub fn cleanup(&mut self, frame_rows: u16) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::MoveTo(0, frame_rows.saturating_sub(1)),
            MoveToNextLine(1),
            cursor::Show
        )?;
        terminal::disable_raw_mode()
    }

    pub fn writer(&mut self) -> &mut BufWriter<Stdout> {
        &mut self.writer
    }
}

/// Run `rollback` when `result` is an error, then pass the error on.
/// A failing rollback is logged; the original error wins.
fn rollback_on_error<T, F>(result: io::Result<T>, rollback: F) -> io::Result<T>
where
    F: FnOnce() -> io::Result<()>,
{
    if result.is_err() {
        if let Err(e) = rollback() {
            log::error!("terminal rollback failed: {e}");
        }
    }
    result
}
