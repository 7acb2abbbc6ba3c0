/// Entry point: set up, run the loop, tear down.

mod config;
mod domain;
mod error;
mod logging;
mod sim;
mod ui;

use std::io;
use std::sync::Arc;

use config::GameConfig;
use error::{Error, Result};
use sim::app::App;
use ui::input::{InputCapture, InputSlot};
use ui::terminal::Terminal;

fn main() {
    let config = GameConfig::load();
    logging::init(&config);
    log::info!(
        "gridwalk starting: {}x{} grid, cell size {}, {} fps",
        config.grid.width, config.grid.height, config.grid.cell_size, config.fps,
    );

    let mut terminal = Terminal::new();
    if let Err(e) = terminal.init().map_err(Error::Terminal) {
        eprintln!("Error: {e}");
        log::error!("{e}");
        return;
    }

    let slot = Arc::new(InputSlot::new());
    let mut app = App::new(&config, Arc::clone(&slot));

    let result = run(&mut app, &mut terminal, &slot, &config);

    if let Err(e) = terminal.cleanup(app.frame_rows()).map_err(Error::Terminal) {
        eprintln!("Error: {e}");
    }

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("Error: {e}");
    }

    if let Err(e) = app.finish(&mut io::stdout()) {
        eprintln!("Error: {e}");
    }
}

fn run(app: &mut App, terminal: &mut Terminal, slot: &Arc<InputSlot>, config: &GameConfig) -> Result<()> {
    let capture = InputCapture::spawn(Arc::clone(slot), config.quit_key.clone())
        .map_err(Error::InputCapture)?;

    let result = app.run(terminal.writer());

    // a render error leaves the flag up; drop it so the listener exits
    slot.stop();
    capture.join();
    result
}
