/// File logger setup.
///
/// The terminal belongs to the frame, so log records go to a file.
/// A logger that cannot be created is not fatal: the game runs unlogged,
/// and config warnings go to stderr instead.

use std::fs::File;
use std::io::{self, Write};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::GameConfig;

pub fn init(config: &GameConfig) {
    if config.log_level == LevelFilter::Off {
        echo_warnings(&mut io::stderr(), &config.warnings);
        return;
    }

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Debug)
        .build();

    match File::create(&config.log_file) {
        Ok(file) => {
            let _ = WriteLogger::init(config.log_level, log_config, file);
            for warning in &config.warnings {
                log::warn!("{warning}");
            }
        }
        Err(e) => {
            eprintln!("Warning: could not create {}: {e}", config.log_file.display());
            echo_warnings(&mut io::stderr(), &config.warnings);
        }
    }
}

/// Write config warnings where no logger will pick them up.
fn echo_warnings<W: Write>(out: &mut W, warnings: &[String]) {
    for warning in warnings {
        let _ = writeln!(out, "Warning: {warning}");
    }
}
