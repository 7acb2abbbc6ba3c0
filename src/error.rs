/// Error type shared by the terminal, input and render paths.
///
/// Configuration problems are not errors: they degrade to defaults
/// with a logged warning (see `config.rs`).

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Raw mode, cursor or screen setup/teardown failed.
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    /// The key listener could not be started.
    #[error("could not start input capture: {0}")]
    InputCapture(#[source] io::Error),

    /// Writing a frame to the output failed.
    #[error("render failed: {0}")]
    Render(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
