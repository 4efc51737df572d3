//! Top-level error for the `presize` binary.
use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::config;

/// Result alias for command handlers.
pub type Result<T> = StdResult<T, Error>;

/// Anything that stops a command before or during setup.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] config::Error),
    /// Exclusion list could not be read or written.
    #[error(transparent)]
    Exclusions(#[from] exclusions::Error),
    /// Hotkey capture failed to start.
    #[error("hotkeys: {0}")]
    Hotkey(#[from] mac_hotkey::Error),
    /// A one-shot placement did not happen.
    #[error("{0}")]
    Placement(#[from] presize_engine::Error),
    /// The interrupt handler could not be installed.
    #[error("signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    /// Thread spawn or similar.
    #[error("io: {0}")]
    Io(#[from] io::Error),
}
