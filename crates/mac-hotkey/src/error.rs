//! Error types and result alias for the mac-hotkey crate.
use std::result::Result as StdResult;

use mac_keycode::Chord;
use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying OS provided an error.
    #[error("OS error: {0}")]
    OsError(String),
    /// Event tap could not be created or initialized.
    #[error("Event tap failed to start")]
    EventTapStart,
    /// Missing or denied system permission.
    #[error("Permission denied: {0}")]
    PermissionDenied(&'static str),
    /// No active registration exists for the provided id.
    #[error("Invalid registration id")]
    InvalidId,
    /// The chord is already registered.
    #[error("Chord already registered: {0}")]
    Duplicate(Chord),
    /// Hotkey capture is not available on this platform.
    #[error("Hotkey capture is only supported on macOS")]
    Unsupported,
}
