use thiserror::Error;

use crate::preset::Preset;

/// Reasons a placement request ends without moving the window.
///
/// None of these are fatal: the orchestrator logs them and leaves the window
/// untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Accessibility permission has not been granted.
    #[error("Accessibility permission missing")]
    PermissionDenied,

    /// No focused window could be found.
    #[error("Focused window not available")]
    NoFocusedWindow,

    /// Reading the window's position or size failed.
    #[error("Window geometry unavailable")]
    GeometryUnavailable,

    /// A relative preset was requested but the window's size is unknown.
    #[error("{preset} needs the current window size, which is unavailable")]
    MissingCurrentSize {
        /// The preset that was requested.
        preset: Preset,
    },

    /// The platform reported no displays.
    #[error("No displays available")]
    DisplayListEmpty,

    /// Writing the new frame failed.
    #[error("Failed to write window geometry: code {code}")]
    GeometryWriteFailed {
        /// Platform error code (AXError on macOS).
        code: i32,
    },

    /// A preset name did not match any known preset.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
