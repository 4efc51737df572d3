//! mac-winops: macOS window operations for presize.
//!
//! Implements the placement engine's collaborators over the system APIs:
//! - [`AxWindowPort`]: focused-window geometry through Accessibility (AX).
//! - [`ScreenSource`]: the display arrangement from `NSScreen`.
//! - [`AxPermission`]: the Accessibility permission gate.
//!
//! Geometry reads and writes require Accessibility permission. On other
//! platforms the port finds no window and the screen list is empty, so the
//! workspace builds and tests anywhere.

#[cfg(target_os = "macos")]
mod app;
#[cfg(target_os = "macos")]
mod ax;
mod error;
#[cfg(any(target_os = "macos", test))]
mod frame;
mod permission;
mod port;
mod screen;

pub use error::{Error, Result};
pub use permission::AxPermission;
pub use port::{AxWindowPort, WindowRef};
pub use screen::ScreenSource;
