//! presize-engine: window geometry resolution and placement.
//!
//! Given a preset, the engine finds the focused window, picks the display it
//! lives on, computes a target size relative to that display's usable area,
//! centers it, and writes position and size together. All OS access goes
//! through the traits in [`port`], so the whole pipeline runs (and is tested)
//! without a window server.
//!
//! Any failure along the way leaves the window untouched.
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

pub mod coords;
pub mod display;
mod error;
pub mod geom;
mod placer;
pub mod port;
pub mod preset;
mod queue;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

#[cfg(test)]
mod property_tests;

pub use display::Display;
pub use error::{Error, Result};
pub use geom::{Ax, Cocoa, Point, Rect, Size};
pub use placer::{Context, Outcome, Placement, Placer};
pub use port::{DisplaySource, Exclusions, Permission, WindowGeometry};
pub use preset::Preset;
pub use queue::{Request, RequestQueue, RequestSender};
