//! Collaborator interfaces the placement engine consumes.
//!
//! The engine never talks to the OS directly. Production code implements
//! these traits over Accessibility and AppKit (see `mac-winops`); tests use
//! the fakes in [`crate::testing`].

use crate::{
    display::Display,
    error::Result,
    geom::{Ax, Point, Size},
};

/// Read/write access to the focused window.
///
/// Every operation is synchronous and may fail independently of the others.
pub trait WindowGeometry {
    /// Opaque reference to one window, valid for a single placement.
    type Handle;

    /// The currently focused window, or [`Error::NoFocusedWindow`](crate::Error::NoFocusedWindow).
    fn focused_window(&self) -> Result<Self::Handle>;

    /// Identifier (bundle id) of the application owning `win`, if known.
    fn app_identifier(&self, win: &Self::Handle) -> Option<String>;

    /// Top-left corner of `win` in AX space.
    fn position(&self, win: &Self::Handle) -> Result<Point<Ax>>;

    /// Current size of `win`.
    fn size(&self, win: &Self::Handle) -> Result<Size>;

    /// Move and resize `win` in one operation. Both values are always
    /// supplied together; implementations must not be asked for one alone.
    fn set_geometry(&self, win: &Self::Handle, origin: Point<Ax>, size: Size) -> Result<()>;
}

/// Source of the current display arrangement.
pub trait DisplaySource {
    /// All attached displays. Queried fresh for every request.
    fn displays(&self) -> Vec<Display>;
}

/// Gate for the Accessibility permission.
pub trait Permission {
    /// True if window geometry may be read and written.
    fn has_permission(&self) -> bool;
}

/// Applications opted out of placement.
pub trait Exclusions {
    /// True if `app` must be left alone.
    fn is_excluded(&self, app: &str) -> bool;
}
