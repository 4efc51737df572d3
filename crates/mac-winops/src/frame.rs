//! Frame writes over window attributes, with rollback.
//!
//! A frame is written size, position, size: apps clamp a resize against the
//! window's old position, so the first resize may come up short. If any step
//! after the first resize fails, the frame read beforehand is written back.

use presize_engine::{Ax, Error as PlaceError, Point, Result as PlaceResult, Size};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Position and size attributes of one window.
pub(crate) trait FrameAttrs {
    /// Current top-left corner, AX space.
    fn position(&self) -> Result<Point<Ax>>;
    /// Current size.
    fn size(&self) -> Result<Size>;
    /// Move the window.
    fn set_position(&self, p: Point<Ax>) -> Result<()>;
    /// Resize the window.
    fn set_size(&self, s: Size) -> Result<()>;
}

/// Failed write, carrying its AX status.
fn write_failed(e: Error) -> PlaceError {
    PlaceError::GeometryWriteFailed { code: e.ax_code() }
}

/// Put back the frame captured before the write. `moved` is true when the
/// position write went through.
fn restore<A: FrameAttrs + ?Sized>(win: &A, origin: Point<Ax>, size: Size, moved: bool) {
    if moved {
        if let Err(e) = win.set_position(origin) {
            warn!(error = %e, "rollback: position not restored");
        }
    }
    if let Err(e) = win.set_size(size) {
        warn!(error = %e, "rollback: size not restored");
    }
}

/// Write `origin` and `size` together. On error the window keeps, as far as
/// the application allows, the frame it had before the call.
pub(crate) fn write_frame<A: FrameAttrs + ?Sized>(
    win: &A,
    origin: Point<Ax>,
    size: Size,
) -> PlaceResult<()> {
    let (old_origin, old_size) = match (win.position(), win.size()) {
        (Ok(p), Ok(s)) => (p, s),
        (Err(e), _) | (_, Err(e)) => {
            debug!(error = %e, "frame unreadable; nothing written");
            return Err(PlaceError::GeometryUnavailable);
        }
    };

    win.set_size(size).map_err(write_failed)?;
    if let Err(e) = win.set_position(origin) {
        debug!(error = %e, "move rejected; rolling back");
        restore(win, old_origin, old_size, false);
        return Err(write_failed(e));
    }
    if let Err(e) = win.set_size(size) {
        debug!(error = %e, "final resize rejected; rolling back");
        restore(win, old_origin, old_size, true);
        return Err(write_failed(e));
    }
    Ok(())
}
