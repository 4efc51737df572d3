//! Accessibility-backed window geometry.

use presize_engine::{Ax, Point, Result, Size, WindowGeometry};

#[cfg(target_os = "macos")]
use crate::ax::AxElem;

/// The focused window of the frontmost application, retained for the
/// duration of one placement.
#[derive(Debug)]
pub struct WindowRef {
    /// Owning process.
    #[cfg(target_os = "macos")]
    pid: i32,
    /// Retained AX window element.
    #[cfg(target_os = "macos")]
    elem: AxElem,
}

/// [`WindowGeometry`] over the macOS Accessibility API.
///
/// Off macOS every lookup reports that no window is focused.
#[derive(Debug, Default, Clone, Copy)]
pub struct AxWindowPort;

impl WindowGeometry for AxWindowPort {
    type Handle = WindowRef;

    fn focused_window(&self) -> Result<WindowRef> {
        platform::focused_window()
    }

    fn app_identifier(&self, win: &WindowRef) -> Option<String> {
        platform::app_identifier(win)
    }

    fn position(&self, win: &WindowRef) -> Result<Point<Ax>> {
        platform::position(win)
    }

    fn size(&self, win: &WindowRef) -> Result<Size> {
        platform::size(win)
    }

    fn set_geometry(&self, win: &WindowRef, origin: Point<Ax>, size: Size) -> Result<()> {
        platform::set_geometry(win, origin, size)
    }
}

#[cfg(target_os = "macos")]
mod platform {
    use objc2_foundation::{NSPoint, NSSize};
    use presize_engine::{Ax, Error, Point, Result, Size};
    use tracing::{debug, trace};

    use super::WindowRef;
    use crate::{
        app,
        ax::{self, AxElem},
        error::{Error as AxError, Result as AxResult},
        frame::{self, FrameAttrs},
    };

    impl FrameAttrs for AxElem {
        fn position(&self) -> AxResult<Point<Ax>> {
            let p = Self::position(self)?;
            Ok(Point::new(p.x, p.y))
        }

        fn size(&self) -> AxResult<Size> {
            let s = Self::size(self)?;
            Ok(Size::new(s.width, s.height))
        }

        fn set_position(&self, p: Point<Ax>) -> AxResult<()> {
            Self::set_position(self, NSPoint::new(p.x, p.y))
        }

        fn set_size(&self, s: Size) -> AxResult<()> {
            Self::set_size(self, NSSize::new(s.width, s.height))
        }
    }

    /// Any read failure means the geometry is unknown.
    fn read_err(attr: &'static str, e: AxError) -> Error {
        trace!(attr, error = %e, "read failed");
        Error::GeometryUnavailable
    }

    pub(super) fn focused_window() -> Result<WindowRef> {
        let pid = app::frontmost_pid().ok_or(Error::NoFocusedWindow)?;
        let elem = ax::focused_window_for_pid(pid).map_err(|e| {
            debug!(pid, error = %e, "no focused window");
            Error::NoFocusedWindow
        })?;
        Ok(WindowRef { pid, elem })
    }

    pub(super) fn app_identifier(win: &WindowRef) -> Option<String> {
        app::bundle_id(win.pid)
    }

    pub(super) fn position(win: &WindowRef) -> Result<Point<Ax>> {
        let p = win.elem.position().map_err(|e| read_err("AXPosition", e))?;
        Ok(Point::new(p.x, p.y))
    }

    pub(super) fn size(win: &WindowRef) -> Result<Size> {
        let s = win.elem.size().map_err(|e| read_err("AXSize", e))?;
        Ok(Size::new(s.width, s.height))
    }

    pub(super) fn set_geometry(win: &WindowRef, origin: Point<Ax>, size: Size) -> Result<()> {
        frame::write_frame(&win.elem, origin, size)
    }
}

#[cfg(not(target_os = "macos"))]
mod platform {
    use presize_engine::{Ax, Error, Point, Result, Size};

    use super::WindowRef;
    use crate::error::AX_ERROR_API_DISABLED;

    pub(super) fn focused_window() -> Result<WindowRef> {
        Err(Error::NoFocusedWindow)
    }

    pub(super) fn app_identifier(_win: &WindowRef) -> Option<String> {
        None
    }

    pub(super) fn position(_win: &WindowRef) -> Result<Point<Ax>> {
        Err(Error::GeometryUnavailable)
    }

    pub(super) fn size(_win: &WindowRef) -> Result<Size> {
        Err(Error::GeometryUnavailable)
    }

    pub(super) fn set_geometry(_win: &WindowRef, _origin: Point<Ax>, _size: Size) -> Result<()> {
        Err(Error::GeometryWriteFailed {
            code: AX_ERROR_API_DISABLED,
        })
    }
}

#[cfg(all(test, not(target_os = "macos")))]
mod tests {
    use std::sync::Arc;

    use presize_engine::{
        Context, Error, Placer, Preset,
        testing::{StaticExclusions, StaticPermission},
    };

    use super::*;
    use crate::ScreenSource;

    #[test]
    fn stub_port_reports_no_window() {
        assert_eq!(
            AxWindowPort.focused_window().map(|_| ()),
            Err(Error::NoFocusedWindow)
        );
    }

    #[test]
    fn stub_port_plugs_into_the_placer() {
        let placer = Placer::new(Context::new(
            AxWindowPort,
            Arc::new(ScreenSource),
            Arc::new(StaticPermission(true)),
            Arc::new(StaticExclusions::default()),
        ));
        assert_eq!(placer.try_apply(Preset::Center).map(|_| ()), Err(Error::NoFocusedWindow));
    }
}
