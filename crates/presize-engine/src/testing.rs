//! In-memory collaborators for exercising the engine without an OS.
//!
//! `FakeWindow` is a single scriptable window that records every port call and
//! applies successful writes to its own frame, so consecutive requests see the
//! result of earlier ones.

use std::{collections::HashSet, sync::Arc};

use parking_lot::Mutex;

use crate::{
    display::Display,
    error::{Error, Result},
    geom::{Ax, Point, Rect, Size},
    port::{DisplaySource, Exclusions, Permission, WindowGeometry},
};

/// A recorded call against [`FakeWindow`].
#[derive(Debug, Clone, PartialEq)]
pub enum PortCall {
    /// `focused_window`
    FocusedWindow,
    /// `app_identifier`
    AppIdentifier,
    /// `position`
    Position,
    /// `size`
    Size,
    /// `set_geometry` with its arguments.
    SetGeometry {
        /// Requested origin.
        origin: Point<Ax>,
        /// Requested size.
        size: Size,
    },
}

/// Handle issued by [`FakeWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeHandle(pub u32);

/// Mutable state behind a [`FakeWindow`].
#[derive(Debug)]
struct FakeState {
    /// `None` means no window is focused.
    frame: Option<Rect<Ax>>,
    /// Owning application identifier.
    app: Option<String>,
    /// Whether position reads succeed.
    position_readable: bool,
    /// Whether size reads succeed.
    size_readable: bool,
    /// Error code returned from writes, if writes fail.
    write_error: Option<i32>,
    /// Call log.
    calls: Vec<PortCall>,
}

/// Scriptable focused window. Clones share state.
#[derive(Debug, Clone)]
pub struct FakeWindow {
    /// Shared state.
    state: Arc<Mutex<FakeState>>,
}

impl FakeWindow {
    /// A focused window at `origin` with `size`.
    pub fn new(origin: Point<Ax>, size: Size) -> Self {
        Self::with_frame(Some(Rect::from_parts(origin, size)))
    }

    /// No window is focused.
    pub fn unfocused() -> Self {
        Self::with_frame(None)
    }

    /// Build from an optional frame.
    fn with_frame(frame: Option<Rect<Ax>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                frame,
                app: None,
                position_readable: true,
                size_readable: true,
                write_error: None,
                calls: Vec::new(),
            })),
        }
    }

    /// Set the owning application identifier.
    pub fn with_app(self, app: &str) -> Self {
        self.state.lock().app = Some(app.to_string());
        self
    }

    /// Make position reads fail.
    pub fn without_position(self) -> Self {
        self.state.lock().position_readable = false;
        self
    }

    /// Make size reads fail.
    pub fn without_size(self) -> Self {
        self.state.lock().size_readable = false;
        self
    }

    /// Make writes fail with `code`.
    pub fn failing_writes(self, code: i32) -> Self {
        self.state.lock().write_error = Some(code);
        self
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<PortCall> {
        self.state.lock().calls.clone()
    }

    /// Number of `set_geometry` calls made so far.
    pub fn set_calls(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, PortCall::SetGeometry { .. }))
            .count()
    }

    /// Current frame, if a window is focused.
    pub fn frame(&self) -> Option<Rect<Ax>> {
        self.state.lock().frame
    }
}

impl WindowGeometry for FakeWindow {
    type Handle = FakeHandle;

    fn focused_window(&self) -> Result<FakeHandle> {
        let mut st = self.state.lock();
        st.calls.push(PortCall::FocusedWindow);
        st.frame.map(|_| FakeHandle(1)).ok_or(Error::NoFocusedWindow)
    }

    fn app_identifier(&self, _win: &FakeHandle) -> Option<String> {
        let mut st = self.state.lock();
        st.calls.push(PortCall::AppIdentifier);
        st.app.clone()
    }

    fn position(&self, _win: &FakeHandle) -> Result<Point<Ax>> {
        let mut st = self.state.lock();
        st.calls.push(PortCall::Position);
        match st.frame {
            Some(f) if st.position_readable => Ok(f.origin()),
            _ => Err(Error::GeometryUnavailable),
        }
    }

    fn size(&self, _win: &FakeHandle) -> Result<Size> {
        let mut st = self.state.lock();
        st.calls.push(PortCall::Size);
        match st.frame {
            Some(f) if st.size_readable => Ok(f.size()),
            _ => Err(Error::GeometryUnavailable),
        }
    }

    fn set_geometry(&self, _win: &FakeHandle, origin: Point<Ax>, size: Size) -> Result<()> {
        let mut st = self.state.lock();
        st.calls.push(PortCall::SetGeometry { origin, size });
        if let Some(code) = st.write_error {
            return Err(Error::GeometryWriteFailed { code });
        }
        st.frame = Some(Rect::from_parts(origin, size));
        Ok(())
    }
}

/// Fixed display arrangement; replaceable to simulate hot-plug.
#[derive(Debug, Default)]
pub struct FakeDisplays {
    /// Current arrangement.
    displays: Mutex<Vec<Display>>,
}

impl FakeDisplays {
    /// Start with `displays`.
    pub fn new(displays: Vec<Display>) -> Self {
        Self {
            displays: Mutex::new(displays),
        }
    }

    /// Replace the arrangement.
    pub fn set(&self, displays: Vec<Display>) {
        *self.displays.lock() = displays;
    }
}

impl DisplaySource for FakeDisplays {
    fn displays(&self) -> Vec<Display> {
        self.displays.lock().clone()
    }
}

/// Permission gate with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission(pub bool);

impl Permission for StaticPermission {
    fn has_permission(&self) -> bool {
        self.0
    }
}

/// Fixed exclusion set.
#[derive(Debug, Clone, Default)]
pub struct StaticExclusions {
    /// Excluded identifiers.
    apps: HashSet<String>,
}

impl StaticExclusions {
    /// Exclude every identifier in `apps`.
    pub fn new<'a>(apps: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            apps: apps.into_iter().map(str::to_string).collect(),
        }
    }
}

impl Exclusions for StaticExclusions {
    fn is_excluded(&self, app: &str) -> bool {
        self.apps.contains(app)
    }
}
