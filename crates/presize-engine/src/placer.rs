//! Placement orchestration: one preset request, start to finish.

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::{
    coords::{centered_origin, rect_to_ax},
    display::{self, Display},
    error::{Error, Result},
    geom::{Ax, Point, Size},
    port::{DisplaySource, Exclusions, Permission, WindowGeometry},
    preset::{self, Preset},
};

/// Collaborators a [`Placer`] works with, built once at startup.
pub struct Context<W> {
    /// Focused-window geometry port.
    pub window: W,
    /// Display enumeration.
    pub displays: Arc<dyn DisplaySource>,
    /// Accessibility permission gate.
    pub permission: Arc<dyn Permission>,
    /// Applications to leave alone.
    pub exclusions: Arc<dyn Exclusions>,
}

impl<W> Context<W> {
    /// Bundle the collaborators.
    pub fn new(
        window: W,
        displays: Arc<dyn DisplaySource>,
        permission: Arc<dyn Permission>,
        exclusions: Arc<dyn Exclusions>,
    ) -> Self {
        Self {
            window,
            displays,
            permission,
            exclusions,
        }
    }
}

/// Stages of a single request, traced as it progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Finding the focused window.
    ResolvingWindow,
    /// Choosing the display the window lives on.
    ResolvingDisplay,
    /// Computing the target size.
    ResolvingSize,
    /// Computing the AX origin.
    Translating,
    /// Writing the frame.
    Applying,
}

/// A frame that was written to a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Preset that produced the frame.
    pub preset: Preset,
    /// Display the window was placed on.
    pub display: u32,
    /// New top-left corner, AX space.
    pub origin: Point<Ax>,
    /// New size.
    pub size: Size,
}

/// Successful end states of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The window was moved and resized.
    Placed(Placement),
    /// The focused application is excluded; nothing was written.
    Excluded {
        /// Identifier of the excluded application.
        app: String,
    },
}

/// Applies presets to the focused window.
pub struct Placer<W: WindowGeometry> {
    /// Injected collaborators.
    ctx: Context<W>,
}

impl<W: WindowGeometry> Placer<W> {
    /// Create a placer over `ctx`.
    pub fn new(ctx: Context<W>) -> Self {
        Self { ctx }
    }

    /// Apply `preset` and discard the result after logging it.
    ///
    /// Every failure leaves the window untouched; the next request is the
    /// retry path.
    pub fn apply_preset(&self, preset: Preset) {
        match self.try_apply(preset) {
            Ok(Outcome::Placed(p)) => info!(
                preset = %p.preset,
                display = p.display,
                origin = ?p.origin,
                size = ?p.size,
                "placed"
            ),
            Ok(Outcome::Excluded { app }) => debug!(%preset, %app, "skipped: excluded app"),
            Err(e @ Error::GeometryWriteFailed { .. }) => warn!(%preset, "{}", e),
            Err(e) => debug!(%preset, "skipped: {}", e),
        }
    }

    /// Apply `preset`, reporting why nothing happened when it could not.
    ///
    /// At most one [`WindowGeometry::set_geometry`] call is made, and only
    /// after every read and computation has succeeded.
    pub fn try_apply(&self, preset: Preset) -> Result<Outcome> {
        if !self.ctx.permission.has_permission() {
            return Err(Error::PermissionDenied);
        }
        let port = &self.ctx.window;

        enter(Stage::ResolvingWindow, preset);
        let win = port.focused_window()?;
        if let Some(app) = port.app_identifier(&win)
            && self.ctx.exclusions.is_excluded(&app)
        {
            return Ok(Outcome::Excluded { app });
        }
        let position = port
            .position(&win)
            .inspect_err(|e| debug!("position read failed: {}", e))
            .ok();
        let current = port
            .size(&win)
            .inspect_err(|e| debug!("size read failed: {}", e))
            .ok();

        enter(Stage::ResolvingDisplay, preset);
        let displays = self.ctx.displays.displays();
        let primary_height = display::primary_height(&displays).ok_or(Error::DisplayListEmpty)?;
        let target: &Display =
            display::locate(position, &displays).ok_or(Error::DisplayListEmpty)?;
        trace!(
            display = target.id,
            usable = ?rect_to_ax(&target.usable, primary_height),
            "target display"
        );

        enter(Stage::ResolvingSize, preset);
        let size = preset::resolve(preset, current, target.usable.size())?;

        enter(Stage::Translating, preset);
        let origin = centered_origin(size, &target.usable, primary_height);

        enter(Stage::Applying, preset);
        port.set_geometry(&win, origin, size)?;
        Ok(Outcome::Placed(Placement {
            preset,
            display: target.id,
            origin,
            size,
        }))
    }
}

/// Trace a stage transition.
#[inline]
fn enter(stage: Stage, preset: Preset) {
    trace!(?stage, %preset, "placement stage");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geom::Rect,
        testing::{FakeDisplays, FakeWindow, PortCall, StaticExclusions, StaticPermission},
    };

    fn hd_primary() -> Display {
        let frame = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        Display::new(1, frame, Rect::new(0.0, 0.0, 1920.0, 1055.0), true)
    }

    fn secondary() -> Display {
        let frame = Rect::new(1920.0, 0.0, 1280.0, 800.0);
        Display::new(2, frame, frame, false)
    }

    fn placer_with(
        window: FakeWindow,
        displays: Vec<Display>,
        permitted: bool,
        excluded: &[&str],
    ) -> Placer<FakeWindow> {
        Placer::new(Context::new(
            window,
            Arc::new(FakeDisplays::new(displays)),
            Arc::new(StaticPermission(permitted)),
            Arc::new(StaticExclusions::new(excluded.iter().copied())),
        ))
    }

    #[test]
    fn almost_maximize_centers_in_usable_area() {
        let win = FakeWindow::new(Point::new(10.0, 40.0), Size::new(800.0, 600.0));
        let placer = placer_with(win.clone(), vec![hd_primary()], true, &[]);
        let out = placer.try_apply(Preset::AlmostMaximize).expect("placed");
        let Outcome::Placed(p) = out else {
            panic!("unexpected outcome: {out:?}");
        };
        assert_eq!(p.display, 1);
        assert!(p.size.approx_eq(&Size::new(1728.0, 949.5), 1e-9));
        // Usable AX rect is (0, 25, 1920x1055); centered: x = 96, y = 25 + 52.75.
        assert!(p.origin.approx_eq(&Point::new(96.0, 77.75), 1e-9));
        assert_eq!(win.set_calls(), 1);
        assert_eq!(win.frame().map(|r| r.size()), Some(p.size));
    }

    #[test]
    fn window_on_secondary_is_placed_on_secondary() {
        let win = FakeWindow::new(Point::new(2500.0, 100.0), Size::new(400.0, 300.0));
        let placer = placer_with(win, vec![hd_primary(), secondary()], true, &[]);
        let out = placer.try_apply(Preset::Center).expect("placed");
        let Outcome::Placed(p) = out else {
            panic!("unexpected outcome: {out:?}");
        };
        assert_eq!(p.display, 2);
        // Secondary Cocoa center (2560, 400); AX top-left = (2360, 1080 - 550).
        assert!(p.origin.approx_eq(&Point::new(2360.0, 530.0), 1e-9));
    }

    #[test]
    fn larger_without_size_never_writes() {
        let win = FakeWindow::new(Point::new(0.0, 0.0), Size::new(800.0, 600.0)).without_size();
        let placer = placer_with(win.clone(), vec![hd_primary()], true, &[]);
        assert_eq!(
            placer.try_apply(Preset::Larger),
            Err(Error::MissingCurrentSize {
                preset: Preset::Larger
            })
        );
        assert_eq!(win.set_calls(), 0);
    }

    #[test]
    fn absolute_preset_survives_unreadable_geometry() {
        let win = FakeWindow::new(Point::new(0.0, 0.0), Size::new(800.0, 600.0))
            .without_position()
            .without_size();
        let placer = placer_with(win.clone(), vec![secondary(), hd_primary()], true, &[]);
        let out = placer.try_apply(Preset::Full).expect("placed");
        // No position: falls back to the primary display.
        assert!(matches!(out, Outcome::Placed(Placement { display: 1, .. })));
        assert_eq!(win.set_calls(), 1);
    }

    #[test]
    fn permission_denied_touches_nothing() {
        let win = FakeWindow::new(Point::new(0.0, 0.0), Size::new(800.0, 600.0));
        let placer = placer_with(win.clone(), vec![hd_primary()], false, &[]);
        assert_eq!(placer.try_apply(Preset::Full), Err(Error::PermissionDenied));
        assert!(win.calls().is_empty());
    }

    #[test]
    fn no_focused_window_aborts() {
        let win = FakeWindow::unfocused();
        let placer = placer_with(win.clone(), vec![hd_primary()], true, &[]);
        assert_eq!(placer.try_apply(Preset::Full), Err(Error::NoFocusedWindow));
        assert_eq!(win.calls(), vec![PortCall::FocusedWindow]);
    }

    #[test]
    fn excluded_app_is_left_alone() {
        let win = FakeWindow::new(Point::new(0.0, 0.0), Size::new(800.0, 600.0))
            .with_app("com.example.Terminal");
        let placer = placer_with(win.clone(), vec![hd_primary()], true, &["com.example.Terminal"]);
        assert_eq!(
            placer.try_apply(Preset::Full),
            Ok(Outcome::Excluded {
                app: "com.example.Terminal".into()
            })
        );
        assert_eq!(win.set_calls(), 0);
    }

    #[test]
    fn empty_display_list_aborts() {
        let win = FakeWindow::new(Point::new(0.0, 0.0), Size::new(800.0, 600.0));
        let placer = placer_with(win.clone(), Vec::new(), true, &[]);
        assert_eq!(placer.try_apply(Preset::Full), Err(Error::DisplayListEmpty));
        assert_eq!(win.set_calls(), 0);
    }

    #[test]
    fn write_failure_is_reported_once() {
        let win = FakeWindow::new(Point::new(0.0, 0.0), Size::new(800.0, 600.0)).failing_writes(-25200);
        let placer = placer_with(win.clone(), vec![hd_primary()], true, &[]);
        assert_eq!(
            placer.try_apply(Preset::Normal),
            Err(Error::GeometryWriteFailed { code: -25200 })
        );
        assert_eq!(win.set_calls(), 1);
        // apply_preset swallows the error.
        placer.apply_preset(Preset::Normal);
        assert_eq!(win.set_calls(), 2);
    }

    #[test]
    fn repeated_nudges_compound_until_clamped() {
        let win = FakeWindow::new(Point::new(100.0, 100.0), Size::new(800.0, 600.0));
        let placer = placer_with(win.clone(), vec![hd_primary()], true, &[]);
        for _ in 0..20 {
            placer.apply_preset(Preset::Larger);
        }
        let frame = win.frame().expect("frame");
        assert!((frame.w - 0.95 * 1920.0).abs() < 1e-6, "{frame:?}");
        assert_eq!(frame.h, 600.0);
    }
}
