//! Display descriptions and the locator that picks a window's display.

use tracing::trace;

use crate::{
    coords::ax_to_cocoa,
    geom::{Ax, Cocoa, Point, Rect},
};

/// One attached display, in Cocoa coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Display {
    /// Platform display identifier.
    pub id: u32,
    /// Full bounds.
    pub frame: Rect<Cocoa>,
    /// Bounds minus menu bar and Dock.
    pub usable: Rect<Cocoa>,
    /// True for the display that anchors the global coordinate origin.
    pub is_primary: bool,
}

impl Display {
    /// Construct a display description.
    pub fn new(id: u32, frame: Rect<Cocoa>, usable: Rect<Cocoa>, is_primary: bool) -> Self {
        Self {
            id,
            frame,
            usable,
            is_primary,
        }
    }
}

/// The primary display: the one flagged primary, else the first listed.
pub fn primary(displays: &[Display]) -> Option<&Display> {
    displays
        .iter()
        .find(|d| d.is_primary)
        .or_else(|| displays.first())
}

/// Frame height of the primary display, the reference for AX/Cocoa conversion.
pub fn primary_height(displays: &[Display]) -> Option<f64> {
    primary(displays).map(|d| d.frame.h)
}

/// Pick the display a window belongs to.
///
/// - With a position, the first display whose frame contains it, else the one
///   whose frame center is nearest (first wins on ties).
/// - Without a position, the primary display.
///
/// Returns `None` only when `displays` is empty.
pub fn locate(position: Option<Point<Ax>>, displays: &[Display]) -> Option<&Display> {
    let primary_display = primary(displays)?;
    let Some(pos) = position else {
        trace!(display = primary_display.id, "locate: no position; primary");
        return Some(primary_display);
    };
    let p = ax_to_cocoa(pos, primary_display.frame.h);
    if let Some(d) = displays.iter().find(|d| d.frame.contains(p)) {
        trace!(display = d.id, point = ?p, "locate: contained");
        return Some(d);
    }
    let nearest = nearest_by_center(p, displays);
    if let Some(d) = nearest {
        trace!(display = d.id, point = ?p, "locate: nearest center");
    }
    nearest
}

/// Display whose frame center is closest to `p`; earliest entry wins ties.
fn nearest_by_center(p: Point<Cocoa>, displays: &[Display]) -> Option<&Display> {
    let mut best: Option<(&Display, f64)> = None;
    for d in displays {
        let dist = p.distance(&d.frame.center());
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((d, dist)),
        }
    }
    best.map(|(d, _)| d)
}
