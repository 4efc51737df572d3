//! Conversions between Accessibility and AppKit coordinates.
//!
//! Both spaces share the primary display's left edge as x = 0 and differ only
//! in the vertical axis, so every conversion needs the primary display's frame
//! height as its reference.

use crate::geom::{Ax, Cocoa, Point, Rect, Size};

/// Convert an AX-space point to Cocoa space.
#[inline]
pub fn ax_to_cocoa(p: Point<Ax>, primary_height: f64) -> Point<Cocoa> {
    Point::new(p.x, primary_height - p.y)
}

/// Convert a Cocoa-space point to AX space. Inverse of [`ax_to_cocoa`].
#[inline]
pub fn cocoa_to_ax(p: Point<Cocoa>, primary_height: f64) -> Point<Ax> {
    Point::new(p.x, primary_height - p.y)
}

/// Re-express a Cocoa rect in AX space (origin becomes its top-left corner).
pub fn rect_to_ax(r: &Rect<Cocoa>, primary_height: f64) -> Rect<Ax> {
    let top_left = cocoa_to_ax(Point::new(r.x, r.top()), primary_height);
    Rect::from_parts(top_left, r.size())
}

/// AX-space origin that centers a window of `size` inside `usable`.
///
/// The window's top-left corner is computed in Cocoa space (center offset by
/// half the size, upward for Y), then converted back to AX space.
pub fn centered_origin(size: Size, usable: &Rect<Cocoa>, primary_height: f64) -> Point<Ax> {
    let corner = Point::<Cocoa>::new(
        usable.cx() - size.width / 2.0,
        usable.cy() + size.height / 2.0,
    );
    cocoa_to_ax(corner, primary_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY_H: f64 = 1080.0;

    #[test]
    fn flips_vertical_axis_only() {
        let c = ax_to_cocoa(Point::new(2500.0, 100.0), PRIMARY_H);
        assert_eq!(c, Point::new(2500.0, 980.0));
        let a = cocoa_to_ax(c, PRIMARY_H);
        assert_eq!(a, Point::new(2500.0, 100.0));
    }

    #[test]
    fn rect_to_ax_uses_top_edge() {
        // Menu bar of 25pt at the top of a 1920x1080 primary.
        let usable = Rect::<Cocoa>::new(0.0, 0.0, 1920.0, 1055.0);
        let ax = rect_to_ax(&usable, PRIMARY_H);
        assert_eq!(ax.origin(), Point::new(0.0, 25.0));
        assert_eq!(ax.size(), usable.size());
    }

    #[test]
    fn centers_on_primary() {
        let usable = Rect::<Cocoa>::new(0.0, 0.0, 1920.0, 1080.0);
        let o = centered_origin(Size::new(1000.0, 500.0), &usable, PRIMARY_H);
        assert_eq!(o, Point::new(460.0, 290.0));
    }

    #[test]
    fn centers_on_display_above_primary() {
        // 1280x800 secondary sitting on top of the primary.
        let usable = Rect::<Cocoa>::new(0.0, 1080.0, 1280.0, 800.0);
        let o = centered_origin(Size::new(640.0, 400.0), &usable, PRIMARY_H);
        // Cocoa center (640, 1480); top edge of window at 1680; AX y = 1080 - 1680.
        assert_eq!(o, Point::new(320.0, -600.0));
    }

    #[test]
    fn centers_on_display_below_and_left_of_primary() {
        let usable = Rect::<Cocoa>::new(-1440.0, -900.0, 1440.0, 900.0);
        let o = centered_origin(Size::new(1440.0, 900.0), &usable, PRIMARY_H);
        assert_eq!(o, Point::new(-1440.0, 1080.0));
        assert_eq!(o, rect_to_ax(&usable, PRIMARY_H).origin());
    }
}
