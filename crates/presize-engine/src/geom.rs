//! Geometry primitives tagged with the coordinate space they live in.
//!
//! macOS uses two conventions at once: Accessibility reports window positions
//! with the origin at the top-left of the primary display and Y growing down
//! ([`Ax`]), while AppKit enumerates screens with the origin at the bottom-left
//! and Y growing up ([`Cocoa`]). Points and rects carry their space as a type
//! parameter so the two can never be mixed silently. Sizes are identical in
//! both spaces and stay untagged.

use std::{
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
};

/// Marker for a coordinate space.
pub trait Space: Copy + Debug + PartialEq + 'static {
    /// Short name used in debug output.
    const NAME: &'static str;
}

/// Accessibility space: origin top-left of the primary display, Y down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ax;

/// AppKit space: origin bottom-left of the primary display, Y up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cocoa;

impl Space for Ax {
    const NAME: &'static str = "ax";
}

impl Space for Cocoa {
    const NAME: &'static str = "cocoa";
}

/// Compare two floats within `eps`.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// A point in space `S`.
#[derive(Clone, Copy, PartialEq)]
pub struct Point<S: Space> {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate; direction depends on `S`.
    pub y: f64,
    /// Space tag.
    space: PhantomData<S>,
}

impl<S: Space> Point<S> {
    /// Construct a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// True if both coordinates are within `eps` of `other`.
    #[inline]
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        approx_eq(self.x, other.x, eps) && approx_eq(self.y, other.y, eps)
    }
}

impl<S: Space> Debug for Point<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.1}, {:.1})", S::NAME, self.x, self.y)
    }
}

/// Width and height, in points.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Construct a size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if both dimensions are within `eps` of `other`.
    #[inline]
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        approx_eq(self.width, other.width, eps) && approx_eq(self.height, other.height, eps)
    }
}

/// An axis-aligned rectangle in space `S`.
///
/// `x`/`y` is the origin corner as the space defines it: top-left in [`Ax`],
/// bottom-left in [`Cocoa`]. Width and height are never negative.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect<S: Space> {
    /// Origin x.
    pub x: f64,
    /// Origin y.
    pub y: f64,
    /// Width, ≥ 0.
    pub w: f64,
    /// Height, ≥ 0.
    pub h: f64,
    /// Space tag.
    space: PhantomData<S>,
}

impl<S: Space> Rect<S> {
    /// Construct a rect; negative extents are clamped to zero.
    #[inline]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
            space: PhantomData,
        }
    }

    /// Construct from an origin and a size.
    #[inline]
    pub fn from_parts(origin: Point<S>, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Origin corner.
    #[inline]
    pub fn origin(&self) -> Point<S> {
        Point::new(self.x, self.y)
    }

    /// Extent.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Horizontal center.
    #[inline]
    pub fn cx(&self) -> f64 {
        self.x + self.w / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn cy(&self) -> f64 {
        self.y + self.h / 2.0
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point<S> {
        Point::new(self.cx(), self.cy())
    }
}

impl Rect<Cocoa> {
    /// Lower edge (smallest Y).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y
    }

    /// Upper edge (largest Y).
    #[inline]
    pub fn top(&self) -> f64 {
        self.y + self.h
    }

    /// Half-open containment: `left ≤ x < right` and `bottom < y ≤ top`.
    ///
    /// Adjacent displays share an edge; this assigns every point on a shared
    /// edge to exactly one of them. The top edge is inclusive because window
    /// positions are top-left corners, and a window flush with the top of a
    /// display belongs to that display.
    #[inline]
    pub fn contains(&self, p: Point<Cocoa>) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y > self.bottom() && p.y <= self.top()
    }
}

impl<S: Space> Debug for Rect<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{:.1}, {:.1}, {:.1}x{:.1}]",
            S::NAME,
            self.x,
            self.y,
            self.w,
            self.h
        )
    }
}
