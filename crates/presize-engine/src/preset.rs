//! Named sizing presets and the resolver that turns them into target sizes.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    error::{Error, Result},
    geom::Size,
};

/// Smallest width `Smaller` will shrink to, in points.
pub const MIN_WIDTH: f64 = 100.0;
/// Smallest height `Shorter` will shrink to, in points.
pub const MIN_HEIGHT: f64 = 64.0;
/// Upper bound for `ReasonableSize` width, in points.
pub const REASONABLE_MAX_WIDTH: f64 = 1024.0;
/// Upper bound for `ReasonableSize` height, in points.
pub const REASONABLE_MAX_HEIGHT: f64 = 900.0;
/// Fraction of the usable dimension a nudge moves by.
pub const NUDGE_STEP: f64 = 0.1;
/// Fraction of the usable dimension nudges and `Full` never exceed.
pub const MAX_FRACTION: f64 = 0.95;

/// A named sizing rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// 90% of the usable area.
    AlmostMaximize,
    /// 60% of the usable area, capped at 1024x900.
    ReasonableSize,
    /// 60% wide, 90% tall.
    Normal,
    /// 95% of the usable area.
    Full,
    /// Keep the current size; only recenter.
    Center,
    /// Narrower by a tenth of the usable width.
    Smaller,
    /// Wider by a tenth of the usable width.
    Larger,
    /// Taller by a tenth of the usable height.
    Taller,
    /// Shorter by a tenth of the usable height.
    Shorter,
}

impl Preset {
    /// Every preset, in menu order.
    pub const ALL: [Self; 9] = [
        Self::AlmostMaximize,
        Self::ReasonableSize,
        Self::Normal,
        Self::Full,
        Self::Center,
        Self::Smaller,
        Self::Larger,
        Self::Taller,
        Self::Shorter,
    ];

    /// Kebab-case name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::AlmostMaximize => "almost-maximize",
            Self::ReasonableSize => "reasonable-size",
            Self::Normal => "normal",
            Self::Full => "full",
            Self::Center => "center",
            Self::Smaller => "smaller",
            Self::Larger => "larger",
            Self::Taller => "taller",
            Self::Shorter => "shorter",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::AlmostMaximize => "Almost Maximize",
            Self::ReasonableSize => "Reasonable Size",
            Self::Normal => "Normal",
            Self::Full => "Full",
            Self::Center => "Center",
            Self::Smaller => "Smaller",
            Self::Larger => "Larger",
            Self::Taller => "Taller",
            Self::Shorter => "Shorter",
        }
    }

    /// True if the rule is relative to the window's current size.
    pub fn is_relative(self) -> bool {
        matches!(
            self,
            Self::Center | Self::Smaller | Self::Larger | Self::Taller | Self::Shorter
        )
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    /// Parse a preset name; case-insensitive, accepts `_` in place of `-`.
    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.name() == norm)
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

/// Resolve the target size for `preset`.
///
/// `usable` is the usable area of the window's display. Relative presets need
/// `current`; without it they fail with [`Error::MissingCurrentSize`]. The
/// current size is clamped to the usable area first, so every result fits the
/// display.
pub fn resolve(preset: Preset, current: Option<Size>, usable: Size) -> Result<Size> {
    let (w, h) = (usable.width.max(0.0), usable.height.max(0.0));
    let size = match preset {
        Preset::AlmostMaximize => Size::new(0.9 * w, 0.9 * h),
        Preset::ReasonableSize => Size::new(
            (0.6 * w).min(REASONABLE_MAX_WIDTH),
            (0.6 * h).min(REASONABLE_MAX_HEIGHT),
        ),
        Preset::Normal => Size::new(0.6 * w, 0.9 * h),
        Preset::Full => Size::new(MAX_FRACTION * w, MAX_FRACTION * h),
        relative => {
            let cur = current.ok_or(Error::MissingCurrentSize { preset })?;
            let cw = cur.width.clamp(0.0, w);
            let ch = cur.height.clamp(0.0, h);
            match relative {
                Preset::Smaller => Size::new(shrink(cw, NUDGE_STEP * w, MIN_WIDTH), ch),
                Preset::Larger => Size::new(grow(cw, NUDGE_STEP * w, MAX_FRACTION * w), ch),
                Preset::Taller => Size::new(cw, grow(ch, NUDGE_STEP * h, MAX_FRACTION * h)),
                Preset::Shorter => Size::new(cw, shrink(ch, NUDGE_STEP * h, MIN_HEIGHT)),
                // Center
                _ => Size::new(cw, ch),
            }
        }
    };
    Ok(size)
}

/// Shrink by `step`, stopping at `floor` (or at `cur` if already below it).
#[inline]
fn shrink(cur: f64, step: f64, floor: f64) -> f64 {
    (cur - step).max(floor.min(cur))
}

/// Grow by `step`, stopping at `cap` (or at `cur` if already above it).
#[inline]
fn grow(cur: f64, step: f64, cap: f64) -> f64 {
    (cur + step).min(cap.max(cur))
}
