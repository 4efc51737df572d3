//! Display enumeration through NSScreen.
//!
//! `NSScreen` frames are already in Cocoa global space: origin at the bottom
//! left of the primary display, y growing upward. AppKit lists the primary
//! display first.

use presize_engine::{Cocoa, Display, DisplaySource, Rect};

/// Current display arrangement from AppKit.
///
/// Must be queried on the main thread; elsewhere it reports no displays.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenSource;

impl DisplaySource for ScreenSource {
    fn displays(&self) -> Vec<Display> {
        platform::screens()
    }
}

/// One screen as read from AppKit.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawScreen {
    /// `NSScreenNumber`, when present.
    number: Option<u32>,
    /// Full frame.
    frame: Rect<Cocoa>,
    /// Frame minus menu bar and Dock.
    visible: Rect<Cocoa>,
}

/// Turn AppKit's ordered screen list into displays. The first entry is the
/// primary display; screens without a number get their 1-based position.
fn assemble(screens: impl IntoIterator<Item = RawScreen>) -> Vec<Display> {
    screens
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let fallback = u32::try_from(i + 1).unwrap_or(u32::MAX);
            Display::new(s.number.unwrap_or(fallback), s.frame, s.visible, i == 0)
        })
        .collect()
}

#[cfg(target_os = "macos")]
mod platform {
    use objc2::MainThreadMarker;
    use objc2_app_kit::NSScreen;
    use objc2_foundation::{NSNumber, NSRect, NSString};
    use presize_engine::{Cocoa, Display, Rect};
    use tracing::{trace, warn};

    use super::{RawScreen, assemble};

    /// Convert an AppKit rect.
    fn cocoa_rect(r: NSRect) -> Rect<Cocoa> {
        Rect::new(r.origin.x, r.origin.y, r.size.width, r.size.height)
    }

    /// `NSScreenNumber` from the screen's device description.
    fn screen_number(screen: &NSScreen, key: &NSString) -> Option<u32> {
        let value = screen.deviceDescription().objectForKey(key)?;
        value.downcast_ref::<NSNumber>().map(|n| n.unsignedIntValue())
    }

    pub(super) fn screens() -> Vec<Display> {
        let Some(mtm) = MainThreadMarker::new() else {
            warn!("NSScreen queried off the main thread");
            return Vec::new();
        };
        let key = NSString::from_str("NSScreenNumber");
        let displays = assemble(NSScreen::screens(mtm).iter().map(|s| RawScreen {
            number: screen_number(&s, &key),
            frame: cocoa_rect(s.frame()),
            visible: cocoa_rect(s.visibleFrame()),
        }));
        trace!(count = displays.len(), "screens");
        displays
    }
}

#[cfg(not(target_os = "macos"))]
mod platform {
    use presize_engine::Display;

    use super::{RawScreen, assemble};

    pub(super) fn screens() -> Vec<Display> {
        assemble(Vec::<RawScreen>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(number: Option<u32>, x: f64, y: f64, w: f64, h: f64) -> RawScreen {
        let frame = Rect::new(x, y, w, h);
        RawScreen {
            number,
            frame,
            visible: Rect::new(x, y, w, h - 25.0),
        }
    }

    #[test]
    fn first_screen_is_primary() {
        let ds = assemble([
            raw(Some(69_732_928), 0.0, 0.0, 1440.0, 900.0),
            raw(Some(4_128_835), 1440.0, -300.0, 2560.0, 1440.0),
        ]);
        assert_eq!(ds.len(), 2);
        assert!(ds[0].is_primary);
        assert!(!ds[1].is_primary);
        assert_eq!(ds[0].id, 69_732_928);
        assert_eq!(ds[1].usable.h, 1415.0);
    }

    #[test]
    fn missing_numbers_fall_back_to_position() {
        let ds = assemble([raw(None, 0.0, 0.0, 10.0, 100.0), raw(None, 10.0, 0.0, 10.0, 100.0)]);
        assert_eq!(ds.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn no_screens() {
        assert!(assemble(Vec::new()).is_empty());
    }
}
