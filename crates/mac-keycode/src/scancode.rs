//! Scancodes (macOS hardware virtual keycodes) and conversions.
//!
//! A "scancode" here is the macOS hardware virtual keycode: the integer in
//! the `kCGKeyboardEventKeycode` field of a CoreGraphics keyboard event, and
//! the `kVK_` constants in `HIToolbox/Events.h`. It is positional and layout
//! independent.

use crate::Key;

/// macOS hardware virtual keycode (`kVK_*`, `NSEvent.keyCode`).
pub type Scancode = u16;

impl TryFrom<Scancode> for Key {
    type Error = ();
    fn try_from(value: Scancode) -> Result<Self, Self::Error> {
        Self::from_scancode(value).ok_or(())
    }
}

impl From<Key> for Scancode {
    fn from(k: Key) -> Self {
        k.scancode()
    }
}

impl Key {
    /// Looks up a `Key` from a macOS scancode.
    pub fn from_scancode(sc: Scancode) -> Option<Self> {
        Self::from_keycode(sc)
    }

    /// Returns the scancode (`kVK_*`) for this key.
    pub const fn scancode(self) -> Scancode {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_round_trips() {
        for k in Key::ALL {
            let sc = k.scancode();
            assert_eq!(Key::from_scancode(sc), Some(*k));
            assert_eq!(Key::try_from(sc).ok(), Some(*k));
            assert_eq!(Scancode::from(*k), sc);
        }
    }

    #[test]
    fn known_codes() {
        assert_eq!(Key::A.scancode(), 0x00);
        assert_eq!(Key::N.scancode(), 0x2D);
        assert_eq!(Key::M.scancode(), 0x2E);
        assert_eq!(Key::LeftArrow.scancode(), 0x7B);
        assert_eq!(Key::UpArrow.scancode(), 0x7E);
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(Key::from_scancode(0xFFFF), None);
        // kVK_Command is a modifier, not a bindable key.
        assert_eq!(Key::from_scancode(0x37), None);
    }
}
