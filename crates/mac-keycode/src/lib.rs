//! mac-keycode: Virtual keycodes and specs for macOS.
//!
//! - `Key`: the non-modifier keys presize can bind, with their exact macOS
//!   hardware codes (`kVK_*` from HIToolbox `Events.h`). `repr(u16)`.
//! - `Modifier`: modifier keys, ordered the way macOS menus display them.
//! - `Chord`: a modifier set plus one key, parsed from and rendered to specs
//!   like `ctrl+opt+m`.
#![warn(missing_docs)]

mod key;
pub use key::Key;

mod modifiers;
pub use modifiers::{Modifier, modifiers_from_cg_flags};

mod chord;
pub use chord::{Chord, ParseChordError};

mod scancode;
pub use scancode::Scancode;
