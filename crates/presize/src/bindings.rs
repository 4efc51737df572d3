//! Chord-to-preset table.
//!
//! Absolute presets sit on a letter under ⌃⌥; the four nudges sit on the
//! arrow keys under ⌃⌥⌘.

use std::collections::HashMap;

use mac_keycode::{Chord, Key, Modifier};
use presize_engine::Preset;
use thiserror::Error;

/// Modifiers for the absolute presets.
const BASE: [Modifier; 2] = [Modifier::Control, Modifier::Option];
/// Modifiers for the relative nudges.
const EXTENDED: [Modifier; 3] = [Modifier::Control, Modifier::Option, Modifier::Command];

/// The chord a preset is bound to out of the box.
pub fn default_chord(preset: Preset) -> Chord {
    match preset {
        Preset::Normal => Chord::new(BASE, Key::N),
        Preset::ReasonableSize => Chord::new(BASE, Key::R),
        Preset::AlmostMaximize => Chord::new(BASE, Key::M),
        Preset::Full => Chord::new(BASE, Key::F),
        Preset::Center => Chord::new(BASE, Key::C),
        Preset::Smaller => Chord::new(EXTENDED, Key::LeftArrow),
        Preset::Larger => Chord::new(EXTENDED, Key::RightArrow),
        Preset::Taller => Chord::new(EXTENDED, Key::UpArrow),
        Preset::Shorter => Chord::new(EXTENDED, Key::DownArrow),
    }
}

/// A rejected binding table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A chord without modifiers would swallow plain typing.
    #[error("{preset}: chord {chord} has no modifiers")]
    Bare {
        /// Offending preset.
        preset: Preset,
        /// Its chord.
        chord: Chord,
    },
    /// Two presets share a chord.
    #[error("{second}: chord {chord} is already bound to {first}")]
    Duplicate {
        /// Shared chord.
        chord: Chord,
        /// Preset that claimed it first.
        first: Preset,
        /// Preset that collided.
        second: Preset,
    },
    /// One preset was given more than one chord.
    #[error("{preset}: bound more than once")]
    Repeated {
        /// Preset named twice.
        preset: Preset,
    },
}

/// Every preset with its chord, in [`Preset::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    /// One entry per preset.
    entries: Vec<(Preset, Chord)>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            entries: Preset::ALL.iter().map(|&p| (p, default_chord(p))).collect(),
        }
    }
}

impl Bindings {
    /// Defaults with `overrides` applied, validated.
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (Preset, Chord)>,
    ) -> Result<Self, BindingError> {
        let mut table = Self::default();
        let mut touched = Vec::new();
        for (preset, chord) in overrides {
            if touched.contains(&preset) {
                return Err(BindingError::Repeated { preset });
            }
            touched.push(preset);
            if let Some(slot) = table.entries.iter_mut().find(|(p, _)| *p == preset) {
                slot.1 = chord;
            }
        }
        table.validate()?;
        Ok(table)
    }

    /// Reject bare and duplicated chords.
    fn validate(&self) -> Result<(), BindingError> {
        let mut seen: HashMap<&Chord, Preset> = HashMap::new();
        for (preset, chord) in &self.entries {
            if chord.is_bare() {
                return Err(BindingError::Bare {
                    preset: *preset,
                    chord: chord.clone(),
                });
            }
            if let Some(first) = seen.insert(chord, *preset) {
                return Err(BindingError::Duplicate {
                    chord: chord.clone(),
                    first,
                    second: *preset,
                });
            }
        }
        Ok(())
    }

    /// Iterate `(preset, chord)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Preset, &Chord)> {
        self.entries.iter().map(|(p, c)| (*p, c))
    }

    /// The chord bound to `preset`.
    pub fn chord(&self, preset: Preset) -> Option<&Chord> {
        self.iter().find(|(p, _)| *p == preset).map(|(_, c)| c)
    }
}
