use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Key, Modifier};

/// A key chord: a set of modifiers plus a single key.
///
/// Serializes as its canonical spec string, e.g. `"ctrl+opt+cmd+left"`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Chord {
    /// Set of modifier keys held down for this chord.
    pub modifiers: BTreeSet<Modifier>,
    /// The non-modifier key for this chord.
    pub key: Key,
}

/// A chord spec that could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid chord spec: {spec:?}")]
pub struct ParseChordError {
    /// The offending spec.
    pub spec: String,
}

impl Chord {
    /// Build a chord from parts.
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: Key) -> Self {
        Self {
            modifiers: modifiers.into_iter().collect(),
            key,
        }
    }

    /// Parses a chord specification of the form "ctrl+opt+m".
    ///
    /// - Case-insensitive for both modifiers and the key.
    /// - Components are separated by "+"; the last component is always the key spec.
    /// - Modifiers may use aliases handled by `Modifier::from_spec`.
    /// - The key accepts the full `Key::from_spec` space.
    /// - Repeated modifiers collapse; empty components are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').collect();
        let key = Key::from_spec(parts.pop()?)?;
        let mut modifiers = BTreeSet::new();
        for m in parts {
            modifiers.insert(Modifier::from_spec(m)?);
        }
        Some(Self { modifiers, key })
    }

    /// True when the chord carries no modifiers.
    pub fn is_bare(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Returns the canonical string form of this chord: modifiers in
    /// `Modifier` order, then the key, each as its canonical spec.
    pub fn to_string_canonical(&self) -> String {
        let mut out: Vec<&str> = self.modifiers.iter().map(|m| m.to_spec()).collect();
        out.push(self.key.to_spec());
        out.join("+")
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_canonical())
    }
}

impl FromStr for Chord {
    type Err = ParseChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseChordError {
            spec: s.to_string(),
        })
    }
}

impl TryFrom<String> for Chord {
    type Error = ParseChordError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Chord> for String {
    fn from(c: Chord) -> Self {
        c.to_string_canonical()
    }
}
