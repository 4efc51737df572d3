use std::{collections::BTreeSet, fmt};

/// Modifier keys that can be part of a chord.
///
/// Declaration order is the order macOS menus display modifiers in
/// (⌃ ⌥ ⇧ ⌘), and is the canonical order for chord specs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Modifier {
    /// ⌃
    Control,
    /// ⌥
    Option,
    /// ⇧
    Shift,
    /// ⌘
    Command,
}

impl Modifier {
    /// Every modifier in canonical order.
    pub const ALL: [Self; 4] = [Self::Control, Self::Option, Self::Shift, Self::Command];

    /// Parses a modifier specification.
    ///
    /// Case-insensitive. Accepts the canonical short forms (`ctrl`, `opt`,
    /// `shift`, `cmd`), full names, and the aliases `alt` and `super`.
    pub fn from_spec(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Some(Self::Control),
            "opt" | "option" | "alt" => Some(Self::Option),
            "shift" => Some(Self::Shift),
            "cmd" | "command" | "super" => Some(Self::Command),
            _ => None,
        }
    }

    /// The canonical spec string, always lowercase.
    pub fn to_spec(self) -> &'static str {
        match self {
            Self::Control => "ctrl",
            Self::Option => "opt",
            Self::Shift => "shift",
            Self::Command => "cmd",
        }
    }

    /// The `CGEventFlags` bit carried by events while this modifier is held.
    pub const fn cg_flag(self) -> u64 {
        match self {
            Self::Shift => 1 << 17,
            Self::Control => 1 << 18,
            Self::Option => 1 << 19,
            Self::Command => 1 << 20,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_spec())
    }
}

/// Construct a modifier set from macOS CGEventFlags bits.
///
/// Only the four device-independent bits are read. Other bits (caps lock,
/// the secondary-fn and numeric-pad bits that arrow keys carry) are ignored.
pub fn modifiers_from_cg_flags(flags: u64) -> BTreeSet<Modifier> {
    Modifier::ALL
        .into_iter()
        .filter(|m| flags & m.cg_flag() != 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_specs() {
        assert_eq!(Modifier::from_spec("cmd"), Some(Modifier::Command));
        assert_eq!(Modifier::from_spec("Command"), Some(Modifier::Command));
        assert_eq!(Modifier::from_spec("ctrl"), Some(Modifier::Control));
        assert_eq!(Modifier::from_spec("alt"), Some(Modifier::Option));
        assert_eq!(Modifier::from_spec("OPT"), Some(Modifier::Option));
        assert_eq!(Modifier::from_spec("fn"), None);
        assert_eq!(Modifier::from_spec("k"), None);

        for m in Modifier::ALL {
            assert_eq!(Modifier::from_spec(m.to_spec()), Some(m));
        }
    }

    #[test]
    fn flags_decode() {
        let none = modifiers_from_cg_flags(0);
        assert!(none.is_empty());

        let flags = (1 << 18) | (1 << 19) | (1 << 20);
        let got: Vec<_> = modifiers_from_cg_flags(flags).into_iter().collect();
        assert_eq!(
            got,
            vec![Modifier::Control, Modifier::Option, Modifier::Command]
        );
    }

    #[test]
    fn arrow_key_flags_are_ignored() {
        // kCGEventFlagMaskSecondaryFn | kCGEventFlagMaskNumericPad | shift
        let flags = (1 << 23) | (1 << 21) | (1 << 17);
        let got: Vec<_> = modifiers_from_cg_flags(flags).into_iter().collect();
        assert_eq!(got, vec![Modifier::Shift]);
    }
}
