//! Bindable keys and their spec names.

// One table drives the enum, scancode lookup, and spec names so they cannot
// drift apart. Each entry: variant = kVK code => canonical spec.
macro_rules! define_keys {
    ( $( $(#[$doc:meta])* $name:ident = $code:literal => $spec:literal, )* ) => {
        /// A non-modifier key, valued by its macOS virtual keycode.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[repr(u16)]
        pub enum Key {
            $( $(#[$doc])* $name = $code, )*
        }

        impl Key {
            /// Every key, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$name, )* ];

            /// Looks up a key from its virtual keycode.
            pub fn from_keycode(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$name), )*
                    _ => None,
                }
            }

            /// The enum variant name, e.g. `"LeftArrow"`.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )*
                }
            }

            /// The canonical spec string, always lowercase, e.g. `"left"`.
            pub fn to_spec(self) -> &'static str {
                match self {
                    $( Self::$name => $spec, )*
                }
            }
        }
    };
}

define_keys! {
    A = 0x00 => "a",
    S = 0x01 => "s",
    D = 0x02 => "d",
    F = 0x03 => "f",
    H = 0x04 => "h",
    G = 0x05 => "g",
    Z = 0x06 => "z",
    X = 0x07 => "x",
    C = 0x08 => "c",
    V = 0x09 => "v",
    B = 0x0B => "b",
    Q = 0x0C => "q",
    W = 0x0D => "w",
    E = 0x0E => "e",
    R = 0x0F => "r",
    Y = 0x10 => "y",
    T = 0x11 => "t",
    Digit1 = 0x12 => "1",
    Digit2 = 0x13 => "2",
    Digit3 = 0x14 => "3",
    Digit4 = 0x15 => "4",
    Digit6 = 0x16 => "6",
    Digit5 = 0x17 => "5",
    Equal = 0x18 => "=",
    Digit9 = 0x19 => "9",
    Digit7 = 0x1A => "7",
    Minus = 0x1B => "-",
    Digit8 = 0x1C => "8",
    Digit0 = 0x1D => "0",
    O = 0x1F => "o",
    U = 0x20 => "u",
    I = 0x22 => "i",
    P = 0x23 => "p",
    Return = 0x24 => "return",
    L = 0x25 => "l",
    J = 0x26 => "j",
    K = 0x28 => "k",
    Comma = 0x2B => ",",
    Slash = 0x2C => "/",
    N = 0x2D => "n",
    M = 0x2E => "m",
    Period = 0x2F => ".",
    Tab = 0x30 => "tab",
    Space = 0x31 => "space",
    Escape = 0x35 => "esc",
    LeftArrow = 0x7B => "left",
    RightArrow = 0x7C => "right",
    DownArrow = 0x7D => "down",
    UpArrow = 0x7E => "up",
}

/// Alias words accepted when parsing, beyond canonical specs and variant names.
const ALIASES: &[(&str, Key)] = &[
    ("enter", Key::Return),
    ("ret", Key::Return),
    ("escape", Key::Escape),
    ("minus", Key::Minus),
    ("equal", Key::Equal),
    ("comma", Key::Comma),
    ("period", Key::Period),
    ("slash", Key::Slash),
];

impl Key {
    /// Parses a key specification.
    ///
    /// Accepts, case-insensitively: the canonical spec (`"m"`, `"left"`, `","`),
    /// the variant name (`"LeftArrow"`, `"Digit1"`), and a few alias words
    /// (`"enter"`, `"escape"`, `"comma"`, ...).
    pub fn from_spec(s: &str) -> Option<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.to_spec() == lowered || k.name().eq_ignore_ascii_case(&lowered))
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == lowered)
                    .map(|(_, k)| *k)
            })
    }

    /// True for the four arrow keys.
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::LeftArrow | Self::RightArrow | Self::UpArrow | Self::DownArrow
        )
    }
}
