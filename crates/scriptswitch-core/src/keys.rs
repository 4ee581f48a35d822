//! Platform-neutral key identities and modifier masks.
//!
//! Adapters translate their native key codes into [`Key`] before events reach
//! the engine; everything downstream reasons about these values only.

/// A pressed or released key, normalized away from any platform key code.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// A letter key, stored as its lowercase ASCII byte (`b'a'..=b'z'`).
    Letter(u8),
    /// A digit key on the main row, stored as its ASCII byte (`b'0'..=b'9'`).
    Digit(u8),
    Space,
    Backspace,
    Return,
    Tab,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Shift,
    Control,
    Alt,
    Super,
    /// Any key the adapter does not map; carries the raw platform code so it
    /// can round-trip through replay untouched.
    Other(u16),
}

impl Key {
    /// Builds a `Letter` from a char, normalizing case. Returns `None` for
    /// anything outside ASCII letters.
    #[must_use]
    pub fn letter(ch: char) -> Option<Self> {
        ch.is_ascii_alphabetic()
            .then(|| Self::Letter(ch.to_ascii_lowercase() as u8))
    }

    #[must_use]
    pub const fn is_letter(self) -> bool {
        matches!(self, Self::Letter(_))
    }

    /// Caret-movement keys: arrows, Home/End, PageUp/PageDown.
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::Left
                | Self::Right
                | Self::Up
                | Self::Down
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    /// Keys that commit or abandon a pending composition.
    #[must_use]
    pub const fn is_commit(self) -> bool {
        matches!(self, Self::Return | Self::Tab | Self::Escape)
    }

    #[must_use]
    pub const fn is_modifier(self) -> bool {
        matches!(self, Self::Shift | Self::Control | Self::Alt | Self::Super)
    }
}

/// Modifier keys held alongside a key event, as a bitmask.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const SUPER: Self = Self(1 << 3);

    /// Modifiers that turn a letter keystroke into a chord the switcher must
    /// leave alone. Shift is excluded: shifted letters are still typing.
    pub const BLOCKING: Self = Self(Self::CONTROL.0 | Self::ALT.0 | Self::SUPER.0);

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when a chord-forming modifier (control/alt/super) is held.
    #[must_use]
    pub const fn has_blocking(self) -> bool {
        self.intersects(Self::BLOCKING)
    }
}
