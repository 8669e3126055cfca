//! Core types for the keymap system: KeyCode and modifier classification
//!
//! Key codes carry stable text names. Those names are written into persisted
//! key combinations, so a variant must never be renamed once shipped.

use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoStaticStr};

/// The four physical modifier pairs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Control,
    Alt,
    Command,
}

impl Modifier {
    /// Token used in the bracketed chord text (`[Shift]`, `[Ctrl]`, ...)
    pub const fn token(self) -> &'static str {
        match self {
            Modifier::Shift => "Shift",
            Modifier::Control => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Command => "Cmd",
        }
    }

    /// Canonical (left-side) key code for this modifier
    pub const fn left_key(self) -> KeyCode {
        match self {
            Modifier::Shift => KeyCode::LeftShift,
            Modifier::Control => KeyCode::LeftControl,
            Modifier::Alt => KeyCode::LeftAlt,
            Modifier::Command => KeyCode::LeftCommand,
        }
    }

    /// Resolve a modifier token from chord text
    pub fn from_token(token: &str) -> Option<Modifier> {
        match token {
            "Shift" => Some(Modifier::Shift),
            "Ctrl" => Some(Modifier::Control),
            "Alt" => Some(Modifier::Alt),
            "Cmd" => Some(Modifier::Command),
            _ => None,
        }
    }
}

/// A physical key code
///
/// Names follow the host engine's key naming (`Alpha1`, `Keypad0`,
/// `LeftControl`, ...). The order of variants is irrelevant to persistence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, IntoStaticStr, EnumIter,
)]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Number row
    Alpha0,
    Alpha1,
    Alpha2,
    Alpha3,
    Alpha4,
    Alpha5,
    Alpha6,
    Alpha7,
    Alpha8,
    Alpha9,

    // Numpad
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadPeriod,
    KeypadDivide,
    KeypadMultiply,
    KeypadMinus,
    KeypadPlus,
    KeypadEnter,
    KeypadEquals,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,

    // Navigation
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing / control
    Backspace,
    Delete,
    Tab,
    Clear,
    Return,
    Pause,
    Escape,
    Space,

    // Punctuation
    Quote,
    BackQuote,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equals,
    LeftBracket,
    Backslash,
    RightBracket,

    // Locks
    Numlock,
    CapsLock,
    ScrollLock,

    // Modifiers
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftCommand,
    RightCommand,
    LeftWindows,
    RightWindows,
    AltGr,

    // Misc
    Help,
    Print,
    SysReq,
    Break,
    Menu,

    // Mouse buttons can be bound too
    Mouse0,
    Mouse1,
    Mouse2,
    Mouse3,
    Mouse4,
    Mouse5,
    Mouse6,
}

impl KeyCode {
    /// Stable persisted name of this key
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Look up a key by its persisted name (exact match)
    pub fn from_name(name: &str) -> Option<KeyCode> {
        KeyCode::from_str(name).ok()
    }

    /// Which modifier pair this key belongs to, if any
    pub const fn modifier(self) -> Option<Modifier> {
        match self {
            KeyCode::LeftShift | KeyCode::RightShift => Some(Modifier::Shift),
            KeyCode::LeftControl | KeyCode::RightControl => Some(Modifier::Control),
            KeyCode::LeftAlt | KeyCode::RightAlt => Some(Modifier::Alt),
            KeyCode::LeftCommand | KeyCode::RightCommand => Some(Modifier::Command),
            _ => None,
        }
    }

    /// Whether this key is one of the four modifier pairs
    #[inline]
    pub const fn is_modifier(self) -> bool {
        self.modifier().is_some()
    }

    /// Map right-side modifiers onto their left-side code; other keys are unchanged
    pub const fn canonical(self) -> KeyCode {
        match self.modifier() {
            Some(m) => m.left_key(),
            None => self,
        }
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
