//! Chord text codec
//!
//! A chord is written as a run of bracketed tokens, one per key, in the order
//! the keys were reported: `[Ctrl][F]`, `[Shift][Keypad5]`. An empty chord is
//! written `[None]`.
//!
//! Both sides of a modifier pair format to the same token, and parsing a
//! modifier token always yields the left-side code. `parse_chord(format_chord(c))`
//! therefore only reproduces `c` exactly when it holds no right-side modifiers.
//! Persisted data depends on the left-side form, so this is kept as is.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::types::{KeyCode, Modifier};

/// Text written for an unassigned chord
pub const NONE_TOKEN: &str = "None";

/// Errors from parsing chord text. Any error rejects the whole text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordParseError {
    #[error("key combination must be wrapped in brackets: {0:?}")]
    MissingBrackets(String),
    #[error("unknown key {token:?} in key combination {text:?}")]
    UnknownKey { token: String, text: String },
}

/// Format key codes as bracketed chord text
pub fn format_chord(keys: &[KeyCode]) -> String {
    if keys.is_empty() {
        return format!("[{NONE_TOKEN}]");
    }

    let mut out = String::with_capacity(keys.len() * 6);
    for key in keys {
        out.push('[');
        match key.modifier() {
            Some(m) => out.push_str(m.token()),
            None => out.push_str(key.name()),
        }
        out.push(']');
    }
    out
}

/// Parse bracketed chord text back into key codes
pub fn parse_chord(text: &str) -> Result<Vec<KeyCode>, ChordParseError> {
    let interior = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| ChordParseError::MissingBrackets(text.to_string()))?;

    let tokens: Vec<&str> = if interior.contains("][") {
        interior.split("][").collect()
    } else {
        vec![interior]
    };

    let mut keys = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token == NONE_TOKEN {
            continue;
        }
        if let Some(m) = Modifier::from_token(token) {
            keys.push(m.left_key());
            continue;
        }
        let key = KeyCode::from_name(token).ok_or_else(|| ChordParseError::UnknownKey {
            token: token.to_string(),
            text: text.to_string(),
        })?;
        keys.push(key);
    }

    Ok(keys)
}

/// An ordered key combination. Empty means unassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Chord(Vec<KeyCode>);

impl Chord {
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self(keys)
    }

    /// The unassigned chord
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when exactly this chord's keys are held
    ///
    /// Both sides compare in left-side canonical form and as sets, so holding
    /// RightControl+F satisfies `[Ctrl][F]` and holding Ctrl+Shift+F does not.
    /// An empty chord never matches.
    pub fn matches_held(&self, held: &[KeyCode]) -> bool {
        if self.0.is_empty() {
            return false;
        }
        let mut want: Vec<KeyCode> = self.0.iter().map(|k| k.canonical()).collect();
        let mut have: Vec<KeyCode> = held.iter().map(|k| k.canonical()).collect();
        want.sort_unstable();
        want.dedup();
        have.sort_unstable();
        have.dedup();
        want == have
    }
}

impl From<Vec<KeyCode>> for Chord {
    fn from(keys: Vec<KeyCode>) -> Self {
        Self(keys)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_chord(&self.0))
    }
}

impl FromStr for Chord {
    type Err = ChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_chord(s).map(Chord)
    }
}
