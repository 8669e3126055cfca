//! Configurable warp-control keybindings
//!
//! This module provides a data-driven binding system that:
//! - Maps key chords to time-warp controller actions
//! - Persists bindings as YAML records and reloads them record by record
//! - Captures new chords asynchronously through an input provider
//! - Repeats held rate controls at a throttled pace
//!
//! # Architecture
//!
//! ```text
//! held keys → Keymap::update() → Binding::press() → Action::invoke() → controller
//! keymap.yaml → BindingRecord → factory::load() → Binding
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! let mut keymap = Keymap::with_defaults(KeymapSettings::default());
//! let report = keymap.load_yaml(&std::fs::read_to_string("keymap.yaml")?)?;
//! ```

mod action;
mod binding;
mod capture;
mod chord;
mod config;
mod controllers;
mod defaults;
mod factory;
#[allow(clippy::module_inception)]
mod keymap;
mod types;
mod value;

pub use action::{Action, ActionKind, Discriminator, FireMode, OrbitLocation, TimeUnit};
pub use binding::{Binding, DEFAULT_REPEAT_DELAY};
pub use capture::{CaptureCompleter, CaptureError, CaptureOutcome, InputProvider};
pub use chord::{format_chord, parse_chord, Chord, ChordParseError, NONE_TOKEN};
pub use config::{parse_keymap_yaml, records_to_yaml, BindingRecord, KeymapError, RecordResult};
pub use controllers::{Controllers, HyperWarp, RailsWarp, SlowMotion, TimeController};
pub use defaults::{default_bindings, default_keymap_yaml, load_keymap};
pub use factory::{load, try_load, LoadError, Loaded};
pub use keymap::{BindingId, Keymap, KeymapSettings, LoadReport, DEFAULT_CAPTURE_TIMEOUT};
pub use types::{KeyCode, Modifier};
pub use value::{Rounding, Throttle, ValueParam, ValueSpec};

#[cfg(test)]
mod tests;
