//! warpkeys - keybindings for time-warp controls
//!
//! This crate provides the binding model, chord codec, persistence and
//! dispatch for keyboard-driven time-warp controllers.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use config::AppConfig;
pub use keymap::{Binding, BindingId, Keymap, KeymapSettings};
