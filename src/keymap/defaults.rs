//! Built-in default bindings
//!
//! Every catalog kind gets exactly one built-in binding. The common toggles
//! and rate controls ship with a chord; the rest start unassigned and are
//! bound by the user.

use std::path::Path;

use strum::IntoEnumIterator;

use super::action::ActionKind;
use super::binding::Binding;
use super::config::{records_to_yaml, KeymapError};
use super::keymap::{Keymap, KeymapSettings};
use super::types::KeyCode;

/// Chord shipped for a kind, if any
fn default_chord(kind: ActionKind) -> Vec<KeyCode> {
    use KeyCode::{LeftAlt as Alt, LeftControl as Ctrl, LeftShift as Shift};

    match kind {
        // ====================================================================
        // Time control
        // ====================================================================
        ActionKind::GuiToggle => vec![Ctrl, Alt, KeyCode::T],
        ActionKind::Realtime => vec![Alt, KeyCode::Slash],
        ActionKind::PauseToggle => vec![Ctrl, KeyCode::P],
        ActionKind::TimeStep => vec![Ctrl, KeyCode::Period],

        // ====================================================================
        // Hyper-warp
        // ====================================================================
        ActionKind::HyperToggle => vec![Alt, KeyCode::H],
        ActionKind::HyperRateSpeedUp => vec![Alt, KeyCode::Equals],
        ActionKind::HyperRateSlowDown => vec![Alt, KeyCode::Minus],
        ActionKind::HyperPhysicsAccuracyUp => vec![Alt, Shift, KeyCode::Equals],
        ActionKind::HyperPhysicsAccuracyDown => vec![Alt, Shift, KeyCode::Minus],

        // ====================================================================
        // Slow-motion
        // ====================================================================
        ActionKind::SlowMoToggle => vec![Alt, KeyCode::S],
        ActionKind::SlowMoSpeedUp => vec![Ctrl, KeyCode::Equals],
        ActionKind::SlowMoSlowDown => vec![Ctrl, KeyCode::Minus],

        // ====================================================================
        // Rails warp
        // ====================================================================
        ActionKind::RailsRealtime => vec![Alt, KeyCode::Backslash],
        ActionKind::WarpToNextKacAlarm => vec![Alt, KeyCode::K],

        ActionKind::HyperActivate
        | ActionKind::HyperDeactivate
        | ActionKind::HyperRateSetRate
        | ActionKind::HyperPhysicsAccuracySet
        | ActionKind::SlowMoActivate
        | ActionKind::SlowMoDeactivate
        | ActionKind::SlowMoSetRate
        | ActionKind::RailsSpeedUp
        | ActionKind::RailsSlowDown
        | ActionKind::WarpForNOrbits
        | ActionKind::WarpToVesselOrbitLocation
        | ActionKind::WarpForNTimeIncrements
        | ActionKind::WarpToNextTimeIncrement => Vec::new(),
    }
}

/// The built-in default set, one binding per catalog kind in catalog order
pub fn default_bindings() -> Vec<Binding> {
    ActionKind::iter()
        .map(|kind| Binding::from_kind(kind).with_chord(default_chord(kind)))
        .collect()
}

/// The default set as a keymap YAML document
pub fn default_keymap_yaml() -> Result<String, KeymapError> {
    let records: Vec<_> = default_bindings().iter().map(Binding::to_record).collect();
    records_to_yaml(&records)
}

/// Build a keymap from the defaults plus the keymap file at `path`
///
/// A missing or unreadable file leaves the defaults in place.
pub fn load_keymap(settings: KeymapSettings, path: &Path) -> Keymap {
    let mut keymap = Keymap::with_defaults(settings);

    if !path.exists() {
        tracing::info!("No keymap at {}, using defaults", path.display());
        return keymap;
    }

    match std::fs::read_to_string(path) {
        Ok(yaml) => match keymap.load_yaml(&yaml) {
            Ok(report) => {
                tracing::info!(
                    "Loaded keymap from {} ({} added, {} replaced, {} dropped)",
                    path.display(),
                    report.added,
                    report.replaced,
                    report.dropped
                );
            }
            Err(e) => {
                tracing::warn!("Failed to parse keymap {}: {}", path.display(), e);
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read keymap {}: {}", path.display(), e);
        }
    }

    keymap
}
