//! Reconstruct live bindings from persisted records
//!
//! Each record is validated on its own. Failures are classified as:
//!
//! - unknown action name: the record is dropped
//! - malformed key combination: recoverable, the binding loads unassigned
//! - present but invalid value or sub-discriminator: the record is dropped
//!
//! Construction dispatches on `ActionKind` through exhaustive matches, so a
//! catalog member without a construction arm does not compile.

use thiserror::Error;

use super::action::{Action, ActionKind, Discriminator, OrbitLocation, TimeUnit};
use super::binding::Binding;
use super::chord::{parse_chord, Chord, ChordParseError};
use super::config::BindingRecord;

/// Reasons a record cannot produce a binding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("action {action} has a non-numeric value {raw:?}")]
    InvalidValue { action: ActionKind, raw: String },
    #[error("action {action} has an invalid {field} {raw:?}")]
    InvalidDiscriminator {
        action: ActionKind,
        field: &'static str,
        raw: String,
    },
}

/// A successfully loaded binding
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub binding: Binding,
    /// Set when the key combination could not be parsed and was replaced by
    /// the unassigned chord
    pub chord_error: Option<ChordParseError>,
}

/// Load a binding from a record, logging every failure
///
/// Never panics; `None` means the record was dropped.
pub fn load(record: &BindingRecord) -> Option<Binding> {
    match try_load(record) {
        Ok(loaded) => {
            if let Some(err) = &loaded.chord_error {
                tracing::warn!(
                    action = %record.action,
                    error = %err,
                    "Malformed key combination, binding loaded unassigned"
                );
            }
            Some(loaded.binding)
        }
        Err(err @ LoadError::UnknownAction(_)) => {
            tracing::error!(error = %err, "Dropping binding record for unknown action");
            None
        }
        Err(err) => {
            tracing::error!(error = %err, "Dropping binding record with invalid field");
            None
        }
    }
}

/// Load a binding from a record, returning typed errors
pub fn try_load(record: &BindingRecord) -> Result<Loaded, LoadError> {
    // 1. Resolve the action kind
    let kind = ActionKind::from_name(&record.action)
        .ok_or_else(|| LoadError::UnknownAction(record.action.clone()))?;

    // 2. Chord (recoverable)
    let (chord, chord_error) = match parse_chord(&record.key_combination) {
        Ok(keys) => (Chord::new(keys), None),
        Err(err) => (Chord::none(), Some(err)),
    };

    // 3. Value, when the kind carries one and the record has one
    let value = match (kind.value_spec(), record.value.as_deref()) {
        (Some(_), Some(raw)) => Some(parse_value(kind, raw)?),
        _ => None,
    };

    // 4. Sub-discriminator, same policy
    let mut action = Action::from_kind(kind);
    match kind.discriminator() {
        Some(Discriminator::Location) => {
            if let Some(raw) = record.location.as_deref() {
                let parsed = OrbitLocation::from_name(raw)
                    .ok_or_else(|| invalid_discriminator(kind, Discriminator::Location, raw))?;
                if let Action::WarpToVesselOrbitLocation { location, .. } = &mut action {
                    *location = parsed;
                }
            }
        }
        Some(Discriminator::TimeUnit) => {
            if let Some(raw) = record.time_unit.as_deref() {
                let parsed = TimeUnit::from_name(raw)
                    .ok_or_else(|| invalid_discriminator(kind, Discriminator::TimeUnit, raw))?;
                if let Action::WarpForNTimeIncrements { unit, .. }
                | Action::WarpToNextTimeIncrement { unit } = &mut action
                {
                    *unit = parsed;
                }
            }
        }
        None => {}
    }

    // 5. Assemble
    let mut binding = Binding::new(action).with_chord(chord);
    if let Some(raw) = value {
        binding.set_value(raw);
    }
    binding.set_user_defined(record.is_user_defined);

    Ok(Loaded {
        binding,
        chord_error,
    })
}

fn parse_value(kind: ActionKind, raw: &str) -> Result<f64, LoadError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => Ok(v),
        _ => Err(LoadError::InvalidValue {
            action: kind,
            raw: raw.to_string(),
        }),
    }
}

fn invalid_discriminator(kind: ActionKind, which: Discriminator, raw: &str) -> LoadError {
    LoadError::InvalidDiscriminator {
        action: kind,
        field: which.field(),
        raw: raw.to_string(),
    }
}
