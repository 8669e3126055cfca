//! Binding: one action instance bound to a chord

use std::time::Duration;

use super::action::{Action, ActionKind, FireMode, OrbitLocation, TimeUnit};
use super::chord::Chord;
use super::config::BindingRecord;
use super::controllers::Controllers;
use super::value::{Throttle, ValueParam};

/// Default repeat delay for level-triggered bindings
pub const DEFAULT_REPEAT_DELAY: Duration = Duration::from_millis(200);

/// A single binding of an action to a chord
///
/// `description` and `set_description` are derived from the action and chord
/// and regenerated on every mutation; they cannot be set directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    action: Action,
    chord: Chord,
    is_user_defined: bool,
    description: String,
    set_description: String,
    /// Present only for level-triggered kinds
    throttle: Option<Throttle>,
}

impl Binding {
    /// Create a built-in binding with no chord
    pub fn new(action: Action) -> Self {
        let throttle = match action.kind().fire_mode() {
            FireMode::Level => Some(Throttle::new(DEFAULT_REPEAT_DELAY)),
            FireMode::Edge => None,
        };
        let mut binding = Self {
            action,
            chord: Chord::none(),
            is_user_defined: false,
            description: String::new(),
            set_description: String::new(),
            throttle,
        };
        binding.refresh_labels();
        binding
    }

    /// Create a built-in binding for a kind with default parameters
    pub fn from_kind(kind: ActionKind) -> Self {
        Self::new(Action::from_kind(kind))
    }

    /// Set the chord (builder pattern)
    pub fn with_chord(mut self, chord: impl Into<Chord>) -> Self {
        self.set_chord(chord.into());
        self
    }

    /// Set the value (builder pattern); ignored for kinds without a value
    pub fn with_value(mut self, raw: f64) -> Self {
        self.set_value(raw);
        self
    }

    /// Mark as user-defined (builder pattern)
    pub fn user_defined(mut self) -> Self {
        self.is_user_defined = true;
        self
    }

    pub(crate) fn set_user_defined(&mut self, user_defined: bool) {
        self.is_user_defined = user_defined;
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }

    pub fn chord(&self) -> &Chord {
        &self.chord
    }

    /// False when the chord is empty
    pub fn is_assigned(&self) -> bool {
        !self.chord.is_empty()
    }

    pub fn is_user_defined(&self) -> bool {
        self.is_user_defined
    }

    pub fn fire_mode(&self) -> FireMode {
        self.kind().fire_mode()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&self) -> &str {
        &self.set_description
    }

    pub fn value(&self) -> Option<f64> {
        self.action.value().map(ValueParam::get)
    }

    pub fn value_param(&self) -> Option<&ValueParam> {
        self.action.value()
    }

    pub fn location(&self) -> Option<OrbitLocation> {
        self.action.location()
    }

    pub fn time_unit(&self) -> Option<TimeUnit> {
        self.action.time_unit()
    }

    /// Replace the chord and regenerate the description
    pub fn set_chord(&mut self, chord: Chord) {
        self.chord = chord;
        self.refresh_labels();
    }

    /// Clamp, round and store a new value, then regenerate labels
    ///
    /// Kinds without a value ignore this.
    pub fn set_value(&mut self, raw: f64) {
        let Some(param) = self.action.value_mut() else {
            tracing::debug!(action = %self.kind(), "set_value on a binding without a value");
            return;
        };
        param.set(raw);
        self.refresh_labels();
    }

    /// Change the targeted orbit location; ignored for other kinds
    pub fn set_location(&mut self, new_location: OrbitLocation) {
        if let Action::WarpToVesselOrbitLocation { location, .. } = &mut self.action {
            *location = new_location;
            self.refresh_labels();
        }
    }

    /// Change the time unit; ignored for kinds without one
    pub fn set_time_unit(&mut self, new_unit: TimeUnit) {
        match &mut self.action {
            Action::WarpForNTimeIncrements { unit, .. } | Action::WarpToNextTimeIncrement { unit } => {
                *unit = new_unit;
                self.refresh_labels();
            }
            _ => {}
        }
    }

    /// Repeat delay used while a level-triggered chord is held
    pub fn set_repeat_delay(&mut self, delay: Duration) {
        if let Some(throttle) = &mut self.throttle {
            *throttle = Throttle::new(delay);
        }
    }

    /// Run the press effect
    ///
    /// Edge-triggered kinds call their controller on every invocation.
    /// Level-triggered kinds add `elapsed` to their throttle and only call the
    /// controller once the repeat delay is reached. A controller that is not
    /// ready turns the press into a no-op.
    pub fn press(&mut self, controllers: &mut Controllers<'_>, elapsed: Duration) {
        if let Some(throttle) = &mut self.throttle {
            if !throttle.tick(elapsed) {
                return;
            }
        }
        if !self.action.invoke(controllers) {
            tracing::trace!(action = %self.kind(), "controller not ready, press ignored");
        }
    }

    /// The chord was let go; the next hold fires immediately
    pub fn release(&mut self) {
        if let Some(throttle) = &mut self.throttle {
            throttle.reset();
        }
    }

    /// Persisted form of this binding
    ///
    /// Common fields first; the value and sub-discriminator are appended only
    /// for kinds that carry them.
    pub fn to_record(&self) -> BindingRecord {
        let mut record = BindingRecord {
            action: self.kind().name().to_string(),
            is_user_defined: self.is_user_defined,
            key_combination: self.chord.to_string(),
            value: None,
            location: None,
            time_unit: None,
        };

        if let Some(param) = self.action.value() {
            record.value = Some(param.get().to_string());
        }
        if let Some(location) = self.action.location() {
            record.location = Some(location.name().to_string());
        }
        if let Some(unit) = self.action.time_unit() {
            record.time_unit = Some(unit.name().to_string());
        }

        record
    }

    fn refresh_labels(&mut self) {
        self.description = format!("{} {}", self.action.label(), self.chord);
        self.set_description = self.action.set_label();
    }
}
