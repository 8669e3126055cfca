//! Action catalog: every bindable behavior and the parameters it carries
//!
//! `ActionKind` is the closed, fieldless catalog whose names are persisted.
//! `Action` is the live form: one variant per kind, carrying only the data
//! that kind needs (a bounded value, a location, a time unit).

use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoStaticStr};

use super::controllers::Controllers;
use super::value::{Rounding, ValueParam, ValueSpec};

/// All bindable action kinds
///
/// The persisted name of each kind is part of the configuration format.
/// Never rename a kind; add new ones instead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, IntoStaticStr, EnumIter,
)]
pub enum ActionKind {
    // ========================================================================
    // Time control
    // ========================================================================
    #[strum(serialize = "GUIToggle")]
    GuiToggle,
    Realtime,
    PauseToggle,
    TimeStep,

    // ========================================================================
    // Hyper-warp
    // ========================================================================
    HyperToggle,
    HyperActivate,
    HyperDeactivate,
    HyperRateSetRate,
    HyperRateSpeedUp,
    HyperRateSlowDown,
    HyperPhysicsAccuracySet,
    HyperPhysicsAccuracyUp,
    HyperPhysicsAccuracyDown,

    // ========================================================================
    // Slow-motion
    // ========================================================================
    SlowMoToggle,
    SlowMoActivate,
    SlowMoDeactivate,
    SlowMoSetRate,
    SlowMoSpeedUp,
    SlowMoSlowDown,

    // ========================================================================
    // Rails warp
    // ========================================================================
    RailsSpeedUp,
    RailsSlowDown,
    RailsRealtime,
    WarpForNOrbits,
    WarpToVesselOrbitLocation,
    WarpForNTimeIncrements,
    WarpToNextTimeIncrement,
    #[strum(serialize = "WarpToNextKACAlarm")]
    WarpToNextKacAlarm,
}

/// Whether a binding fires once per press or repeatedly while held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireMode {
    /// Fires once on the up-to-down transition of the chord
    Edge,
    /// Fires while the chord is held, throttled by the repeat delay
    Level,
}

/// Kind-specific sub-discriminator field carried in persisted records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminator {
    Location,
    TimeUnit,
}

impl Discriminator {
    /// Record field name
    pub const fn field(self) -> &'static str {
        match self {
            Discriminator::Location => "location",
            Discriminator::TimeUnit => "time_unit",
        }
    }
}

const HYPER_RATE: ValueSpec = ValueSpec::new(1.0, f64::INFINITY, 2.0, Rounding::Integer);
const HYPER_RATE_STEP: ValueSpec = ValueSpec::new(1.0, 100.0, 1.0, Rounding::Integer);
const PHYSICS_ACCURACY: ValueSpec = ValueSpec::new(1.0, 6.0, 1.0, Rounding::Decimals(2));
const PHYSICS_ACCURACY_STEP: ValueSpec = ValueSpec::new(0.01, 6.0, 0.5, Rounding::Decimals(2));
const SLOWMO_RATE: ValueSpec = ValueSpec::new(0.0, 100.0, 50.0, Rounding::Decimals(1));
const SLOWMO_RATE_STEP: ValueSpec = ValueSpec::new(0.1, 100.0, 5.0, Rounding::Decimals(1));
const ORBIT_COUNT: ValueSpec = ValueSpec::new(1.0, f64::INFINITY, 1.0, Rounding::Integer);
const SECONDS_BEFORE: ValueSpec = ValueSpec::new(0.0, f64::INFINITY, 0.0, Rounding::Integer);
const INCREMENT_COUNT: ValueSpec = ValueSpec::new(1.0, f64::INFINITY, 1.0, Rounding::Integer);

impl ActionKind {
    /// Stable persisted name
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Resolve a persisted name (exact match)
    pub fn from_name(name: &str) -> Option<ActionKind> {
        ActionKind::from_str(name).ok()
    }

    /// Bounds, default and rounding for kinds that carry a value
    pub fn value_spec(self) -> Option<ValueSpec> {
        use ActionKind::*;

        match self {
            HyperRateSetRate => Some(HYPER_RATE),
            HyperRateSpeedUp | HyperRateSlowDown => Some(HYPER_RATE_STEP),
            HyperPhysicsAccuracySet => Some(PHYSICS_ACCURACY),
            HyperPhysicsAccuracyUp | HyperPhysicsAccuracyDown => Some(PHYSICS_ACCURACY_STEP),
            SlowMoSetRate => Some(SLOWMO_RATE),
            SlowMoSpeedUp | SlowMoSlowDown => Some(SLOWMO_RATE_STEP),
            WarpForNOrbits => Some(ORBIT_COUNT),
            WarpToVesselOrbitLocation => Some(SECONDS_BEFORE),
            WarpForNTimeIncrements => Some(INCREMENT_COUNT),
            GuiToggle | Realtime | PauseToggle | TimeStep | HyperToggle | HyperActivate
            | HyperDeactivate | SlowMoToggle | SlowMoActivate | SlowMoDeactivate
            | RailsSpeedUp | RailsSlowDown | RailsRealtime | WarpToNextTimeIncrement
            | WarpToNextKacAlarm => None,
        }
    }

    /// Which sub-discriminator field, if any, this kind persists
    pub fn discriminator(self) -> Option<Discriminator> {
        match self {
            ActionKind::WarpToVesselOrbitLocation => Some(Discriminator::Location),
            ActionKind::WarpForNTimeIncrements | ActionKind::WarpToNextTimeIncrement => {
                Some(Discriminator::TimeUnit)
            }
            _ => None,
        }
    }

    pub fn fire_mode(self) -> FireMode {
        match self {
            ActionKind::HyperRateSpeedUp
            | ActionKind::HyperRateSlowDown
            | ActionKind::HyperPhysicsAccuracyUp
            | ActionKind::HyperPhysicsAccuracyDown
            | ActionKind::SlowMoSpeedUp
            | ActionKind::SlowMoSlowDown => FireMode::Level,
            _ => FireMode::Edge,
        }
    }

    /// Human-readable name for listings
    pub fn display_name(self) -> &'static str {
        use ActionKind::*;

        match self {
            GuiToggle => "Toggle GUI",
            Realtime => "Realtime",
            PauseToggle => "Toggle Pause",
            TimeStep => "Time Step",
            HyperToggle => "Toggle Hyper-Warp",
            HyperActivate => "Activate Hyper-Warp",
            HyperDeactivate => "Deactivate Hyper-Warp",
            HyperRateSetRate => "Set Hyper-Warp Max Rate",
            HyperRateSpeedUp => "Speed Up Hyper-Warp",
            HyperRateSlowDown => "Slow Down Hyper-Warp",
            HyperPhysicsAccuracySet => "Set Hyper-Warp Physics Accuracy",
            HyperPhysicsAccuracyUp => "Increase Hyper-Warp Physics Accuracy",
            HyperPhysicsAccuracyDown => "Decrease Hyper-Warp Physics Accuracy",
            SlowMoToggle => "Toggle Slow-Motion",
            SlowMoActivate => "Activate Slow-Motion",
            SlowMoDeactivate => "Deactivate Slow-Motion",
            SlowMoSetRate => "Set Slow-Motion Rate",
            SlowMoSpeedUp => "Speed Up Slow-Motion",
            SlowMoSlowDown => "Slow Down Slow-Motion",
            RailsSpeedUp => "Speed Up Rails Warp",
            RailsSlowDown => "Slow Down Rails Warp",
            RailsRealtime => "Stop Rails Warp",
            WarpForNOrbits => "Warp for Orbits",
            WarpToVesselOrbitLocation => "Warp to Orbit Location",
            WarpForNTimeIncrements => "Warp for Time",
            WarpToNextTimeIncrement => "Warp to Next Time Increment",
            WarpToNextKacAlarm => "Warp to Next Alarm",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Orbital event targeted by `WarpToVesselOrbitLocation`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter,
)]
pub enum OrbitLocation {
    #[default]
    Apoapsis,
    Periapsis,
    AscendingNode,
    DescendingNode,
    ManeuverNode,
    #[strum(serialize = "SOIChange")]
    SoiChange,
}

impl OrbitLocation {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn from_name(name: &str) -> Option<OrbitLocation> {
        OrbitLocation::from_str(name).ok()
    }

    pub fn label(self) -> &'static str {
        match self {
            OrbitLocation::Apoapsis => "Apoapsis",
            OrbitLocation::Periapsis => "Periapsis",
            OrbitLocation::AscendingNode => "Ascending Node",
            OrbitLocation::DescendingNode => "Descending Node",
            OrbitLocation::ManeuverNode => "Maneuver Node",
            OrbitLocation::SoiChange => "SOI Change",
        }
    }
}

/// Calendar unit used by time-increment warps
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter,
)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    #[default]
    Days,
    Years,
}

impl TimeUnit {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn from_name(name: &str) -> Option<TimeUnit> {
        TimeUnit::from_str(name).ok()
    }

    /// Lowercase unit label, singular or plural
    pub fn label(self, plural: bool) -> &'static str {
        match (self, plural) {
            (TimeUnit::Seconds, false) => "second",
            (TimeUnit::Seconds, true) => "seconds",
            (TimeUnit::Minutes, false) => "minute",
            (TimeUnit::Minutes, true) => "minutes",
            (TimeUnit::Hours, false) => "hour",
            (TimeUnit::Hours, true) => "hours",
            (TimeUnit::Days, false) => "day",
            (TimeUnit::Days, true) => "days",
            (TimeUnit::Years, false) => "year",
            (TimeUnit::Years, true) => "years",
        }
    }
}

/// A live action with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    GuiToggle,
    Realtime,
    PauseToggle,
    TimeStep,

    HyperToggle,
    HyperActivate,
    HyperDeactivate,
    HyperRateSetRate(ValueParam),
    HyperRateSpeedUp(ValueParam),
    HyperRateSlowDown(ValueParam),
    HyperPhysicsAccuracySet(ValueParam),
    HyperPhysicsAccuracyUp(ValueParam),
    HyperPhysicsAccuracyDown(ValueParam),

    SlowMoToggle,
    SlowMoActivate,
    SlowMoDeactivate,
    SlowMoSetRate(ValueParam),
    SlowMoSpeedUp(ValueParam),
    SlowMoSlowDown(ValueParam),

    RailsSpeedUp,
    RailsSlowDown,
    RailsRealtime,
    WarpForNOrbits(ValueParam),
    WarpToVesselOrbitLocation {
        location: OrbitLocation,
        seconds_before: ValueParam,
    },
    WarpForNTimeIncrements {
        unit: TimeUnit,
        count: ValueParam,
    },
    WarpToNextTimeIncrement {
        unit: TimeUnit,
    },
    WarpToNextKacAlarm,
}

impl Action {
    /// Construct the action for a kind with default parameters
    pub fn from_kind(kind: ActionKind) -> Action {
        fn param(spec: ValueSpec) -> ValueParam {
            ValueParam::new(spec)
        }

        match kind {
            ActionKind::GuiToggle => Action::GuiToggle,
            ActionKind::Realtime => Action::Realtime,
            ActionKind::PauseToggle => Action::PauseToggle,
            ActionKind::TimeStep => Action::TimeStep,
            ActionKind::HyperToggle => Action::HyperToggle,
            ActionKind::HyperActivate => Action::HyperActivate,
            ActionKind::HyperDeactivate => Action::HyperDeactivate,
            ActionKind::HyperRateSetRate => Action::HyperRateSetRate(param(HYPER_RATE)),
            ActionKind::HyperRateSpeedUp => Action::HyperRateSpeedUp(param(HYPER_RATE_STEP)),
            ActionKind::HyperRateSlowDown => Action::HyperRateSlowDown(param(HYPER_RATE_STEP)),
            ActionKind::HyperPhysicsAccuracySet => {
                Action::HyperPhysicsAccuracySet(param(PHYSICS_ACCURACY))
            }
            ActionKind::HyperPhysicsAccuracyUp => {
                Action::HyperPhysicsAccuracyUp(param(PHYSICS_ACCURACY_STEP))
            }
            ActionKind::HyperPhysicsAccuracyDown => {
                Action::HyperPhysicsAccuracyDown(param(PHYSICS_ACCURACY_STEP))
            }
            ActionKind::SlowMoToggle => Action::SlowMoToggle,
            ActionKind::SlowMoActivate => Action::SlowMoActivate,
            ActionKind::SlowMoDeactivate => Action::SlowMoDeactivate,
            ActionKind::SlowMoSetRate => Action::SlowMoSetRate(param(SLOWMO_RATE)),
            ActionKind::SlowMoSpeedUp => Action::SlowMoSpeedUp(param(SLOWMO_RATE_STEP)),
            ActionKind::SlowMoSlowDown => Action::SlowMoSlowDown(param(SLOWMO_RATE_STEP)),
            ActionKind::RailsSpeedUp => Action::RailsSpeedUp,
            ActionKind::RailsSlowDown => Action::RailsSlowDown,
            ActionKind::RailsRealtime => Action::RailsRealtime,
            ActionKind::WarpForNOrbits => Action::WarpForNOrbits(param(ORBIT_COUNT)),
            ActionKind::WarpToVesselOrbitLocation => Action::WarpToVesselOrbitLocation {
                location: OrbitLocation::default(),
                seconds_before: param(SECONDS_BEFORE),
            },
            ActionKind::WarpForNTimeIncrements => Action::WarpForNTimeIncrements {
                unit: TimeUnit::default(),
                count: param(INCREMENT_COUNT),
            },
            ActionKind::WarpToNextTimeIncrement => Action::WarpToNextTimeIncrement {
                unit: TimeUnit::default(),
            },
            ActionKind::WarpToNextKacAlarm => Action::WarpToNextKacAlarm,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::GuiToggle => ActionKind::GuiToggle,
            Action::Realtime => ActionKind::Realtime,
            Action::PauseToggle => ActionKind::PauseToggle,
            Action::TimeStep => ActionKind::TimeStep,
            Action::HyperToggle => ActionKind::HyperToggle,
            Action::HyperActivate => ActionKind::HyperActivate,
            Action::HyperDeactivate => ActionKind::HyperDeactivate,
            Action::HyperRateSetRate(_) => ActionKind::HyperRateSetRate,
            Action::HyperRateSpeedUp(_) => ActionKind::HyperRateSpeedUp,
            Action::HyperRateSlowDown(_) => ActionKind::HyperRateSlowDown,
            Action::HyperPhysicsAccuracySet(_) => ActionKind::HyperPhysicsAccuracySet,
            Action::HyperPhysicsAccuracyUp(_) => ActionKind::HyperPhysicsAccuracyUp,
            Action::HyperPhysicsAccuracyDown(_) => ActionKind::HyperPhysicsAccuracyDown,
            Action::SlowMoToggle => ActionKind::SlowMoToggle,
            Action::SlowMoActivate => ActionKind::SlowMoActivate,
            Action::SlowMoDeactivate => ActionKind::SlowMoDeactivate,
            Action::SlowMoSetRate(_) => ActionKind::SlowMoSetRate,
            Action::SlowMoSpeedUp(_) => ActionKind::SlowMoSpeedUp,
            Action::SlowMoSlowDown(_) => ActionKind::SlowMoSlowDown,
            Action::RailsSpeedUp => ActionKind::RailsSpeedUp,
            Action::RailsSlowDown => ActionKind::RailsSlowDown,
            Action::RailsRealtime => ActionKind::RailsRealtime,
            Action::WarpForNOrbits(_) => ActionKind::WarpForNOrbits,
            Action::WarpToVesselOrbitLocation { .. } => ActionKind::WarpToVesselOrbitLocation,
            Action::WarpForNTimeIncrements { .. } => ActionKind::WarpForNTimeIncrements,
            Action::WarpToNextTimeIncrement { .. } => ActionKind::WarpToNextTimeIncrement,
            Action::WarpToNextKacAlarm => ActionKind::WarpToNextKacAlarm,
        }
    }

    /// The bounded value, for kinds that carry one
    pub fn value(&self) -> Option<&ValueParam> {
        match self {
            Action::HyperRateSetRate(v)
            | Action::HyperRateSpeedUp(v)
            | Action::HyperRateSlowDown(v)
            | Action::HyperPhysicsAccuracySet(v)
            | Action::HyperPhysicsAccuracyUp(v)
            | Action::HyperPhysicsAccuracyDown(v)
            | Action::SlowMoSetRate(v)
            | Action::SlowMoSpeedUp(v)
            | Action::SlowMoSlowDown(v)
            | Action::WarpForNOrbits(v)
            | Action::WarpToVesselOrbitLocation {
                seconds_before: v, ..
            }
            | Action::WarpForNTimeIncrements { count: v, .. } => Some(v),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut ValueParam> {
        match self {
            Action::HyperRateSetRate(v)
            | Action::HyperRateSpeedUp(v)
            | Action::HyperRateSlowDown(v)
            | Action::HyperPhysicsAccuracySet(v)
            | Action::HyperPhysicsAccuracyUp(v)
            | Action::HyperPhysicsAccuracyDown(v)
            | Action::SlowMoSetRate(v)
            | Action::SlowMoSpeedUp(v)
            | Action::SlowMoSlowDown(v)
            | Action::WarpForNOrbits(v)
            | Action::WarpToVesselOrbitLocation {
                seconds_before: v, ..
            }
            | Action::WarpForNTimeIncrements { count: v, .. } => Some(v),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<OrbitLocation> {
        match self {
            Action::WarpToVesselOrbitLocation { location, .. } => Some(*location),
            _ => None,
        }
    }

    pub fn time_unit(&self) -> Option<TimeUnit> {
        match self {
            Action::WarpForNTimeIncrements { unit, .. }
            | Action::WarpToNextTimeIncrement { unit } => Some(*unit),
            _ => None,
        }
    }

    /// Current label, with the value and sub-discriminator filled in
    pub fn label(&self) -> String {
        match self {
            Action::HyperRateSetRate(v) => format!("Set Hyper-Warp Max Rate to {}x", v.display()),
            Action::HyperRateSpeedUp(v) => format!("Speed Up Hyper-Warp by {}x", v.display()),
            Action::HyperRateSlowDown(v) => format!("Slow Down Hyper-Warp by {}x", v.display()),
            Action::HyperPhysicsAccuracySet(v) => {
                format!("Set Hyper-Warp Physics Accuracy to {}", v.display())
            }
            Action::HyperPhysicsAccuracyUp(v) => {
                format!("Increase Hyper-Warp Physics Accuracy by {}", v.display())
            }
            Action::HyperPhysicsAccuracyDown(v) => {
                format!("Decrease Hyper-Warp Physics Accuracy by {}", v.display())
            }
            Action::SlowMoSetRate(v) => format!("Set Slow-Motion Rate to {}%", v.display()),
            Action::SlowMoSpeedUp(v) => format!("Speed Up Slow-Motion by {}%", v.display()),
            Action::SlowMoSlowDown(v) => format!("Slow Down Slow-Motion by {}%", v.display()),
            Action::WarpForNOrbits(v) => {
                let plural = v.get() != 1.0;
                format!(
                    "Warp for {} {}",
                    v.display(),
                    if plural { "Orbits" } else { "Orbit" }
                )
            }
            Action::WarpToVesselOrbitLocation {
                location,
                seconds_before,
            } => {
                if seconds_before.get() == 0.0 {
                    format!("Warp to {}", location.label())
                } else {
                    format!(
                        "Warp to {}s before {}",
                        seconds_before.display(),
                        location.label()
                    )
                }
            }
            Action::WarpForNTimeIncrements { unit, count } => format!(
                "Warp for {} {}",
                count.display(),
                unit.label(count.get() != 1.0)
            ),
            Action::WarpToNextTimeIncrement { unit } => {
                format!("Warp to Next {}", unit.label(false))
            }
            _ => self.kind().display_name().to_string(),
        }
    }

    /// Label used when adding or assigning this action
    ///
    /// Empty for kinds without parameters; the location-targeted warp includes
    /// its location.
    pub fn set_label(&self) -> String {
        match self {
            Action::WarpToVesselOrbitLocation { location, .. } => {
                format!("Warp to {}", location.label())
            }
            Action::WarpForNTimeIncrements { unit, .. } => {
                format!("Warp for {}", unit.label(true))
            }
            Action::WarpToNextTimeIncrement { unit } => {
                format!("Warp to Next {}", unit.label(false))
            }
            _ if self.value().is_some() => self.kind().display_name().to_string(),
            _ => String::new(),
        }
    }

    /// Call this action's controller method if the controller is ready
    ///
    /// Returns whether the controller was ready.
    pub(crate) fn invoke(&self, c: &mut Controllers<'_>) -> bool {
        macro_rules! guarded {
            ($controller:expr, $call:expr) => {{
                if !$controller.is_ready() {
                    return false;
                }
                $call;
            }};
        }

        match *self {
            Action::GuiToggle => guarded!(c.time, c.time.toggle_gui()),
            Action::Realtime => guarded!(c.time, c.time.go_realtime()),
            Action::PauseToggle => guarded!(c.time, c.time.toggle_pause()),
            Action::TimeStep => guarded!(c.time, c.time.step_frame()),

            Action::HyperToggle => guarded!(c.hyper, c.hyper.toggle()),
            Action::HyperActivate => guarded!(c.hyper, c.hyper.activate()),
            Action::HyperDeactivate => guarded!(c.hyper, c.hyper.deactivate()),
            Action::HyperRateSetRate(v) => guarded!(c.hyper, c.hyper.set_max_rate(v.get())),
            Action::HyperRateSpeedUp(v) => guarded!(c.hyper, c.hyper.speed_up(v.get())),
            Action::HyperRateSlowDown(v) => guarded!(c.hyper, c.hyper.slow_down(v.get())),
            Action::HyperPhysicsAccuracySet(v) => {
                guarded!(c.hyper, c.hyper.set_physics_accuracy(v.get()))
            }
            Action::HyperPhysicsAccuracyUp(v) => {
                guarded!(c.hyper, c.hyper.increase_physics_accuracy(v.get()))
            }
            Action::HyperPhysicsAccuracyDown(v) => {
                guarded!(c.hyper, c.hyper.decrease_physics_accuracy(v.get()))
            }

            Action::SlowMoToggle => guarded!(c.slow_mo, c.slow_mo.toggle()),
            Action::SlowMoActivate => guarded!(c.slow_mo, c.slow_mo.activate()),
            Action::SlowMoDeactivate => guarded!(c.slow_mo, c.slow_mo.deactivate()),
            Action::SlowMoSetRate(v) => guarded!(c.slow_mo, c.slow_mo.set_rate(v.get())),
            Action::SlowMoSpeedUp(v) => guarded!(c.slow_mo, c.slow_mo.speed_up(v.get())),
            Action::SlowMoSlowDown(v) => guarded!(c.slow_mo, c.slow_mo.slow_down(v.get())),

            Action::RailsSpeedUp => guarded!(c.rails, c.rails.speed_up()),
            Action::RailsSlowDown => guarded!(c.rails, c.rails.slow_down()),
            Action::RailsRealtime => guarded!(c.rails, c.rails.cancel_warp()),
            Action::WarpForNOrbits(v) => guarded!(c.rails, c.rails.warp_for_orbits(v.get())),
            Action::WarpToVesselOrbitLocation {
                location,
                seconds_before,
            } => guarded!(
                c.rails,
                c.rails.warp_to_orbit_location(location, seconds_before.get())
            ),
            Action::WarpForNTimeIncrements { unit, count } => {
                guarded!(c.rails, c.rails.warp_for_increments(unit, count.get()))
            }
            Action::WarpToNextTimeIncrement { unit } => {
                guarded!(c.rails, c.rails.warp_to_next_increment(unit))
            }
            Action::WarpToNextKacAlarm => guarded!(c.rails, c.rails.warp_to_next_alarm()),
        }
        true
    }
}
