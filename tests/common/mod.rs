//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use warpkeys::keymap::{
    CaptureCompleter, CaptureOutcome, Controllers, HyperWarp, InputProvider, KeyCode, Keymap,
    OrbitLocation, RailsWarp, SlowMotion, TimeController, TimeUnit,
};

/// One frame at 60Hz
pub const FRAME: Duration = Duration::from_millis(16);

/// Calls made against the mock controllers, in order
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Controller mock that appends `"<prefix>.<method> <args>"` to a shared log
pub struct Recorder {
    prefix: &'static str,
    pub ready: bool,
    log: CallLog,
}

impl Recorder {
    fn new(prefix: &'static str, log: CallLog) -> Self {
        Self {
            prefix,
            ready: true,
            log,
        }
    }

    fn push(&self, call: String) {
        self.log.borrow_mut().push(format!("{}.{}", self.prefix, call));
    }
}

impl TimeController for Recorder {
    fn is_ready(&self) -> bool {
        self.ready
    }
    fn toggle_gui(&mut self) {
        self.push("toggle_gui".into());
    }
    fn go_realtime(&mut self) {
        self.push("go_realtime".into());
    }
    fn toggle_pause(&mut self) {
        self.push("toggle_pause".into());
    }
    fn step_frame(&mut self) {
        self.push("step_frame".into());
    }
}

impl HyperWarp for Recorder {
    fn is_ready(&self) -> bool {
        self.ready
    }
    fn toggle(&mut self) {
        self.push("toggle".into());
    }
    fn activate(&mut self) {
        self.push("activate".into());
    }
    fn deactivate(&mut self) {
        self.push("deactivate".into());
    }
    fn set_max_rate(&mut self, rate: f64) {
        self.push(format!("set_max_rate {}", rate));
    }
    fn speed_up(&mut self, step: f64) {
        self.push(format!("speed_up {}", step));
    }
    fn slow_down(&mut self, step: f64) {
        self.push(format!("slow_down {}", step));
    }
    fn set_physics_accuracy(&mut self, accuracy: f64) {
        self.push(format!("set_physics_accuracy {}", accuracy));
    }
    fn increase_physics_accuracy(&mut self, step: f64) {
        self.push(format!("increase_physics_accuracy {}", step));
    }
    fn decrease_physics_accuracy(&mut self, step: f64) {
        self.push(format!("decrease_physics_accuracy {}", step));
    }
}

impl SlowMotion for Recorder {
    fn is_ready(&self) -> bool {
        self.ready
    }
    fn toggle(&mut self) {
        self.push("toggle".into());
    }
    fn activate(&mut self) {
        self.push("activate".into());
    }
    fn deactivate(&mut self) {
        self.push("deactivate".into());
    }
    fn set_rate(&mut self, percent: f64) {
        self.push(format!("set_rate {}", percent));
    }
    fn speed_up(&mut self, percent: f64) {
        self.push(format!("speed_up {}", percent));
    }
    fn slow_down(&mut self, percent: f64) {
        self.push(format!("slow_down {}", percent));
    }
}

impl RailsWarp for Recorder {
    fn is_ready(&self) -> bool {
        self.ready
    }
    fn speed_up(&mut self) {
        self.push("speed_up".into());
    }
    fn slow_down(&mut self) {
        self.push("slow_down".into());
    }
    fn cancel_warp(&mut self) {
        self.push("cancel_warp".into());
    }
    fn warp_for_orbits(&mut self, orbits: f64) {
        self.push(format!("warp_for_orbits {}", orbits));
    }
    fn warp_to_orbit_location(&mut self, location: OrbitLocation, seconds_before: f64) {
        self.push(format!(
            "warp_to_orbit_location {} {}",
            location.name(),
            seconds_before
        ));
    }
    fn warp_for_increments(&mut self, unit: TimeUnit, count: f64) {
        self.push(format!("warp_for_increments {} {}", unit.name(), count));
    }
    fn warp_to_next_increment(&mut self, unit: TimeUnit) {
        self.push(format!("warp_to_next_increment {}", unit.name()));
    }
    fn warp_to_next_alarm(&mut self) {
        self.push("warp_to_next_alarm".into());
    }
}

/// The four controllers sharing one call log
pub struct Host {
    pub time: Recorder,
    pub hyper: Recorder,
    pub slow_mo: Recorder,
    pub rails: Recorder,
    log: CallLog,
}

impl Host {
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            time: Recorder::new("time", log.clone()),
            hyper: Recorder::new("hyper", log.clone()),
            slow_mo: Recorder::new("slow_mo", log.clone()),
            rails: Recorder::new("rails", log.clone()),
            log,
        }
    }

    /// Run one keymap cycle with `held` keys down
    pub fn cycle(&mut self, keymap: &mut Keymap, held: &[KeyCode]) -> Option<CaptureOutcome> {
        let mut controllers = Controllers::new(
            &mut self.time,
            &mut self.hyper,
            &mut self.slow_mo,
            &mut self.rails,
        );
        keymap.update(held, &mut controllers, FRAME)
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

/// Input provider that answers each capture with the next scripted chord
///
/// With no script left the completer is kept, so the capture stays open.
#[derive(Default)]
pub struct ScriptedInput {
    script: Vec<Vec<KeyCode>>,
    pub held: Vec<CaptureCompleter>,
    pub requests: usize,
}

impl ScriptedInput {
    pub fn new(script: Vec<Vec<KeyCode>>) -> Self {
        Self {
            script,
            held: Vec::new(),
            requests: 0,
        }
    }
}

impl InputProvider for ScriptedInput {
    fn capture_next_chord(&mut self, completer: CaptureCompleter) {
        self.requests += 1;
        if self.script.is_empty() {
            self.held.push(completer);
        } else {
            completer.complete(self.script.remove(0));
        }
    }
}
