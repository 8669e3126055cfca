//! Integration tests for the keymap system

use std::time::Duration;

use strum::IntoEnumIterator;

use super::*;

/// Records every controller call as text
#[derive(Debug)]
struct Recording {
    ready: bool,
    calls: Vec<String>,
}

impl Recording {
    fn ready() -> Self {
        Self {
            ready: true,
            calls: Vec::new(),
        }
    }

    fn log(&mut self, call: impl Into<String>) {
        self.calls.push(call.into());
    }
}

impl TimeController for Recording {
    fn is_ready(&self) -> bool {
        self.ready
    }
    fn toggle_gui(&mut self) {
        self.log("toggle_gui");
    }
    fn go_realtime(&mut self) {
        self.log("go_realtime");
    }
    fn toggle_pause(&mut self) {
        self.log("toggle_pause");
    }
    fn step_frame(&mut self) {
        self.log("step_frame");
    }
}

impl HyperWarp for Recording {
    fn is_ready(&self) -> bool {
        self.ready
    }
    fn toggle(&mut self) {
        self.log("toggle");
    }
    fn activate(&mut self) {
        self.log("activate");
    }
    fn deactivate(&mut self) {
        self.log("deactivate");
    }
    fn set_max_rate(&mut self, rate: f64) {
        self.log(format!("set_max_rate {}", rate));
    }
    fn speed_up(&mut self, step: f64) {
        self.log(format!("speed_up {}", step));
    }
    fn slow_down(&mut self, step: f64) {
        self.log(format!("slow_down {}", step));
    }
    fn set_physics_accuracy(&mut self, accuracy: f64) {
        self.log(format!("set_physics_accuracy {}", accuracy));
    }
    fn increase_physics_accuracy(&mut self, step: f64) {
        self.log(format!("increase_physics_accuracy {}", step));
    }
    fn decrease_physics_accuracy(&mut self, step: f64) {
        self.log(format!("decrease_physics_accuracy {}", step));
    }
}

impl SlowMotion for Recording {
    fn is_ready(&self) -> bool {
        self.ready
    }
    fn toggle(&mut self) {
        self.log("toggle");
    }
    fn activate(&mut self) {
        self.log("activate");
    }
    fn deactivate(&mut self) {
        self.log("deactivate");
    }
    fn set_rate(&mut self, percent: f64) {
        self.log(format!("set_rate {}", percent));
    }
    fn speed_up(&mut self, percent: f64) {
        self.log(format!("speed_up {}", percent));
    }
    fn slow_down(&mut self, percent: f64) {
        self.log(format!("slow_down {}", percent));
    }
}

impl RailsWarp for Recording {
    fn is_ready(&self) -> bool {
        self.ready
    }
    fn speed_up(&mut self) {
        self.log("speed_up");
    }
    fn slow_down(&mut self) {
        self.log("slow_down");
    }
    fn cancel_warp(&mut self) {
        self.log("cancel_warp");
    }
    fn warp_for_orbits(&mut self, orbits: f64) {
        self.log(format!("warp_for_orbits {}", orbits));
    }
    fn warp_to_orbit_location(&mut self, location: OrbitLocation, seconds_before: f64) {
        self.log(format!("warp_to_orbit_location {} {}", location.name(), seconds_before));
    }
    fn warp_for_increments(&mut self, unit: TimeUnit, count: f64) {
        self.log(format!("warp_for_increments {} {}", unit.name(), count));
    }
    fn warp_to_next_increment(&mut self, unit: TimeUnit) {
        self.log(format!("warp_to_next_increment {}", unit.name()));
    }
    fn warp_to_next_alarm(&mut self) {
        self.log("warp_to_next_alarm");
    }
}

struct Rig {
    time: Recording,
    hyper: Recording,
    slow_mo: Recording,
    rails: Recording,
}

impl Rig {
    fn new() -> Self {
        Self {
            time: Recording::ready(),
            hyper: Recording::ready(),
            slow_mo: Recording::ready(),
            rails: Recording::ready(),
        }
    }

    fn update(
        &mut self,
        keymap: &mut Keymap,
        held: &[KeyCode],
        elapsed: Duration,
    ) -> Option<CaptureOutcome> {
        let mut controllers = Controllers::new(
            &mut self.time,
            &mut self.hyper,
            &mut self.slow_mo,
            &mut self.rails,
        );
        keymap.update(held, &mut controllers, elapsed)
    }
}

/// Provider that keeps the completer for the test to resolve later
#[derive(Default)]
struct HeldProvider {
    pending: Vec<CaptureCompleter>,
}

impl InputProvider for HeldProvider {
    fn capture_next_chord(&mut self, completer: CaptureCompleter) {
        self.pending.push(completer);
    }
}

const FRAME: Duration = Duration::from_millis(16);

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_edge_binding_fires_once_per_press() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let mut rig = Rig::new();
    let ctrl_p = [KeyCode::LeftControl, KeyCode::P];

    rig.update(&mut keymap, &ctrl_p, FRAME);
    rig.update(&mut keymap, &ctrl_p, FRAME);
    rig.update(&mut keymap, &ctrl_p, FRAME);
    assert_eq!(rig.time.calls, vec!["toggle_pause"]);

    rig.update(&mut keymap, &[], FRAME);
    rig.update(&mut keymap, &ctrl_p, FRAME);
    assert_eq!(rig.time.calls, vec!["toggle_pause", "toggle_pause"]);
}

#[test]
fn test_held_order_and_side_do_not_matter() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let mut rig = Rig::new();

    rig.update(&mut keymap, &[KeyCode::P, KeyCode::RightControl], FRAME);
    assert_eq!(rig.time.calls, vec!["toggle_pause"]);
}

#[test]
fn test_extra_held_key_prevents_match() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let mut rig = Rig::new();

    rig.update(
        &mut keymap,
        &[KeyCode::LeftControl, KeyCode::LeftShift, KeyCode::P],
        FRAME,
    );
    assert!(rig.time.calls.is_empty());
}

#[test]
fn test_level_binding_is_throttled() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let mut rig = Rig::new();
    let alt_equals = [KeyCode::LeftAlt, KeyCode::Equals];

    // fires on the first frame, then once 200ms of hold have accumulated
    for _ in 0..26 {
        rig.update(&mut keymap, &alt_equals, FRAME);
    }
    assert_eq!(rig.hyper.calls, vec!["speed_up 1", "speed_up 1"]);
}

#[test]
fn test_level_release_reprimes() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let mut rig = Rig::new();
    let ctrl_minus = [KeyCode::LeftControl, KeyCode::Minus];

    rig.update(&mut keymap, &ctrl_minus, FRAME);
    rig.update(&mut keymap, &[], FRAME);
    rig.update(&mut keymap, &ctrl_minus, FRAME);
    assert_eq!(rig.slow_mo.calls, vec!["slow_down 5", "slow_down 5"]);
}

#[test]
fn test_not_ready_controller_is_noop() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let mut rig = Rig::new();
    rig.rails.ready = false;

    rig.update(&mut keymap, &[KeyCode::LeftAlt, KeyCode::K], FRAME);
    assert!(rig.rails.calls.is_empty());
}

#[test]
fn test_value_forwarded_to_controller() {
    let mut keymap = Keymap::new(KeymapSettings::default());
    let id = keymap.insert_user(
        Binding::from_kind(ActionKind::WarpToVesselOrbitLocation)
            .with_chord(vec![KeyCode::LeftShift, KeyCode::W])
            .with_value(30.0),
    );
    keymap
        .get_mut(id)
        .unwrap()
        .set_location(OrbitLocation::Periapsis);

    let mut rig = Rig::new();
    rig.update(&mut keymap, &[KeyCode::LeftShift, KeyCode::W], FRAME);
    assert_eq!(rig.rails.calls, vec!["warp_to_orbit_location Periapsis 30"]);
}

#[test]
fn test_unassigned_binding_never_fires() {
    let mut keymap = Keymap::new(KeymapSettings::default());
    keymap.add_user_binding(ActionKind::TimeStep);
    let mut rig = Rig::new();

    rig.update(&mut keymap, &[], FRAME);
    assert!(rig.time.calls.is_empty());
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_iteration_is_stable_by_kind() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let user = keymap.add_user_binding(ActionKind::GuiToggle);

    let kinds: Vec<ActionKind> = keymap.iter().map(|(_, b)| b.kind()).collect();
    let mut sorted = kinds.clone();
    sorted.sort();
    assert_eq!(kinds, sorted);

    // user binding follows the built-in of the same kind
    let ids: Vec<BindingId> = keymap.iter().map(|(id, _)| id).collect();
    assert_eq!(ids[1], user);
}

#[test]
fn test_reset_keeps_user_bindings() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let user = keymap.add_user_binding(ActionKind::SlowMoSetRate);
    let pause = keymap.find(ActionKind::PauseToggle).unwrap();
    keymap.get_mut(pause).unwrap().set_chord(Chord::none());

    keymap.reset_to_defaults();

    assert!(keymap.get(user).is_some());
    assert_eq!(keymap.len(), ActionKind::iter().count() + 1);
    let pause = keymap.find(ActionKind::PauseToggle).unwrap();
    assert_eq!(keymap.get(pause).unwrap().chord().to_string(), "[Ctrl][P]");
}

#[test]
fn test_delete_user_binding() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let user = keymap.add_user_binding(ActionKind::WarpForNOrbits);
    let removed = keymap.delete(user).unwrap();
    assert_eq!(removed.kind(), ActionKind::WarpForNOrbits);
    assert!(keymap.get(user).is_none());

    let builtin = keymap.find(ActionKind::WarpForNOrbits).unwrap();
    assert_eq!(keymap.delete(builtin), Err(KeymapError::BuiltIn(builtin)));
}

// ============================================================================
// Capture
// ============================================================================

#[test]
fn test_capture_assigns_chord() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let id = keymap.add_user_binding(ActionKind::HyperActivate);
    let mut provider = HeldProvider::default();
    let mut rig = Rig::new();

    keymap.begin_capture(id, &mut provider).unwrap();
    assert_eq!(keymap.capture_in_flight(), Some(id));
    assert_eq!(rig.update(&mut keymap, &[], FRAME), None);

    let completer = provider.pending.pop().unwrap();
    completer.complete(vec![KeyCode::RightAlt, KeyCode::A]);

    let outcome = rig.update(&mut keymap, &[], FRAME);
    assert_eq!(
        outcome,
        Some(CaptureOutcome::Assigned {
            binding: id,
            keys: vec![KeyCode::RightAlt, KeyCode::A],
        })
    );
    assert_eq!(keymap.capture_in_flight(), None);
    assert_eq!(keymap.get(id).unwrap().chord().to_string(), "[Alt][A]");
}

#[test]
fn test_second_capture_rejected_and_first_completes() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let a = keymap.find(ActionKind::HyperActivate).unwrap();
    let b = keymap.find(ActionKind::HyperDeactivate).unwrap();
    let mut provider = HeldProvider::default();

    keymap.begin_capture(a, &mut provider).unwrap();
    assert_eq!(
        keymap.begin_capture(b, &mut provider),
        Err(CaptureError::InFlight(a))
    );
    assert_eq!(
        keymap.begin_capture(a, &mut provider),
        Err(CaptureError::InFlight(a))
    );
    assert_eq!(provider.pending.len(), 1);

    provider.pending.remove(0).complete(vec![KeyCode::F5]);
    let outcome = keymap.poll_capture(FRAME);
    assert!(matches!(outcome, Some(CaptureOutcome::Assigned { binding, .. }) if binding == a));
    assert!(!keymap.get(b).unwrap().is_assigned());
}

#[test]
fn test_capture_unknown_binding() {
    let mut keymap = Keymap::default();
    let mut provider = HeldProvider::default();
    let id = BindingId::from_raw(42);
    assert_eq!(
        keymap.begin_capture(id, &mut provider),
        Err(CaptureError::UnknownBinding(id))
    );
    assert!(provider.pending.is_empty());
}

#[test]
fn test_capture_timeout() {
    let settings = KeymapSettings {
        capture_timeout: Duration::from_millis(100),
        ..KeymapSettings::default()
    };
    let mut keymap = Keymap::with_defaults(settings);
    let id = keymap.find(ActionKind::TimeStep).unwrap();
    let mut provider = HeldProvider::default();

    keymap.begin_capture(id, &mut provider).unwrap();
    assert_eq!(keymap.poll_capture(Duration::from_millis(60)), None);
    assert_eq!(
        keymap.poll_capture(Duration::from_millis(60)),
        Some(CaptureOutcome::TimedOut { binding: id })
    );

    // a late completion is ignored
    let before = keymap.get(id).unwrap().chord().clone();
    provider.pending.remove(0).complete(vec![KeyCode::Q]);
    assert_eq!(keymap.poll_capture(FRAME), None);
    assert_eq!(keymap.get(id).unwrap().chord(), &before);
}

#[test]
fn test_cancelled_capture_ignores_completer() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let a = keymap.find(ActionKind::HyperActivate).unwrap();
    let b = keymap.find(ActionKind::HyperDeactivate).unwrap();
    let mut provider = HeldProvider::default();

    keymap.begin_capture(a, &mut provider).unwrap();
    assert_eq!(keymap.cancel_capture(), Some(a));
    keymap.begin_capture(b, &mut provider).unwrap();

    // completer from the first session resolves nothing
    provider.pending.remove(0).complete(vec![KeyCode::Z]);
    assert_eq!(keymap.poll_capture(FRAME), None);
    assert!(!keymap.get(a).unwrap().is_assigned());
    assert_eq!(keymap.capture_in_flight(), Some(b));
}

#[test]
fn test_chord_held_when_capture_completes_does_not_fire() {
    let mut keymap = Keymap::new(KeymapSettings::default());
    let id = keymap.add_user_binding(ActionKind::PauseToggle);
    let mut provider = HeldProvider::default();
    let mut rig = Rig::new();
    let ctrl_f = [KeyCode::LeftControl, KeyCode::F];

    keymap.begin_capture(id, &mut provider).unwrap();
    provider.pending.pop().unwrap().complete(ctrl_f.to_vec());

    let outcome = rig.update(&mut keymap, &ctrl_f, FRAME);
    assert!(matches!(outcome, Some(CaptureOutcome::Assigned { .. })));
    rig.update(&mut keymap, &ctrl_f, FRAME);
    assert!(rig.time.calls.is_empty());

    rig.update(&mut keymap, &[], FRAME);
    rig.update(&mut keymap, &ctrl_f, FRAME);
    assert_eq!(rig.time.calls, vec!["toggle_pause"]);
}

#[test]
fn test_dispatch_paused_during_capture() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let id = keymap.add_user_binding(ActionKind::Realtime);
    let mut provider = HeldProvider::default();
    let mut rig = Rig::new();

    keymap.begin_capture(id, &mut provider).unwrap();
    rig.update(&mut keymap, &[KeyCode::LeftControl, KeyCode::P], FRAME);
    assert!(rig.time.calls.is_empty());
}

#[test]
fn test_deleting_capture_target_cancels_capture() {
    let mut keymap = Keymap::default();
    let id = keymap.add_user_binding(ActionKind::Realtime);
    let mut provider = HeldProvider::default();

    keymap.begin_capture(id, &mut provider).unwrap();
    keymap.delete(id).unwrap();
    assert_eq!(keymap.capture_in_flight(), None);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_yaml_roundtrip_preserves_set() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let user = keymap.insert_user(
        Binding::from_kind(ActionKind::HyperRateSetRate)
            .with_chord(vec![KeyCode::LeftControl, KeyCode::F])
            .with_value(5.0),
    );
    let unit = keymap.add_user_binding(ActionKind::WarpToNextTimeIncrement);
    keymap.get_mut(unit).unwrap().set_time_unit(TimeUnit::Minutes);

    let yaml = keymap.to_yaml().unwrap();

    let mut restored = Keymap::with_defaults(KeymapSettings::default());
    let report = restored.load_yaml(&yaml).unwrap();
    assert_eq!(report.dropped, 0);
    assert_eq!(report.added, 2);
    assert_eq!(report.replaced, ActionKind::iter().count());
    assert_eq!(restored.to_records(), keymap.to_records());

    let rate = restored
        .iter()
        .find(|(_, b)| b.is_user_defined() && b.kind() == ActionKind::HyperRateSetRate)
        .map(|(_, b)| b.clone())
        .unwrap();
    assert_eq!(&rate, keymap.get(user).unwrap());
}

#[test]
fn test_corrupt_records_are_isolated() {
    let yaml = r#"
bindings:
  - action: PauseToggle
    key_combination: "[F9]"
  - action: NotAnAction
    key_combination: "[F]"
  - action: SlowMoSetRate
    value: "slow"
  - action: WarpToNextTimeIncrement
    time_unit: Eons
  - key_combination: "[G]"
  - action: TimeStep
    key_combination: "[Ctrl]+[F]"
    is_user_defined: true
"#;
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    let report = keymap.load_yaml(yaml).unwrap();

    assert_eq!(
        report,
        LoadReport {
            added: 1,
            replaced: 1,
            dropped: 4,
        }
    );
    let pause = keymap.find(ActionKind::PauseToggle).unwrap();
    assert_eq!(keymap.get(pause).unwrap().chord().to_string(), "[F9]");

    let step = keymap
        .iter()
        .find(|(_, b)| b.is_user_defined())
        .map(|(_, b)| b.clone())
        .unwrap();
    assert_eq!(step.kind(), ActionKind::TimeStep);
    assert!(!step.is_assigned());
}

#[test]
fn test_mistyped_chord_loads_unassigned() {
    let yaml = "bindings:\n - action: PauseToggle\n   key_combination: ~\n - action: TimeStep\n   key_combination: 42\n";
    let mut keymap = Keymap::new(KeymapSettings::default());
    let report = keymap.load_yaml(yaml).unwrap();

    assert_eq!(
        report,
        LoadReport {
            added: 2,
            replaced: 0,
            dropped: 0,
        }
    );
    let kinds: Vec<_> = keymap.iter().map(|(_, b)| b.kind()).collect();
    assert_eq!(kinds, vec![ActionKind::PauseToggle, ActionKind::TimeStep]);
    assert!(keymap.iter().all(|(_, b)| !b.is_assigned()));
}

#[test]
fn test_load_prefers_matching_discriminator() {
    let mut keymap = Keymap::new(KeymapSettings::default());
    keymap.insert(Binding::from_kind(ActionKind::WarpToNextTimeIncrement));
    let hours = keymap.insert(Binding::from_kind(ActionKind::WarpToNextTimeIncrement));
    keymap.get_mut(hours).unwrap().set_time_unit(TimeUnit::Hours);

    let yaml = r#"
bindings:
  - action: WarpToNextTimeIncrement
    key_combination: "[H]"
    time_unit: Hours
"#;
    let report = keymap.load_yaml(yaml).unwrap();
    assert_eq!(report.replaced, 1);
    assert_eq!(keymap.get(hours).unwrap().chord().to_string(), "[H]");
}

#[test]
fn test_load_yaml_rejects_non_keymap() {
    let mut keymap = Keymap::with_defaults(KeymapSettings::default());
    assert!(matches!(
        keymap.load_yaml("- just\n- a list\n"),
        Err(KeymapError::Parse(_))
    ));
    assert_eq!(keymap.len(), ActionKind::iter().count());
}
