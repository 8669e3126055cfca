//! Controller surface invoked by binding presses
//!
//! Controllers are owned by the host. Each exposes a readiness flag; a binding
//! whose controller is not ready does nothing when pressed.

use super::action::{OrbitLocation, TimeUnit};

/// Global time control: GUI, realtime, pause, frame stepping
pub trait TimeController {
    fn is_ready(&self) -> bool;
    fn toggle_gui(&mut self);
    fn go_realtime(&mut self);
    fn toggle_pause(&mut self);
    fn step_frame(&mut self);
}

/// Physics-preserving accelerated time
pub trait HyperWarp {
    fn is_ready(&self) -> bool;
    fn toggle(&mut self);
    fn activate(&mut self);
    fn deactivate(&mut self);
    fn set_max_rate(&mut self, rate: f64);
    fn speed_up(&mut self, step: f64);
    fn slow_down(&mut self, step: f64);
    fn set_physics_accuracy(&mut self, accuracy: f64);
    fn increase_physics_accuracy(&mut self, step: f64);
    fn decrease_physics_accuracy(&mut self, step: f64);
}

/// Slowed-down time. Rates are percentages of realtime.
pub trait SlowMotion {
    fn is_ready(&self) -> bool;
    fn toggle(&mut self);
    fn activate(&mut self);
    fn deactivate(&mut self);
    fn set_rate(&mut self, percent: f64);
    fn speed_up(&mut self, percent: f64);
    fn slow_down(&mut self, percent: f64);
}

/// On-rails time warp
pub trait RailsWarp {
    fn is_ready(&self) -> bool;
    fn speed_up(&mut self);
    fn slow_down(&mut self);
    fn cancel_warp(&mut self);
    fn warp_for_orbits(&mut self, orbits: f64);
    fn warp_to_orbit_location(&mut self, location: OrbitLocation, seconds_before: f64);
    fn warp_for_increments(&mut self, unit: TimeUnit, count: f64);
    fn warp_to_next_increment(&mut self, unit: TimeUnit);
    fn warp_to_next_alarm(&mut self);
}

/// Borrowed set of controllers handed to `press`
pub struct Controllers<'a> {
    pub time: &'a mut dyn TimeController,
    pub hyper: &'a mut dyn HyperWarp,
    pub slow_mo: &'a mut dyn SlowMotion,
    pub rails: &'a mut dyn RailsWarp,
}

impl<'a> Controllers<'a> {
    pub fn new(
        time: &'a mut dyn TimeController,
        hyper: &'a mut dyn HyperWarp,
        slow_mo: &'a mut dyn SlowMotion,
        rails: &'a mut dyn RailsWarp,
    ) -> Self {
        Self {
            time,
            hyper,
            slow_mo,
            rails,
        }
    }
}
