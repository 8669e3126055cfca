//! Bounded numeric parameter carried by value bindings

use std::time::Duration;

/// How a mid-range value is rounded before storage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Whole numbers (rates, counts, seconds)
    Integer,
    /// Fixed number of decimal places (accuracy, percentages)
    Decimals(u8),
}

impl Rounding {
    pub fn apply(self, raw: f64) -> f64 {
        match self {
            Rounding::Integer => raw.round(),
            Rounding::Decimals(places) => {
                let scale = 10f64.powi(i32::from(places));
                (raw * scale).round() / scale
            }
        }
    }

    /// Format a value with the precision this policy stores
    pub fn format(self, value: f64) -> String {
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_string();
        }
        match self {
            Rounding::Integer => format!("{:.0}", value),
            Rounding::Decimals(places) => format!("{:.*}", usize::from(places), value),
        }
    }
}

/// Fixed bounds, default and rounding of one action kind's value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueSpec {
    pub min: f64,
    /// May be `f64::INFINITY`
    pub max: f64,
    pub default: f64,
    pub rounding: Rounding,
}

impl ValueSpec {
    pub const fn new(min: f64, max: f64, default: f64, rounding: Rounding) -> Self {
        Self {
            min,
            max,
            default,
            rounding,
        }
    }

    /// Clamp and round a raw value into range
    ///
    /// `raw >= max` stores max, `raw <= min` stores min, anything else is
    /// rounded. NaN stores min.
    pub fn normalize(&self, raw: f64) -> f64 {
        if raw.is_nan() {
            return self.min;
        }
        if raw >= self.max {
            return self.max;
        }
        if raw <= self.min {
            return self.min;
        }
        // Rounding near a bound must not step outside it
        self.rounding.apply(raw).clamp(self.min, self.max)
    }
}

/// A value together with the `ValueSpec` that constrains it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueParam {
    value: f64,
    spec: ValueSpec,
}

impl ValueParam {
    /// Create a parameter holding the default value
    pub fn new(spec: ValueSpec) -> Self {
        Self {
            value: spec.normalize(spec.default),
            spec,
        }
    }

    pub fn with_value(spec: ValueSpec, raw: f64) -> Self {
        Self {
            value: spec.normalize(raw),
            spec,
        }
    }

    pub fn set(&mut self, raw: f64) {
        self.value = self.spec.normalize(raw);
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.spec.min
    }

    pub fn max(&self) -> f64 {
        self.spec.max
    }

    pub fn spec(&self) -> &ValueSpec {
        &self.spec
    }

    /// The value formatted at its stored precision
    pub fn display(&self) -> String {
        self.spec.rounding.format(self.value)
    }
}

/// Rate limiter for level-triggered (fire-while-held) bindings
///
/// Starts primed so the first press of a hold fires immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
    accumulated: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            accumulated: delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Accumulate elapsed time; true when the delay has been reached
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated >= self.delay {
            self.accumulated = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Re-prime after the chord is released
    pub fn reset(&mut self) {
        self.accumulated = self.delay;
    }
}
