//! Fixed-timestep frame clock and countdown timers.
//!
//! The simulation never looks at wall time. Every step advances the clock by
//! exactly [`FRAME_DT`], and every timer in the game is a [`Countdown`] that is
//! decremented by that same quantum.

use bevy::prelude::*;

/// Length of one simulation step in seconds.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Remaining time at or below this value counts as expired.
///
/// Sixty decrements of `1/60` in `f32` do not land exactly on zero, so without
/// a tolerance a one second timer could expire a frame late.
pub const TIMER_EPSILON: f32 = 1e-4;

/// Monotonic game clock advanced once per step.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FrameClock {
    /// Number of steps taken so far.
    pub frame: u64,
    /// Seconds of game time elapsed (`frame * FRAME_DT`).
    pub elapsed: f64,
}

impl FrameClock {
    pub fn advance(&mut self) {
        self.frame += 1;
        self.elapsed += f64::from(FRAME_DT);
    }

    /// Seconds elapsed since `since`, as measured by this clock.
    pub fn seconds_since(&self, since: f64) -> f32 {
        (self.elapsed - since) as f32
    }
}

/// A timer counting down to zero in frame-clock seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Restart the countdown at `seconds`.
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds;
    }

    /// Extend the countdown so at least `seconds` remain.
    pub fn extend_to(&mut self, seconds: f32) {
        self.remaining = self.remaining.max(seconds);
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.remaining > TIMER_EPSILON
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    /// Advance by `dt`. Returns `true` only on the tick that expires the timer.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= TIMER_EPSILON {
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }
}
