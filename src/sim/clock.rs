//! Simulation timekeeping
//!
//! Spawning runs on its own cadences, but they are driven by the same `dt`
//! as physics, so a session replays identically from a seed and a fixed
//! frame delta.

use serde::{Deserialize, Serialize};

/// A periodic trigger fed by elapsed simulation time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    period: f32,
    elapsed: f32,
}

impl Cadence {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Time accumulated toward the next firing
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Add `dt` seconds and return how many periods completed
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !(self.period > 0.0) || !(dt > 0.0) {
            return 0;
        }
        self.elapsed += dt;
        if !self.elapsed.is_finite() {
            self.elapsed = 0.0;
            return 0;
        }
        let periods = (self.elapsed / self.period).floor();
        self.elapsed = (self.elapsed - periods * self.period).clamp(0.0, self.period);
        if self.elapsed >= self.period {
            self.elapsed = 0.0;
        }
        // Float to int casts saturate
        periods as u32
    }

    /// Restart the period from zero. Safe to call any number of times.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Fixed timestep accumulator for hosts with a variable frame delta
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    max_steps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps,
            accumulator: 0.0,
        }
    }

    /// Add frame time and return the number of fixed steps to run.
    /// Backlog beyond `max_steps` is dropped to prevent a spiral of death.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
