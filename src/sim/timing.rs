//! Fixed-interval tick accumulator
//!
//! Decouples the logical tick rate from the host's render cadence.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Accumulates wall-clock time and hands out fixed-interval ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeAccumulator {
    accumulated: f64,
    interval: f64,
}

impl TimeAccumulator {
    pub fn new(interval: f64) -> Result<Self> {
        if !(interval.is_finite() && interval > 0.0) {
            return Err(SimError::invalid(format!(
                "tick interval must be positive, got {interval}"
            )));
        }
        Ok(Self {
            accumulated: 0.0,
            interval,
        })
    }

    /// Add elapsed wall-clock seconds. Zero, negative and NaN are ignored.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        if elapsed_seconds > 0.0 && elapsed_seconds.is_finite() {
            self.accumulated += elapsed_seconds;
        }
    }

    /// Consume exactly one interval if one is pending.
    ///
    /// Call in a loop for strict catch-up.
    pub fn consume_tick(&mut self) -> bool {
        if self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            true
        } else {
            false
        }
    }

    /// Fire at most one tick and reduce the backlog modulo the interval.
    ///
    /// Under heavy frame drops the extra whole intervals are forfeited
    /// rather than replayed, which keeps gameplay pacing steady.
    pub fn consume_tick_dropping_backlog(&mut self) -> bool {
        if self.accumulated >= self.interval {
            self.accumulated %= self.interval;
            true
        } else {
            false
        }
    }

    /// Discard whole pending intervals, keeping the fractional remainder
    pub fn drop_backlog(&mut self) -> u64 {
        let dropped = (self.accumulated / self.interval).floor();
        self.accumulated %= self.interval;
        dropped as u64
    }

    /// Time accumulated toward the next tick
    pub fn pending(&self) -> f64 {
        self.accumulated
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Fraction of the next tick already accumulated, for render interpolation
    pub fn alpha(&self) -> f64 {
        (self.accumulated / self.interval).min(1.0)
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
