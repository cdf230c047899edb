//! Frame timing: wall-clock deltas and fixed-period intervals.
//!
//! `draw_web()` runs at ~60fps with a variable delta. [`FrameClock`] turns
//! the browser's millisecond timestamps into a clamped `dt` in seconds, and
//! [`Interval`] turns a stream of `dt` values into a deterministic number of
//! discrete fires (turn ticks, effect aging) independent of frame rate.

/// Largest delta handed to game logic in one frame, in seconds.
/// Keeps a backgrounded tab from replaying minutes of turns at once.
pub const MAX_FRAME_DT: f32 = 0.5;

pub struct FrameClock {
    /// Timestamp of the last frame (ms), None before the first frame.
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (from `Date.now()` or `performance.now()`).
    /// Returns the elapsed seconds since the previous call, clamped to
    /// `[0, MAX_FRAME_DT]`. The first call returns 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(prev) => ((now_ms - prev) / 1000.0).clamp(0.0, MAX_FRAME_DT as f64) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);
        dt
    }
}

/// Fixed-period tick accumulator.
///
/// Accumulates `dt` and reports how many whole periods were crossed. The
/// remainder is carried into the next call, so cadence does not drift with
/// frame rate.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    period: f32,
    accumulator: f32,
}

impl Interval {
    /// `period` must be positive; non-positive periods never fire.
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulator: 0.0,
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Seconds accumulated toward the next fire.
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Add `dt` seconds and return the number of periods that elapsed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.period <= 0.0 || !dt.is_finite() {
            return 0;
        }
        self.accumulator += dt.max(0.0);
        let remainder = self.accumulator % self.period;
        let fires = ((self.accumulator - remainder) / self.period).round();
        self.accumulator = remainder.max(0.0);
        // `as` saturates.
        fires as u32
    }

    /// Drop any partial progress toward the next fire.
    pub fn restart(&mut self) {
        self.accumulator = 0.0;
    }
}
