//! Saw-tooth countdown that blinks the edit cursor.
//!
//! The counter runs from `+N` down to `-N` and wraps back to `+N`, so one
//! period is `2N + 1` ticks.  The cursor is visible during the positive
//! half, and never while the screensaver is drawing.

use crate::config::CURSOR_TICKS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorTimer {
    countdown: i32,
    half_period: i32,
}

impl Default for CursorTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorTimer {
    pub const fn new() -> Self {
        Self::with_half_period(CURSOR_TICKS)
    }

    /// A timer cycling through `[-half_period, half_period]`.
    pub const fn with_half_period(half_period: i32) -> Self {
        Self {
            countdown: half_period,
            half_period,
        }
    }

    /// Advance one control tick.
    pub fn tick(&mut self) {
        self.countdown -= 1;
        if self.countdown < -self.half_period {
            self.countdown = self.half_period;
        }
    }

    /// Restart the visible phase, e.g. after the user moves the cursor.
    pub fn reset(&mut self) {
        self.countdown = self.half_period;
    }

    pub fn is_visible(&self, screensaver_on: bool) -> bool {
        self.countdown > 0 && !screensaver_on
    }

    pub fn countdown(&self) -> i32 {
        self.countdown
    }

    /// Ticks in one full blink cycle.
    pub fn period(&self) -> u32 {
        (2 * self.half_period + 1) as u32
    }
}
