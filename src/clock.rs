//! Per-applet clock/gate edge tracking.
//!
//! [`ClockGateTracker`] owns all tick-based timing an applet instance needs:
//!
//! - rising-edge detection routed to the hemisphere's own digital lines, or
//!   to the forwarded master clock on RIGHT channel 0;
//! - the last clock tick per channel, for tempo estimation;
//! - auto-closing clock pulses on the outputs;
//! - ADC lag: after a digital edge the matching CV reading settles a few
//!   ticks later.
//!
//! ```text
//! if io.clock(ch) { io.start_adc_lag(ch) }
//! if io.end_of_adc_lag(ch) { let cv = io.input(ch); ... }
//! ```

use crate::app::ports::DigitalInputPort;
use crate::config::{ADC_LAG, TICKS_PER_MS};
use crate::hemisphere::Hemisphere;
use crate::io::{clock_input, gate_input};

/// Single-shot countdown between an edge and a settled ADC reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdcLag {
    /// Never armed since the last reset.
    #[default]
    Idle,
    /// Ticks left, including the firing tick.
    Counting(u16),
    /// Fired; stays here until re-armed.
    Expired,
}

impl AdcLag {
    pub fn arm(&mut self, ticks: u16) {
        *self = if ticks == 0 {
            Self::Expired
        } else {
            Self::Counting(ticks)
        };
    }

    /// Decrement; `true` exactly once, on the tick the count reaches zero.
    pub fn step(&mut self) -> bool {
        match *self {
            Self::Counting(1) => {
                *self = Self::Expired;
                true
            }
            Self::Counting(n) => {
                *self = Self::Counting(n - 1);
                false
            }
            Self::Idle | Self::Expired => false,
        }
    }
}

/// Clock/gate state for one applet instance.
#[derive(Debug, Clone, Default)]
pub struct ClockGateTracker {
    hemisphere: Hemisphere,
    forwarded: bool,
    last_clock: [u32; 2],
    clock_countdown: [u32; 2],
    adc_lag: [AdcLag; 2],
}

impl ClockGateTracker {
    pub fn new(hemisphere: Hemisphere) -> Self {
        Self {
            hemisphere,
            ..Self::default()
        }
    }

    /// Rebind to `hemisphere` and clear pulse and lag timers.
    /// `last_clock` is kept so tempo estimates survive reselection.
    pub fn bind(&mut self, hemisphere: Hemisphere) {
        self.hemisphere = hemisphere;
        self.clock_countdown = [0; 2];
        self.adc_lag = [AdcLag::Idle; 2];
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Update the master clock bus from the global forwarding flag.
    /// Only RIGHT ever observes the forwarded clock.
    pub fn set_forwarding(&mut self, master_clock_on: bool) {
        self.forwarded = master_clock_on && self.hemisphere == Hemisphere::Right;
    }

    pub fn forwarding(&self) -> bool {
        self.forwarded
    }

    // ── Inputs ────────────────────────────────────────────────

    /// `true` on the tick a rising edge is seen on `ch`'s clock line.
    /// Records the tick for [`ticks_since_clock`](Self::ticks_since_clock).
    pub fn clock<D>(&mut self, ch: usize, inputs: &mut D, now: u32) -> bool
    where
        D: DigitalInputPort + ?Sized,
    {
        let clocked = inputs.clocked(clock_input(self.hemisphere, ch, self.forwarded));
        if clocked {
            self.last_clock[ch] = now;
        }
        clocked
    }

    /// Level of `ch`'s own line.  Forwarding never applies to gates.
    pub fn gate<D>(&self, ch: usize, inputs: &mut D) -> bool
    where
        D: DigitalInputPort + ?Sized,
    {
        inputs.read_immediate(gate_input(self.hemisphere, ch))
    }

    pub fn last_clock(&self, ch: usize) -> u32 {
        self.last_clock[ch]
    }

    pub fn ticks_since_clock(&self, ch: usize, now: u32) -> u32 {
        now.wrapping_sub(self.last_clock[ch])
    }

    /// Approximate milliseconds since the last clock on `ch`.
    pub fn time_since_clock(&self, ch: usize, now: u32) -> u32 {
        self.ticks_since_clock(ch, now) / TICKS_PER_MS
    }

    // ── Output pulses ─────────────────────────────────────────

    /// Arm (or re-arm) the auto-close countdown for output `ch`.
    pub fn arm_clock_out(&mut self, ch: usize, ticks: u32) {
        self.clock_countdown[ch] = ticks;
    }

    /// Advance the pulse countdown; `true` on the tick the gate must close.
    pub fn step_clock_out(&mut self, ch: usize) -> bool {
        match self.clock_countdown[ch] {
            0 => false,
            n => {
                self.clock_countdown[ch] = n - 1;
                n == 1
            }
        }
    }

    pub fn clock_countdown(&self, ch: usize) -> u32 {
        self.clock_countdown[ch]
    }

    // ── ADC lag ───────────────────────────────────────────────

    pub fn start_adc_lag(&mut self, ch: usize) {
        self.start_adc_lag_for(ch, ADC_LAG);
    }

    pub fn start_adc_lag_for(&mut self, ch: usize, ticks: u16) {
        self.adc_lag[ch].arm(ticks);
    }

    /// Call once per tick after arming; `true` exactly once when the lag ends.
    pub fn end_of_adc_lag(&mut self, ch: usize) -> bool {
        self.adc_lag[ch].step()
    }

    pub fn adc_lag(&self, ch: usize) -> AdcLag {
        self.adc_lag[ch]
    }
}
