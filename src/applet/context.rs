//! Per-instance host state and the contexts applet hooks run in.

use crate::app::ports::Hardware;
use crate::clock::ClockGateTracker;
use crate::config::{CLOCK_TICKS, DETENT, GATE_HIGH_OCTAVE, OCTAVE};
use crate::cursor::CursorTimer;
use crate::hemisphere::Hemisphere;
use crate::io::output_channel;

/// Everything the host tracks for one applet instance.
///
/// `inputs` is written once per control tick by the host; `outputs` records
/// what the applet last wrote so views can draw it without touching the DAC.
#[derive(Debug, Clone, Default)]
pub struct HemisphereState {
    pub(crate) hemisphere: Hemisphere,
    pub(crate) inputs: [i32; 2],
    pub(crate) outputs: [i32; 2],
    pub(crate) clock: ClockGateTracker,
    pub(crate) cursor: CursorTimer,
    pub(crate) help_active: bool,
    pub(crate) applet_started: bool,
    pub(crate) screensaver_on: bool,
    pub(crate) last_view_tick: u32,
}

impl HemisphereState {
    /// Bind to `hemisphere` and zero every per-selection timer and buffer.
    pub(crate) fn bind(&mut self, hemisphere: Hemisphere) {
        self.hemisphere = hemisphere;
        self.inputs = [0; 2];
        self.outputs = [0; 2];
        self.clock.bind(hemisphere);
        self.cursor.reset();
        self.help_active = false;
        self.screensaver_on = false;
    }

    pub(crate) fn write_output(
        &mut self,
        hw: &mut dyn Hardware,
        ch: usize,
        value: i32,
        octave: i32,
    ) {
        hw.set_pitch(output_channel(self.hemisphere, ch), value, octave);
        self.outputs[ch] = value + octave * OCTAVE;
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn view_in(&self, ch: usize) -> i32 {
        self.inputs[ch]
    }

    pub fn view_out(&self, ch: usize) -> i32 {
        self.outputs[ch]
    }

    pub fn clock(&self) -> &ClockGateTracker {
        &self.clock
    }

    pub fn cursor(&self) -> &CursorTimer {
        &self.cursor
    }

    pub fn help_active(&self) -> bool {
        self.help_active
    }

    pub fn applet_started(&self) -> bool {
        self.applet_started
    }

    pub fn screensaver_on(&self) -> bool {
        self.screensaver_on
    }

    pub fn last_view_tick(&self) -> u32 {
        self.last_view_tick
    }

    /// Whether the master clock is being forwarded to this instance.
    pub fn master_clock_forwarded(&self) -> bool {
        self.clock.forwarding()
    }

    pub fn cursor_blink(&self) -> bool {
        self.cursor.is_visible(self.screensaver_on)
    }
}

/// Control-path context handed to `start` and `controller`.
///
/// Channel arguments are hemisphere-local (0 or 1).
pub struct Io<'a> {
    state: &'a mut HemisphereState,
    hw: &'a mut dyn Hardware,
}

impl<'a> Io<'a> {
    pub(crate) fn new(state: &'a mut HemisphereState, hw: &'a mut dyn Hardware) -> Self {
        Self { state, hw }
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.state.hemisphere
    }

    /// Current global tick.
    pub fn ticks(&self) -> u32 {
        self.hw.ticks()
    }

    // ── CV ────────────────────────────────────────────────────

    /// This tick's sample of input `ch`.
    pub fn input(&self, ch: usize) -> i32 {
        self.state.inputs[ch]
    }

    /// Input `ch`, reading 0 inside the centre detent.
    pub fn detented_input(&self, ch: usize) -> i32 {
        let v = self.input(ch);
        if v > DETENT || v < -DETENT { v } else { 0 }
    }

    pub fn out(&mut self, ch: usize, value: i32) {
        self.out_octave(ch, value, 0);
    }

    /// Write `value + octave` octaves to output `ch`.
    pub fn out_octave(&mut self, ch: usize, value: i32, octave: i32) {
        self.state.write_output(&mut *self.hw, ch, value, octave);
    }

    pub fn view_in(&self, ch: usize) -> i32 {
        self.state.view_in(ch)
    }

    pub fn view_out(&self, ch: usize) -> i32 {
        self.state.view_out(ch)
    }

    // ── Clocks and gates ──────────────────────────────────────

    /// `true` on the tick a rising edge arrives on `ch`'s clock line.
    pub fn clock(&mut self, ch: usize) -> bool {
        let now = self.hw.ticks();
        self.state.clock.clock(ch, &mut *self.hw, now)
    }

    /// Level of `ch`'s own digital line.
    pub fn gate(&mut self, ch: usize) -> bool {
        self.state.clock.gate(ch, &mut *self.hw)
    }

    /// Raise output `ch` for the default pulse length.
    pub fn clock_out(&mut self, ch: usize) {
        self.clock_out_for(ch, CLOCK_TICKS);
    }

    /// Raise output `ch`; the host drops it after `ticks` control ticks.
    pub fn clock_out_for(&mut self, ch: usize, ticks: u32) {
        self.state.clock.arm_clock_out(ch, ticks);
        self.out_octave(ch, 0, GATE_HIGH_OCTAVE);
    }

    pub fn gate_out(&mut self, ch: usize, high: bool) {
        self.out_octave(ch, 0, if high { GATE_HIGH_OCTAVE } else { 0 });
    }

    pub fn ticks_since_clock(&self, ch: usize) -> u32 {
        self.state.clock.ticks_since_clock(ch, self.hw.ticks())
    }

    /// Approximate milliseconds since the last clock on `ch`.
    pub fn time_since_clock(&self, ch: usize) -> u32 {
        self.state.clock.time_since_clock(ch, self.hw.ticks())
    }

    pub fn start_adc_lag(&mut self, ch: usize) {
        self.state.clock.start_adc_lag(ch);
    }

    /// Call once per tick after [`start_adc_lag`](Self::start_adc_lag);
    /// `true` once, when the reading has settled.
    pub fn end_of_adc_lag(&mut self, ch: usize) -> bool {
        self.state.clock.end_of_adc_lag(ch)
    }

    pub fn master_clock_forwarded(&self) -> bool {
        self.state.master_clock_forwarded()
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run `start` again the next time this applet is selected.
    pub fn allow_restart(&mut self) {
        self.state.applet_started = false;
    }

    pub fn reset_cursor(&mut self) {
        self.state.cursor.reset();
    }
}

/// Context for button and encoder events.
pub struct UiContext<'a> {
    state: &'a mut HemisphereState,
}

impl<'a> UiContext<'a> {
    pub(crate) fn new(state: &'a mut HemisphereState) -> Self {
        Self { state }
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.state.hemisphere
    }

    /// Make the cursor visible immediately.
    pub fn reset_cursor(&mut self) {
        self.state.cursor.reset();
    }

    pub fn allow_restart(&mut self) {
        self.state.applet_started = false;
    }
}
