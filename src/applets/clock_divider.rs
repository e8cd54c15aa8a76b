//! Clock divider and multiplier.
//!
//! Digital 1 is the clock, digital 2 resets the division counters.  Each
//! output has a factor in `-8..=8`: `n >= 2` divides by `n`, `n <= -2`
//! multiplies by `-n`, spreading the extra pulses across the last measured
//! clock period.

use crate::applet::{Applet, Gfx, HelpText, Io, UiContext, icons};
use crate::hemisphere::CHANNELS;
use crate::pack::{PackField, PackSchema};

const LAYOUT: PackSchema<2> = PackSchema::new(
    [PackField::signed("factor_a", 5), PackField::signed("factor_b", 5)],
    64,
);

const MAX_FACTOR: i32 = 8;

/// Step a factor by `direction`, skipping the meaningless `-1..=1` band.
fn step_factor(factor: i32, direction: i32) -> i32 {
    let mut next = factor + direction.signum();
    if (-1..=1).contains(&next) {
        next = if direction > 0 { 2 } else { -2 };
    }
    next.clamp(-MAX_FACTOR, MAX_FACTOR)
}

/// Coerce a restored factor back into the editable range.
fn sanitize_factor(factor: i32) -> i32 {
    if (-1..=1).contains(&factor) {
        2
    } else {
        factor.clamp(-MAX_FACTOR, MAX_FACTOR)
    }
}

#[derive(Debug)]
pub struct ClockDivider {
    factor: [i32; 2],
    count: [i32; 2],
    /// Ticks between the last two input clocks.
    cycle_ticks: u32,
    /// Multiplier state: ticks between pulses, countdown, pulses left.
    interval: [u32; 2],
    countdown: [u32; 2],
    remaining: [i32; 2],
    cursor: usize,
}

impl Default for ClockDivider {
    fn default() -> Self {
        Self {
            factor: [2, -2],
            count: [0; 2],
            cycle_ticks: 0,
            interval: [0; 2],
            countdown: [0; 2],
            remaining: [0; 2],
            cursor: 0,
        }
    }
}

impl ClockDivider {
    pub fn factor(&self, ch: usize) -> i32 {
        self.factor[ch]
    }

    pub fn cycle_ticks(&self) -> u32 {
        self.cycle_ticks
    }

    fn on_clock(&mut self, io: &mut Io<'_>, ch: usize) {
        let factor = self.factor[ch];
        if factor > 0 {
            if self.count[ch] == 0 {
                io.clock_out(ch);
            }
            self.count[ch] = (self.count[ch] + 1) % factor;
        } else {
            io.clock_out(ch);
            let mult = -factor;
            self.interval[ch] = self.cycle_ticks / mult as u32;
            self.countdown[ch] = self.interval[ch];
            self.remaining[ch] = if self.interval[ch] > 0 { mult - 1 } else { 0 };
        }
    }

    fn step_multiplier(&mut self, io: &mut Io<'_>, ch: usize) {
        if self.factor[ch] > 0 || self.remaining[ch] == 0 {
            return;
        }
        self.countdown[ch] = self.countdown[ch].saturating_sub(1);
        if self.countdown[ch] == 0 {
            io.clock_out(ch);
            self.remaining[ch] -= 1;
            self.countdown[ch] = self.interval[ch];
        }
    }
}

impl Applet for ClockDivider {
    fn name(&self) -> &'static str {
        "Clock Div"
    }

    fn start(&mut self, _io: &mut Io<'_>) {
        self.count = [0; 2];
        self.remaining = [0; 2];
        self.cycle_ticks = 0;
    }

    fn controller(&mut self, io: &mut Io<'_>) {
        if io.clock(1) {
            self.count = [0; 2];
        }

        // Read before `clock` restamps the last edge.
        let since_last = io.ticks_since_clock(0);
        if io.clock(0) {
            self.cycle_ticks = since_last;
            for ch in CHANNELS {
                self.on_clock(io, ch);
            }
        } else {
            for ch in CHANNELS {
                self.step_multiplier(io, ch);
            }
        }
    }

    fn view(&mut self, gfx: &mut Gfx<'_>) {
        gfx.header(self.name());
        for ch in CHANNELS {
            let y = 15 + 10 * ch as i32;
            let factor = self.factor[ch];
            gfx.bitmap(1, y, 8, &icons::CLOCK);
            gfx.print_at(12, y, if factor > 0 { "/" } else { "x" });
            gfx.print_num(factor.abs());
            if self.cursor == ch {
                gfx.cursor(12, y + 8, 18);
            }
        }
        gfx.skyline();
    }

    fn help(&self) -> HelpText {
        HelpText {
            digitals: "1=Clock 2=Reset",
            cvs: "",
            outs: "A,B=Div/Mult",
            encoder: "Factor",
        }
    }

    fn on_button_press(&mut self, ui: &mut UiContext<'_>) {
        self.cursor ^= 1;
        ui.reset_cursor();
    }

    fn on_encoder_move(&mut self, ui: &mut UiContext<'_>, direction: i32) {
        let ch = self.cursor;
        self.factor[ch] = step_factor(self.factor[ch], direction);
        self.count[ch] = 0;
        self.remaining[ch] = 0;
        self.countdown[ch] = 0;
        ui.reset_cursor();
    }

    fn on_data_request(&self) -> u64 {
        LAYOUT.pack(&self.factor)
    }

    fn on_data_receive(&mut self, data: u64) {
        self.factor = LAYOUT.unpack(data).map(sanitize_factor);
        self.count = [0; 2];
        self.remaining = [0; 2];
    }
}
