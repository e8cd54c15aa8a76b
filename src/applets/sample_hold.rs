//! Dual sample-and-hold.
//!
//! A clock on a channel's digital input arms the ADC lag; when it expires
//! the settled CV is latched to the matching output.  In track mode the
//! output also follows the input for as long as the gate stays high.

use crate::applet::{Applet, Gfx, HelpText, Io, UiContext};
use crate::hemisphere::CHANNELS;
use crate::pack::{PackField, PackSchema};

const LAYOUT: PackSchema<2> = PackSchema::new(
    [PackField::unsigned("track_a", 1), PackField::unsigned("track_b", 1)],
    64,
);

#[derive(Debug, Default)]
pub struct SampleHold {
    held: [i32; 2],
    track: [bool; 2],
    cursor: usize,
}

impl SampleHold {
    pub fn held(&self, ch: usize) -> i32 {
        self.held[ch]
    }

    pub fn tracking(&self, ch: usize) -> bool {
        self.track[ch]
    }
}

impl Applet for SampleHold {
    fn name(&self) -> &'static str {
        "Samp&Hold"
    }

    fn start(&mut self, _io: &mut Io<'_>) {
        self.held = [0; 2];
    }

    fn controller(&mut self, io: &mut Io<'_>) {
        for ch in CHANNELS {
            if io.clock(ch) {
                io.start_adc_lag(ch);
            }

            if io.end_of_adc_lag(ch) {
                self.held[ch] = io.input(ch);
                io.out(ch, self.held[ch]);
            } else if self.track[ch] && io.gate(ch) {
                self.held[ch] = io.input(ch);
                io.out(ch, self.held[ch]);
            }
        }
    }

    fn view(&mut self, gfx: &mut Gfx<'_>) {
        gfx.header(self.name());
        for ch in CHANNELS {
            let x = 4 + 32 * ch as i32;
            gfx.print_at(x, 15, if self.track[ch] { "T&H" } else { "S&H" });
            if self.cursor == ch {
                gfx.cursor(x, 23, 18);
            }
        }
        gfx.skyline();
    }

    fn screensaver_view(&mut self, gfx: &mut Gfx<'_>) {
        gfx.skyline();
    }

    fn help(&self) -> HelpText {
        HelpText {
            digitals: "1,2=Sample",
            cvs: "1,2=CV",
            outs: "A,B=Held CV",
            encoder: "S&H/T&H mode",
        }
    }

    fn on_button_press(&mut self, ui: &mut UiContext<'_>) {
        self.cursor ^= 1;
        ui.reset_cursor();
    }

    fn on_encoder_move(&mut self, ui: &mut UiContext<'_>, direction: i32) {
        if direction != 0 {
            self.track[self.cursor] = !self.track[self.cursor];
            ui.reset_cursor();
        }
    }

    fn on_data_request(&self) -> u64 {
        LAYOUT.pack(&[self.track[0] as i32, self.track[1] as i32])
    }

    fn on_data_receive(&mut self, data: u64) {
        let [a, b] = LAYOUT.unpack(data);
        self.track = [a != 0, b != 0];
    }
}
