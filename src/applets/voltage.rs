//! Two fixed voltages, set in semitone steps.
//!
//! A gated channel outputs its voltage only while its digital input is high.

use crate::applet::{Applet, Gfx, HelpText, Io, UiContext};
use crate::hemisphere::CHANNELS;
use crate::pack::{PackField, PackSchema};

const LAYOUT: PackSchema<4> = PackSchema::new(
    [
        PackField::signed("semitones_a", 8),
        PackField::signed("semitones_b", 8),
        PackField::unsigned("gated_a", 1),
        PackField::unsigned("gated_b", 1),
    ],
    64,
);

/// Five volts either way.
const MAX_SEMITONES: i32 = 60;
const SEMITONE: i32 = 128;

#[derive(Debug, Default)]
pub struct Voltage {
    semitones: [i32; 2],
    gated: [bool; 2],
    /// 0/1 edit the voltages, 2/3 the gate flags.
    cursor: usize,
}

impl Voltage {
    pub fn cv(&self, ch: usize) -> i32 {
        self.semitones[ch] * SEMITONE
    }

    pub fn gated(&self, ch: usize) -> bool {
        self.gated[ch]
    }
}

impl Applet for Voltage {
    fn name(&self) -> &'static str {
        "Voltage"
    }

    fn start(&mut self, _io: &mut Io<'_>) {}

    fn controller(&mut self, io: &mut Io<'_>) {
        for ch in CHANNELS {
            let open = !self.gated[ch] || io.gate(ch);
            io.out(ch, if open { self.cv(ch) } else { 0 });
        }
    }

    fn view(&mut self, gfx: &mut Gfx<'_>) {
        gfx.header(self.name());
        for ch in CHANNELS {
            let y = 16 + 20 * ch as i32;
            gfx.print_at(1, y, if ch == 0 { "A " } else { "B " });
            gfx.print_voltage(self.cv(ch));
            gfx.print_at(1, y + 10, if self.gated[ch] { "Gated" } else { "Free" });

            if self.cursor == ch {
                gfx.cursor(13, y + 8, 36);
            } else if self.cursor == ch + 2 {
                gfx.cursor(1, y + 18, 30);
            }
        }
    }

    fn help(&self) -> HelpText {
        HelpText {
            digitals: "1,2=Gate",
            cvs: "",
            outs: "A,B=Voltage",
            encoder: "Semitone/Gate",
        }
    }

    fn on_button_press(&mut self, ui: &mut UiContext<'_>) {
        self.cursor = (self.cursor + 1) % 4;
        ui.reset_cursor();
    }

    fn on_encoder_move(&mut self, ui: &mut UiContext<'_>, direction: i32) {
        match self.cursor {
            ch @ (0 | 1) => {
                self.semitones[ch] =
                    (self.semitones[ch] + direction).clamp(-MAX_SEMITONES, MAX_SEMITONES);
            }
            c => {
                if direction != 0 {
                    self.gated[c - 2] = direction > 0;
                }
            }
        }
        ui.reset_cursor();
    }

    fn on_data_request(&self) -> u64 {
        LAYOUT.pack(&[
            self.semitones[0],
            self.semitones[1],
            self.gated[0] as i32,
            self.gated[1] as i32,
        ])
    }

    fn on_data_receive(&mut self, data: u64) {
        let [a, b, gate_a, gate_b] = LAYOUT.unpack(data);
        self.semitones = [a, b].map(|s| s.clamp(-MAX_SEMITONES, MAX_SEMITONES));
        self.gated = [gate_a != 0, gate_b != 0];
    }
}
