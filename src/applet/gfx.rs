//! Offset drawing for applet views.
//!
//! Every positional primitive adds the hemisphere's pixel offset, so an
//! applet always draws on a 64-pixel canvas starting at x = 0.

use core::fmt::Write;

use heapless::String;

use super::context::HemisphereState;
use crate::app::ports::DisplayPort;
use crate::config::OCTAVE;
use crate::hemisphere::{CHANNELS, Hemisphere};
use crate::scaling::proportion_cv;

/// 8x8 column bitmaps shared by applets and host notifications.
pub mod icons {
    pub const CHECK: [u8; 8] = [0x00, 0xf0, 0x40, 0x20, 0x10, 0x08, 0x04, 0x00];
    pub const NOTE: [u8; 8] = [0xc0, 0xe0, 0xe0, 0xe0, 0x7f, 0x02, 0x14, 0x08];
    pub const CLOCK: [u8; 8] = [0x9c, 0xa2, 0xc1, 0xcf, 0xc9, 0xa2, 0x9c, 0x00];
    pub const CV: [u8; 8] = [0x1f, 0x11, 0x11, 0x00, 0x07, 0x18, 0x07, 0x00];
    pub const METER: [u8; 8] = [0x7e, 0x10, 0x1c, 0x10, 0x1c, 0x10, 0x7e, 0x00];
}

/// Height of the skyline bars.
const SKYLINE_HEIGHT: i32 = 36;

/// Y of a bar of height `h` resting on the bottom row.
pub const fn bottom_align(h: i32) -> i32 {
    62 - h
}

/// Format a CV as signed volts with two decimals, e.g. `+1.25V`.
pub fn format_voltage(cv: i32) -> String<16> {
    let mut v = cv.wrapping_mul(100) / OCTAVE;
    let sign = if v < 0 { '-' } else { '+' };
    v = v.abs();
    let mut s = String::new();
    // Capacity covers the widest possible i32 result.
    let _ = write!(s, "{}{}.{:02}V", sign, v / 100, v % 100);
    s
}

/// Drawing context handed to `view` and `screensaver_view`.
pub struct Gfx<'a> {
    state: &'a HemisphereState,
    display: &'a mut dyn DisplayPort,
}

impl<'a> Gfx<'a> {
    pub(crate) fn new(state: &'a HemisphereState, display: &'a mut dyn DisplayPort) -> Self {
        Self { state, display }
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.state.hemisphere()
    }

    fn offset(&self) -> i32 {
        self.state.hemisphere().gfx_offset()
    }

    // ── Buffered I/O ──────────────────────────────────────────

    pub fn view_in(&self, ch: usize) -> i32 {
        self.state.view_in(ch)
    }

    pub fn view_out(&self, ch: usize) -> i32 {
        self.state.view_out(ch)
    }

    /// Cursor blink phase; always off while the screensaver draws.
    pub fn cursor_blink(&self) -> bool {
        self.state.cursor_blink()
    }

    pub fn master_clock_forwarded(&self) -> bool {
        self.state.master_clock_forwarded()
    }

    // ── Text ──────────────────────────────────────────────────

    pub fn pos(&mut self, x: i32, y: i32) {
        let offset = self.offset();
        self.display.set_print_pos(x + offset, y);
    }

    /// Print at the current position.
    pub fn print(&mut self, text: &str) {
        self.display.print(text);
    }

    pub fn print_num(&mut self, n: i32) {
        let mut s: String<12> = String::new();
        let _ = write!(s, "{}", n);
        self.display.print(&s);
    }

    pub fn print_at(&mut self, x: i32, y: i32, text: &str) {
        self.pos(x, y);
        self.print(text);
    }

    pub fn print_num_at(&mut self, x: i32, y: i32, n: i32) {
        self.pos(x, y);
        self.print_num(n);
    }

    /// Print a CV as a voltage at the current position.
    pub fn print_voltage(&mut self, cv: i32) {
        self.display.print(&format_voltage(cv));
    }

    // ── Primitives ────────────────────────────────────────────

    pub fn pixel(&mut self, x: i32, y: i32) {
        let offset = self.offset();
        self.display.set_pixel(x + offset, y);
    }

    pub fn line(&mut self, x: i32, y: i32, x2: i32, y2: i32) {
        self.dotted_line(x, y, x2, y2, 1);
    }

    pub fn dotted_line(&mut self, x: i32, y: i32, x2: i32, y2: i32, pattern: u8) {
        let offset = self.offset();
        self.display.draw_line(x + offset, y, x2 + offset, y2, pattern);
    }

    pub fn frame(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let offset = self.offset();
        self.display.draw_frame(x + offset, y, w, h);
    }

    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let offset = self.offset();
        self.display.draw_rect(x + offset, y, w, h);
    }

    pub fn invert(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let offset = self.offset();
        self.display.invert_rect(x + offset, y, w, h);
    }

    pub fn circle(&mut self, x: i32, y: i32, r: i32) {
        let offset = self.offset();
        self.display.draw_circle(x + offset, y, r);
    }

    pub fn bitmap(&mut self, x: i32, y: i32, w: i32, data: &[u8]) {
        let offset = self.offset();
        self.display.draw_bitmap8(x + offset, y, w, data);
    }

    // ── Composites ────────────────────────────────────────────

    /// Underline `w` pixels at (x, y) while the cursor is in its visible phase.
    pub fn cursor(&mut self, x: i32, y: i32, w: i32) {
        if self.cursor_blink() {
            self.line(x, y, x + w - 1, y);
        }
    }

    /// Title with a double rule under it.
    pub fn header(&mut self, title: &str) {
        self.print_at(1, 2, title);
        self.line(0, 10, 62, 10);
        self.line(0, 12, 62, 12);
    }

    /// Input bars in the middle, output bars at the sides.
    pub fn skyline(&mut self) {
        for ch in CHANNELS {
            let height = proportion_cv(self.view_in(ch), SKYLINE_HEIGHT);
            self.frame(23 + 10 * ch as i32, bottom_align(height), 6, 63);

            let height = proportion_cv(self.view_out(ch), SKYLINE_HEIGHT);
            self.invert(3 + 46 * ch as i32, bottom_align(height), 12, 63);
        }
    }

    /// Unshifted access for full-width overlays.
    pub(crate) fn display(&mut self) -> &mut dyn DisplayPort {
        &mut *self.display
    }
}
