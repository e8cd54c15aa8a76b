//! In-memory 128x64 monochrome frame buffer.
//!
//! Implements [`DisplayPort`] for the simulator and for tests that need to
//! inspect actual pixels.  Glyph rendering belongs to the panel driver, so
//! text is kept as positioned runs instead of being rasterised.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::app::ports::DisplayPort;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Horizontal advance per character of the panel font.
pub const GLYPH_WIDTH: i32 = 6;

const MAX_RUNS: usize = 48;
const MAX_RUN_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub x: i32,
    pub y: i32,
    pub text: String<MAX_RUN_LEN>,
}

pub struct FrameBuffer {
    /// One row per entry, bit `x` is column `x`.
    rows: [u128; SCREEN_HEIGHT as usize],
    runs: Vec<TextRun, MAX_RUNS>,
    print_pos: (i32, i32),
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            rows: [0; SCREEN_HEIGHT as usize],
            runs: Vec::new(),
            print_pos: (0, 0),
        }
    }

    pub fn clear(&mut self) {
        self.rows = [0; SCREEN_HEIGHT as usize];
        self.runs.clear();
        self.print_pos = (0, 0);
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::in_bounds(x, y) && self.rows[y as usize] & (1u128 << x) != 0
    }

    pub fn lit_pixels(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Whether any text run contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.runs.iter().any(|run| run.text.contains(needle))
    }

    /// ASCII dump, `#` for lit pixels, followed by the text runs.
    pub fn render_ascii(&self) -> std::string::String {
        let mut out = std::string::String::new();
        for row in &self.rows {
            for x in 0..SCREEN_WIDTH {
                out.push(if row & (1u128 << x) != 0 { '#' } else { '.' });
            }
            out.push('\n');
        }
        for run in &self.runs {
            let _ = writeln!(out, "({:3},{:2}) {}", run.x, run.y, run.text);
        }
        out
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        (0..SCREEN_WIDTH).contains(&x) && (0..SCREEN_HEIGHT).contains(&y)
    }

    fn plot(&mut self, x: i32, y: i32) {
        if Self::in_bounds(x, y) {
            self.rows[y as usize] |= 1u128 << x;
        }
    }

    fn toggle(&mut self, x: i32, y: i32) {
        if Self::in_bounds(x, y) {
            self.rows[y as usize] ^= 1u128 << x;
        }
    }
}

impl DisplayPort for FrameBuffer {
    fn set_print_pos(&mut self, x: i32, y: i32) {
        self.print_pos = (x, y);
    }

    fn print(&mut self, text: &str) {
        let (x, y) = self.print_pos;
        let mut run = String::new();
        for c in text.chars() {
            if run.push(c).is_err() {
                break;
            }
        }
        // A full run list drops further text for this frame.
        let _ = self.runs.push(TextRun { x, y, text: run });
        self.print_pos.0 += GLYPH_WIDTH * text.chars().count() as i32;
    }

    fn set_pixel(&mut self, x: i32, y: i32) {
        self.plot(x, y);
    }

    fn draw_line(&mut self, x: i32, y: i32, x2: i32, y2: i32, pattern: u8) {
        let pattern = pattern.max(1) as u32;
        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let (mut cx, mut cy, mut err) = (x, y, dx + dy);
        let mut step = 0u32;
        loop {
            if step % pattern == 0 {
                self.plot(cx, cy);
            }
            step += 1;
            if cx == x2 && cy == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);
        self.draw_line(x, y, right, y, 1);
        self.draw_line(x, bottom, right, bottom, 1);
        self.draw_line(x, y, x, bottom, 1);
        self.draw_line(right, y, right, bottom, 1);
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for py in y..y + h {
            for px in x..x + w {
                self.plot(px, py);
            }
        }
    }

    fn invert_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for py in y..y + h {
            for px in x..x + w {
                self.toggle(px, py);
            }
        }
    }

    fn draw_circle(&mut self, cx: i32, cy: i32, r: i32) {
        if r < 0 {
            return;
        }
        let (mut x, mut y, mut err) = (r, 0, 1 - r);
        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.plot(cx + px, cy + py);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    fn draw_bitmap8(&mut self, x: i32, y: i32, w: i32, data: &[u8]) {
        for (col, &bits) in data.iter().take(w.max(0) as usize).enumerate() {
            for bit in 0..8 {
                if bits & (1 << bit) != 0 {
                    self.plot(x + col as i32, y + bit);
                }
            }
        }
    }
}
