//! Mock hardware, display and event sink for integration tests.
//!
//! Records every DAC write, draw call and manager event so tests can assert
//! on the full history without a panel or a DAC.

use hemisphere::app::events::ManagerEvent;
use hemisphere::app::ports::{
    AnalogInputPort, DacPort, DigitalInputPort, DisplayPort, EventSink, FrequencyCapturePort,
    TickSource,
};
use hemisphere::io::{AdcChannel, DacChannel, DigitalInput};

// ── MockHardware ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DacWrite {
    pub channel: DacChannel,
    pub value: i32,
    pub octave: i32,
}

#[derive(Default)]
pub struct MockHardware {
    pub cv: [i32; 4],
    pub dac_writes: Vec<DacWrite>,
    /// Gate levels, one bit per digital input.
    pub levels: u8,
    /// Edges to report on the next scan.
    pub pending_edges: u8,
    clocked: u8,
    pub ticks: u32,
    pub scans: u32,
    pub reinits: u32,
    pub capture_stops: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a rising edge on `input` for the next scan.
    pub fn pulse(&mut self, input: DigitalInput) {
        self.pending_edges |= input.mask();
    }

    pub fn set_gate(&mut self, input: DigitalInput, high: bool) {
        if high {
            self.levels |= input.mask();
        } else {
            self.levels &= !input.mask();
        }
    }

    pub fn set_cv(&mut self, channel: AdcChannel, value: i32) {
        self.cv[channel.index()] = value;
    }

    pub fn last_write(&self, channel: DacChannel) -> Option<DacWrite> {
        self.dac_writes
            .iter()
            .rev()
            .find(|w| w.channel == channel)
            .copied()
    }

    pub fn writes_to(&self, channel: DacChannel) -> usize {
        self.dac_writes.iter().filter(|w| w.channel == channel).count()
    }
}

impl AnalogInputPort for MockHardware {
    fn raw_pitch_value(&mut self, channel: AdcChannel) -> i32 {
        self.cv[channel.index()]
    }
}

impl DacPort for MockHardware {
    fn set_pitch(&mut self, channel: DacChannel, value: i32, octave: i32) {
        self.dac_writes.push(DacWrite {
            channel,
            value,
            octave,
        });
    }
}

impl DigitalInputPort for MockHardware {
    fn scan(&mut self) {
        self.clocked = self.pending_edges;
        self.pending_edges = 0;
        self.scans += 1;
    }

    fn clocked(&mut self, input: DigitalInput) -> bool {
        self.clocked & input.mask() != 0
    }

    fn read_immediate(&mut self, input: DigitalInput) -> bool {
        self.levels & input.mask() != 0
    }

    fn reinit(&mut self) {
        self.clocked = 0;
        self.pending_edges = 0;
        self.reinits += 1;
    }
}

impl FrequencyCapturePort for MockHardware {
    fn stop_capture(&mut self) {
        self.capture_stops += 1;
    }
}

impl TickSource for MockHardware {
    fn ticks(&self) -> u32 {
        self.ticks
    }
}

// ── DisplayRecorder ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    PrintPos(i32, i32),
    Print(String),
    Pixel(i32, i32),
    Line { x: i32, y: i32, x2: i32, y2: i32, pattern: u8 },
    Frame { x: i32, y: i32, w: i32, h: i32 },
    Rect { x: i32, y: i32, w: i32, h: i32 },
    Invert { x: i32, y: i32, w: i32, h: i32 },
    Circle { x: i32, y: i32, r: i32 },
    Bitmap { x: i32, y: i32, w: i32 },
}

#[derive(Default)]
pub struct DisplayRecorder {
    pub calls: Vec<DrawCall>,
}

#[allow(dead_code)]
impl DisplayRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn printed(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Print(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Smallest x of any positioned call.
    pub fn min_x(&self) -> Option<i32> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                DrawCall::PrintPos(x, _)
                | DrawCall::Pixel(x, _)
                | DrawCall::Line { x, .. }
                | DrawCall::Frame { x, .. }
                | DrawCall::Rect { x, .. }
                | DrawCall::Invert { x, .. }
                | DrawCall::Circle { x, .. }
                | DrawCall::Bitmap { x, .. } => Some(x),
                DrawCall::Print(_) => None,
            })
            .min()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DisplayPort for DisplayRecorder {
    fn set_print_pos(&mut self, x: i32, y: i32) {
        self.calls.push(DrawCall::PrintPos(x, y));
    }

    fn print(&mut self, text: &str) {
        self.calls.push(DrawCall::Print(text.to_owned()));
    }

    fn set_pixel(&mut self, x: i32, y: i32) {
        self.calls.push(DrawCall::Pixel(x, y));
    }

    fn draw_line(&mut self, x: i32, y: i32, x2: i32, y2: i32, pattern: u8) {
        self.calls.push(DrawCall::Line {
            x,
            y,
            x2,
            y2,
            pattern,
        });
    }

    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.calls.push(DrawCall::Frame { x, y, w, h });
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.calls.push(DrawCall::Rect { x, y, w, h });
    }

    fn invert_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.calls.push(DrawCall::Invert { x, y, w, h });
    }

    fn draw_circle(&mut self, x: i32, y: i32, r: i32) {
        self.calls.push(DrawCall::Circle { x, y, r });
    }

    fn draw_bitmap8(&mut self, x: i32, y: i32, w: i32, _data: &[u8]) {
        self.calls.push(DrawCall::Bitmap { x, y, w });
    }
}

// ── EventLog ──────────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<ManagerEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &ManagerEvent) {
        self.events.push(event.clone());
    }
}
