//! Port traits: the boundary between the applet host and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppletHost / HemisphereManager
//! ```
//!
//! The host never reaches a global ADC, DAC, digital-input or display
//! object.  Everything is injected per call, so tests substitute recording
//! mocks and the simulator substitutes [`SimHardware`](crate::adapters::sim::SimHardware).
//!
//! All ports are infallible: a hardware access is assumed to succeed, and a
//! stale value is the worst outcome.

use crate::io::{AdcChannel, DacChannel, DigitalInput};

// ───────────────────────────────────────────────────────────────
// Analog I/O
// ───────────────────────────────────────────────────────────────

/// CV inputs, already converted to host pitch units (128 per semitone).
pub trait AnalogInputPort {
    fn raw_pitch_value(&mut self, channel: AdcChannel) -> i32;
}

/// CV outputs.
pub trait DacPort {
    /// Write `value` plus `octave` octaves to `channel`.
    fn set_pitch(&mut self, channel: DacChannel, value: i32, octave: i32);
}

// ───────────────────────────────────────────────────────────────
// Digital inputs
// ───────────────────────────────────────────────────────────────

/// The shared four-line clock/gate input subsystem.
pub trait DigitalInputPort {
    /// Latch this tick's rising edges.  Called once per control tick,
    /// before any applet runs.
    fn scan(&mut self);

    /// Whether `input` saw a rising edge in the last scan.
    fn clocked(&mut self, input: DigitalInput) -> bool;

    /// Current level of `input`.
    fn read_immediate(&mut self, input: DigitalInput) -> bool;

    /// Re-attach the inputs after another subsystem borrowed a line.
    /// Clears any latched edges.
    fn reinit(&mut self);
}

/// Frequency measurement capture, which shares digital input 4.
pub trait FrequencyCapturePort {
    /// Release the capture hardware.  Idempotent.
    fn stop_capture(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Global control-loop tick counter.  Wraps at `u32::MAX`.
pub trait TickSource {
    fn ticks(&self) -> u32;
}

/// Everything the control path touches.
pub trait Hardware:
    AnalogInputPort + DacPort + DigitalInputPort + FrequencyCapturePort + TickSource
{
}

impl<T> Hardware for T where
    T: AnalogInputPort + DacPort + DigitalInputPort + FrequencyCapturePort + TickSource
{
}

// ───────────────────────────────────────────────────────────────
// Display
// ───────────────────────────────────────────────────────────────

/// Monochrome 128x64 panel primitives in absolute screen coordinates.
pub trait DisplayPort {
    fn set_print_pos(&mut self, x: i32, y: i32);

    /// Print at the current position and advance it.
    fn print(&mut self, text: &str);

    fn set_pixel(&mut self, x: i32, y: i32);

    /// Line with a dot pattern: every `pattern`-th pixel is drawn, `1` is solid.
    fn draw_line(&mut self, x: i32, y: i32, x2: i32, y2: i32, pattern: u8);

    /// Outline rectangle.
    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Filled rectangle.
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// XOR-invert a rectangle.
    fn invert_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    fn draw_circle(&mut self, x: i32, y: i32, r: i32);

    /// Column-major bitmap, one byte per 8-pixel column, LSB at the top.
    fn draw_bitmap8(&mut self, x: i32, y: i32, w: i32, data: &[u8]);
}

// ───────────────────────────────────────────────────────────────
// Event sink
// ───────────────────────────────────────────────────────────────

/// The manager emits structured [`ManagerEvent`](super::events::ManagerEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ManagerEvent);
}
