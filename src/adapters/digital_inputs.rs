//! Four-line clock/gate input adapter over `embedded-hal` pins.
//!
//! ## Edge capture
//!
//! Short trigger pulses can rise and fall between two control ticks, so the
//! board wires each line's rising-edge interrupt to [`EdgeLatch::record`].
//! [`DigitalInputs::scan`] drains the latch once per tick and merges it with
//! edges seen by polling the pin levels, so boards without interrupts on
//! every line still clock correctly.

use core::sync::atomic::{AtomicU8, Ordering};

use embedded_hal::digital::InputPin;

use crate::app::ports::DigitalInputPort;
use crate::io::DigitalInput;

/// Rising edges recorded by the ISR since the last scan, one bit per line.
pub struct EdgeLatch {
    bits: AtomicU8,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// ISR side: note a rising edge on `input`.
    pub fn record(&self, input: DigitalInput) {
        self.bits.fetch_or(input.mask(), Ordering::Release);
    }

    /// Main-loop side: take and clear everything recorded so far.
    pub fn take(&self) -> u8 {
        self.bits.swap(0, Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.bits.store(0, Ordering::Release);
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Latch shared with the board's GPIO interrupt handlers.
pub static DIGITAL_EDGES: EdgeLatch = EdgeLatch::new();

pub struct DigitalInputs<P: InputPin> {
    pins: [P; 4],
    latch: &'static EdgeLatch,
    /// Levels seen at the last scan.
    levels: u8,
    /// Rising edges reported for the current tick.
    clocked: u8,
}

impl<P: InputPin> DigitalInputs<P> {
    pub fn new(pins: [P; 4], latch: &'static EdgeLatch) -> Self {
        let mut inputs = Self {
            pins,
            latch,
            levels: 0,
            clocked: 0,
        };
        inputs.reinit();
        inputs
    }

    /// Sample every line; a failed read keeps the previous level.
    fn read_levels(&mut self) -> u8 {
        let mut levels = 0;
        for input in DigitalInput::ALL {
            let previous = self.levels & input.mask() != 0;
            if self.pins[input.index()].is_high().unwrap_or(previous) {
                levels |= input.mask();
            }
        }
        levels
    }

    pub fn levels(&self) -> u8 {
        self.levels
    }
}

impl<P: InputPin> DigitalInputPort for DigitalInputs<P> {
    fn scan(&mut self) {
        let levels = self.read_levels();
        let polled = levels & !self.levels;
        self.clocked = polled | self.latch.take();
        self.levels = levels;
    }

    fn clocked(&mut self, input: DigitalInput) -> bool {
        self.clocked & input.mask() != 0
    }

    fn read_immediate(&mut self, input: DigitalInput) -> bool {
        let previous = self.levels & input.mask() != 0;
        self.pins[input.index()].is_high().unwrap_or(previous)
    }

    fn reinit(&mut self) {
        self.latch.clear();
        self.clocked = 0;
        // Lines already high must not report an edge on the next scan.
        self.levels = self.read_levels();
    }
}
