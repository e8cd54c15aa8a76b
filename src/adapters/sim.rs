//! Simulated module hardware for the host.
//!
//! CV inputs are set directly, DAC writes are recorded, and each digital
//! line can be driven by hand or by a square-wave clock generator that
//! advances with [`SimHardware::advance`].

use log::debug;

use crate::app::ports::{
    AnalogInputPort, DacPort, DigitalInputPort, FrequencyCapturePort, TickSource,
};
use crate::config::OCTAVE;
use crate::io::{AdcChannel, DacChannel, DigitalInput};

#[derive(Debug, Default)]
pub struct SimHardware {
    cv: [i32; 4],
    dac: [i32; 4],
    /// Clock generator period per line, in ticks.
    clock_period: [Option<u32>; 4],
    /// Manually driven levels, OR'ed with the generators.
    manual: u8,
    levels: u8,
    clocked: u8,
    ticks: u32,
    capture_active: bool,
    reinit_count: u32,
}

impl SimHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cv(&mut self, channel: AdcChannel, value: i32) {
        self.cv[channel.index()] = value;
    }

    /// Last value written to `channel`, octaves folded in.
    pub fn dac(&self, channel: DacChannel) -> i32 {
        self.dac[channel.index()]
    }

    pub fn set_gate(&mut self, input: DigitalInput, high: bool) {
        if high {
            self.manual |= input.mask();
        } else {
            self.manual &= !input.mask();
        }
    }

    /// Drive `input` with a square wave of `period` ticks; `None` stops it.
    pub fn set_clock(&mut self, input: DigitalInput, period: Option<u32>) {
        self.clock_period[input.index()] = period.filter(|&p| p >= 2);
    }

    pub fn start_capture(&mut self) {
        self.capture_active = true;
    }

    pub fn capture_active(&self) -> bool {
        self.capture_active
    }

    pub fn reinit_count(&self) -> u32 {
        self.reinit_count
    }

    /// Advance the tick counter by one.
    pub fn advance(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    fn line_levels(&self) -> u8 {
        let mut levels = self.manual;
        for input in DigitalInput::ALL {
            if let Some(period) = self.clock_period[input.index()] {
                // Low for the first half of each period.
                if self.ticks % period >= period - period / 2 {
                    levels |= input.mask();
                }
            }
        }
        levels
    }
}

impl AnalogInputPort for SimHardware {
    fn raw_pitch_value(&mut self, channel: AdcChannel) -> i32 {
        self.cv[channel.index()]
    }
}

impl DacPort for SimHardware {
    fn set_pitch(&mut self, channel: DacChannel, value: i32, octave: i32) {
        self.dac[channel.index()] = value + octave * OCTAVE;
    }
}

impl DigitalInputPort for SimHardware {
    fn scan(&mut self) {
        let levels = self.line_levels();
        self.clocked = levels & !self.levels;
        self.levels = levels;
    }

    fn clocked(&mut self, input: DigitalInput) -> bool {
        self.clocked & input.mask() != 0
    }

    fn read_immediate(&mut self, input: DigitalInput) -> bool {
        self.line_levels() & input.mask() != 0
    }

    fn reinit(&mut self) {
        self.clocked = 0;
        self.levels = self.line_levels();
        self.reinit_count += 1;
    }
}

impl FrequencyCapturePort for SimHardware {
    fn stop_capture(&mut self) {
        if self.capture_active {
            debug!("sim: frequency capture stopped");
        }
        self.capture_active = false;
    }
}

impl TickSource for SimHardware {
    fn ticks(&self) -> u32 {
        self.ticks
    }
}
