//! Hemisphere-relative channel mapping.
//!
//! Each hemisphere sees two inputs and two outputs numbered 0 and 1.  The
//! physical ADC/DAC array and the four digital inputs are shared, so local
//! indices are offset by the hemisphere's position:
//!
//! ```text
//!            local 0   local 1
//!  LEFT  ->  CV1/A/D1  CV2/B/D2
//!  RIGHT ->  CV3/C/D3  CV4/D/D4
//! ```
//!
//! When master clock forwarding is on, RIGHT's clock channel 0 reads
//! digital input 1 instead of its own line.

use crate::hemisphere::Hemisphere;

/// Physical CV input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdcChannel {
    Cv1 = 0,
    Cv2 = 1,
    Cv3 = 2,
    Cv4 = 3,
}

/// Physical CV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DacChannel {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

/// Physical digital (clock/gate) input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigitalInput {
    Input1 = 0,
    Input2 = 1,
    Input3 = 2,
    Input4 = 3,
}

impl AdcChannel {
    pub const ALL: [Self; 4] = [Self::Cv1, Self::Cv2, Self::Cv3, Self::Cv4];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl DacChannel {
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl DigitalInput {
    pub const ALL: [Self; 4] = [Self::Input1, Self::Input2, Self::Input3, Self::Input4];

    /// The line that carries the forwarded master clock.
    pub const MASTER_CLOCK: Self = Self::Input1;

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit of this input in a four-input mask.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Physical ADC channel for local input `ch`.
pub const fn input_channel(hemisphere: Hemisphere, ch: usize) -> AdcChannel {
    AdcChannel::ALL[ch + hemisphere.io_offset()]
}

/// Physical DAC channel for local output `ch`.
pub const fn output_channel(hemisphere: Hemisphere, ch: usize) -> DacChannel {
    DacChannel::ALL[ch + hemisphere.io_offset()]
}

/// Hemisphere-local digital line for `ch`, ignoring forwarding.
pub const fn gate_input(hemisphere: Hemisphere, ch: usize) -> DigitalInput {
    DigitalInput::ALL[ch + hemisphere.io_offset()]
}

/// Digital line observed by clock detection on `ch`.
///
/// `forwarded` is the per-cycle master clock bus flag, which is only ever
/// true on RIGHT.
pub const fn clock_input(hemisphere: Hemisphere, ch: usize, forwarded: bool) -> DigitalInput {
    if forwarded && ch == 0 {
        DigitalInput::MASTER_CLOCK
    } else {
        gate_input(hemisphere, ch)
    }
}
