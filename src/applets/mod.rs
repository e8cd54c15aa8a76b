//! Built-in applets and the registry the manager selects from.
//!
//! The registry is fixed at build time.  Each hemisphere owns an
//! [`AppletBank`] with one host per entry, so an applet keeps its
//! parameters while another one is selected.

pub mod clock_divider;
pub mod sample_hold;
pub mod voltage;

pub use clock_divider::ClockDivider;
pub use sample_hold::SampleHold;
pub use voltage::Voltage;

use crate::applet::{AppletHost, HostedApplet};

/// Category bits used by applet pickers.
pub mod category {
    pub const CLOCKING: u8 = 1 << 0;
    pub const MODULATION: u8 = 1 << 1;
    pub const UTILITY: u8 = 1 << 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppletInfo {
    /// Stable identifier stored in presets.
    pub id: u8,
    pub name: &'static str,
    pub categories: u8,
}

/// Registry order is selection order.
pub const REGISTRY: [AppletInfo; 3] = [
    AppletInfo {
        id: 16,
        name: "Samp&Hold",
        categories: category::MODULATION,
    },
    AppletInfo {
        id: 32,
        name: "Clock Div",
        categories: category::CLOCKING,
    },
    AppletInfo {
        id: 48,
        name: "Voltage",
        categories: category::UTILITY,
    },
];

pub const APPLET_COUNT: usize = REGISTRY.len();

/// Registry index of the applet with preset id `id`.
pub fn index_of(id: u8) -> Option<usize> {
    REGISTRY.iter().position(|info| info.id == id)
}

/// One host per registered applet.
#[derive(Default)]
pub struct AppletBank {
    sample_hold: AppletHost<SampleHold>,
    clock_divider: AppletHost<ClockDivider>,
    voltage: AppletHost<Voltage>,
}

impl AppletBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&dyn HostedApplet> {
        match index {
            0 => Some(&self.sample_hold),
            1 => Some(&self.clock_divider),
            2 => Some(&self.voltage),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut dyn HostedApplet> {
        match index {
            0 => Some(&mut self.sample_hold),
            1 => Some(&mut self.clock_divider),
            2 => Some(&mut self.voltage),
            _ => None,
        }
    }
}
