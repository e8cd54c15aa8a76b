//! System constants and manager configuration.
//!
//! The timing and range constants are fixed at build time; every applet
//! sees the same values.  [`ManagerConfig`] holds the few settings the
//! hemisphere manager boots with and can be loaded from JSON by the
//! simulator.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

// --- CV ranges ---

/// Full-scale CV in host units (roughly 5V at 128 units per semitone).
pub const MAX_CV: i32 = 7680;
/// 3V in host units.
pub const CV_3V: i32 = 4608;
/// One octave (12 semitones of 128 units).
pub const OCTAVE: i32 = 12 << 7;
/// Readings within this distance of 0 are reported as 0 by the detented input.
pub const DETENT: i32 = 180;
/// DAC octave offset used to encode a logical gate-high.
pub const GATE_HIGH_OCTAVE: i32 = 5;

// --- Timing (in control ticks) ---

/// Default length of a clock pulse written by `clock_out`.
pub const CLOCK_TICKS: u32 = 100;
/// Half-period of the cursor blink saw-tooth.
pub const CURSOR_TICKS: i32 = 12_000;
/// Idle ticks after the last live view before the screensaver stops drawing.
pub const SCREEN_BLANK_TICKS: u32 = 30_000_000;
/// Ticks between a digital edge and a settled ADC reading.
pub const ADC_LAG: u16 = 96;
/// Approximate ticks per millisecond of the control loop.
pub const TICKS_PER_MS: u32 = 17;

// --- Display ---

/// Width of one hemisphere's canvas in pixels.
pub const GFX_WIDTH: i32 = 64;
/// Full panel size.
pub const SCREEN_WIDTH: i32 = 128;
pub const SCREEN_HEIGHT: i32 = 64;

/// Boot-time settings for the hemisphere manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Registry index of the applet selected on each side at boot.
    pub default_applets: [usize; 2],
    /// Whether master clock forwarding starts enabled.
    pub clock_forward: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            default_applets: [0, 1],
            clock_forward: false,
        }
    }
}

impl ManagerConfig {
    /// Parse a configuration from JSON, rejecting out-of-range applet indices.
    pub fn from_json(json: &str, applet_count: usize) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config(ConfigError::Malformed))?;
        config.validate(applet_count)?;
        Ok(config)
    }

    pub fn validate(&self, applet_count: usize) -> Result<()> {
        if self.default_applets.iter().any(|&i| i >= applet_count) {
            return Err(ConfigError::UnknownApplet.into());
        }
        Ok(())
    }
}
