//! Inbound UI commands.
//!
//! Front-panel input (buttons, encoders, menu) is decoded elsewhere and
//! arrives here as [`UiCommand`]s for the
//! [`HemisphereManager`](super::manager::HemisphereManager) to dispatch.

use crate::hemisphere::Hemisphere;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Encoder push on one side.
    ButtonPress(Hemisphere),

    /// Encoder turn; `direction` is the signed detent count.
    EncoderMove(Hemisphere, i32),

    /// Jump to registry entry `index`.
    SelectApplet(Hemisphere, usize),

    /// Step through the registry, wrapping at both ends.
    NextApplet(Hemisphere, i32),

    /// Show or hide the help overlay.
    ToggleHelp(Hemisphere),

    /// Forward the master clock to the right hemisphere.
    SetClockForward(bool),
}
