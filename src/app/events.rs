//! Outbound manager events.
//!
//! The [`HemisphereManager`](super::manager::HemisphereManager) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Nothing here is
//! emitted from the per-tick path, only on selection and UI changes.

use crate::hemisphere::Hemisphere;

/// Structured events emitted by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerEvent {
    /// A hemisphere switched to a new applet.
    AppletSelected {
        hemisphere: Hemisphere,
        index: usize,
        name: &'static str,
    },

    /// The applet's one-time `start` hook ran during selection.
    AppletStarted {
        hemisphere: Hemisphere,
        name: &'static str,
    },

    /// The help overlay was shown or hidden.
    HelpToggled { hemisphere: Hemisphere, active: bool },

    /// Master clock forwarding to the right hemisphere changed.
    ClockForwardChanged(bool),

    /// A preset was applied to both hemispheres.
    PresetLoaded { applet_ids: [u8; 2] },
}
