//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each [`ManagerEvent`] to the `log`
//! facade.  The simulator routes it to `env_logger`; a board build sends it
//! to its serial logger.

use log::info;

use crate::app::events::ManagerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ManagerEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ManagerEvent) {
        match event {
            ManagerEvent::AppletSelected {
                hemisphere,
                index,
                name,
            } => {
                info!("SELECT | {:?} -> {} (#{})", hemisphere, name, index);
            }
            ManagerEvent::AppletStarted { hemisphere, name } => {
                info!("START | {:?} {}", hemisphere, name);
            }
            ManagerEvent::HelpToggled { hemisphere, active } => {
                info!("HELP | {:?} {}", hemisphere, if *active { "on" } else { "off" });
            }
            ManagerEvent::ClockForwardChanged(on) => {
                info!("CLOCK | forward={}", on);
            }
            ManagerEvent::PresetLoaded { applet_ids } => {
                info!("PRESET | ids={:?}", applet_ids);
            }
        }
    }
}
