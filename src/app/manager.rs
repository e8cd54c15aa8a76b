//! Hemisphere manager: the control-loop owner.
//!
//! [`HemisphereManager`] holds one [`AppletBank`] per side and the current
//! selection.  Hardware, display and the event sink are injected at each
//! call, so the whole manager runs against mocks in tests.
//!
//! ```text
//!  Hardware ──▶ ┌────────────────────────┐ ──▶ EventSink
//!               │   HemisphereManager     │
//!  UiCommand ──▶│  LEFT bank · RIGHT bank │ ──▶ DisplayPort
//!               └────────────────────────┘
//! ```

use log::{info, warn};

use crate::applet::HostedApplet;
use crate::applets::{APPLET_COUNT, AppletBank, REGISTRY, index_of};
use crate::config::ManagerConfig;
use crate::error::{PresetError, Result};
use crate::hemisphere::Hemisphere;
use crate::preset::Preset;

use super::commands::UiCommand;
use super::events::ManagerEvent;
use super::ports::{DisplayPort, EventSink, Hardware};

// ───────────────────────────────────────────────────────────────
// HemisphereManager
// ───────────────────────────────────────────────────────────────

pub struct HemisphereManager {
    banks: [AppletBank; 2],
    selected: [usize; 2],
    clock_forward: bool,
    config: ManagerConfig,
}

impl HemisphereManager {
    /// Build the manager.  Nothing is selected until [`start`](Self::start).
    pub fn new(config: ManagerConfig) -> Result<Self> {
        config.validate(APPLET_COUNT)?;
        Ok(Self {
            banks: [AppletBank::new(), AppletBank::new()],
            selected: config.default_applets,
            clock_forward: config.clock_forward,
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Select the configured default applet on both sides.
    pub fn start(&mut self, hw: &mut dyn Hardware, sink: &mut impl EventSink) {
        for h in Hemisphere::ALL {
            self.select_applet(h, self.config.default_applets[h.index()], hw, sink);
        }
        info!(
            "HemisphereManager started: {} | {}, clock forward {}",
            REGISTRY[self.selected[0]].name,
            REGISTRY[self.selected[1]].name,
            self.clock_forward
        );
    }

    /// Switch `hemisphere` to registry entry `index`.
    ///
    /// Returns `false` and changes nothing if `index` is out of range.
    pub fn select_applet(
        &mut self,
        hemisphere: Hemisphere,
        index: usize,
        hw: &mut dyn Hardware,
        sink: &mut impl EventSink,
    ) -> bool {
        let Some(applet) = self.banks[hemisphere.index()].get_mut(index) else {
            warn!("{:?}: no applet at index {}", hemisphere, index);
            return false;
        };
        self.selected[hemisphere.index()] = index;

        let started = applet.base_start(hemisphere, hw);
        let name = applet.applet_name();
        info!("{:?}: selected {}", hemisphere, name);
        sink.emit(&ManagerEvent::AppletSelected {
            hemisphere,
            index,
            name,
        });
        if started {
            sink.emit(&ManagerEvent::AppletStarted { hemisphere, name });
        }
        true
    }

    /// Step the selection by `direction`, wrapping at both ends.
    pub fn next_applet(
        &mut self,
        hemisphere: Hemisphere,
        direction: i32,
        hw: &mut dyn Hardware,
        sink: &mut impl EventSink,
    ) {
        let current = self.selected[hemisphere.index()] as i32;
        let next = (current + direction).rem_euclid(APPLET_COUNT as i32) as usize;
        self.select_applet(hemisphere, next, hw, sink);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One control tick: latch digital edges, then LEFT, then RIGHT.
    pub fn controller_tick(&mut self, hw: &mut dyn Hardware) {
        hw.scan();
        let clock_forward = self.clock_forward;
        for h in Hemisphere::ALL {
            if let Some(applet) = self.active_mut(h) {
                applet.base_controller(clock_forward, hw);
            }
        }
    }

    /// One display cycle.
    ///
    /// While a help overlay is up it owns the whole panel and only that
    /// side is drawn.  Otherwise each side gets exactly one view call.
    pub fn view(&mut self, display: &mut dyn DisplayPort, ticks: u32, screensaver: bool) {
        if !screensaver {
            if let Some(h) = self.help_hemisphere() {
                if let Some(applet) = self.active_mut(h) {
                    applet.base_view(display, ticks);
                }
                return;
            }
        }
        for h in Hemisphere::ALL {
            if let Some(applet) = self.active_mut(h) {
                if screensaver {
                    applet.base_screensaver_view(display, ticks);
                } else {
                    applet.base_view(display, ticks);
                }
            }
        }
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(
        &mut self,
        cmd: UiCommand,
        hw: &mut dyn Hardware,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            UiCommand::ButtonPress(h) => {
                if let Some(applet) = self.active_mut(h) {
                    applet.on_button_press();
                }
            }
            UiCommand::EncoderMove(h, direction) => {
                if let Some(applet) = self.active_mut(h) {
                    applet.on_encoder_move(direction);
                }
            }
            UiCommand::SelectApplet(h, index) => {
                self.select_applet(h, index, hw, sink);
            }
            UiCommand::NextApplet(h, direction) => {
                self.next_applet(h, direction, hw, sink);
            }
            UiCommand::ToggleHelp(h) => {
                // At most one help overlay at a time.
                let other = h.other();
                if self.help_hemisphere() == Some(other) {
                    self.toggle_help(other, sink);
                }
                self.toggle_help(h, sink);
            }
            UiCommand::SetClockForward(on) => self.set_clock_forward(on, sink),
        }
    }

    fn toggle_help(&mut self, hemisphere: Hemisphere, sink: &mut impl EventSink) {
        if let Some(applet) = self.active_mut(hemisphere) {
            let active = applet.help_screen();
            sink.emit(&ManagerEvent::HelpToggled { hemisphere, active });
        }
    }

    pub fn set_clock_forward(&mut self, on: bool, sink: &mut impl EventSink) {
        if self.clock_forward == on {
            return;
        }
        self.clock_forward = on;
        info!("Master clock forwarding {}", if on { "on" } else { "off" });
        sink.emit(&ManagerEvent::ClockForwardChanged(on));
    }

    // ── Presets ───────────────────────────────────────────────

    /// Capture the selection and each active applet's packed parameters.
    pub fn snapshot_preset(&self) -> Preset {
        let mut preset = Preset {
            clock_forward: self.clock_forward,
            ..Preset::default()
        };
        for h in Hemisphere::ALL {
            let i = h.index();
            preset.applet_ids[i] = REGISTRY[self.selected[i]].id;
            if let Some(applet) = self.active(h) {
                preset.data[i] = applet.on_data_request();
            }
        }
        preset
    }

    /// Apply a preset to both sides.
    ///
    /// Both ids are checked first; an unknown id leaves the current
    /// selection and parameters untouched.
    pub fn load_preset(
        &mut self,
        preset: &Preset,
        hw: &mut dyn Hardware,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let mut indices = [0; 2];
        for (slot, &id) in indices.iter_mut().zip(&preset.applet_ids) {
            *slot = index_of(id).ok_or_else(|| {
                warn!("Preset rejected: unknown applet id {}", id);
                PresetError::UnknownApplet(id)
            })?;
        }

        for h in Hemisphere::ALL {
            let i = h.index();
            self.select_applet(h, indices[i], hw, sink);
            if let Some(applet) = self.active_mut(h) {
                applet.on_data_receive(preset.data[i]);
            }
        }
        self.set_clock_forward(preset.clock_forward, sink);

        info!("Preset loaded: ids {:?}", preset.applet_ids);
        sink.emit(&ManagerEvent::PresetLoaded {
            applet_ids: preset.applet_ids,
        });
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Registry index selected on `hemisphere`.
    pub fn selected(&self, hemisphere: Hemisphere) -> usize {
        self.selected[hemisphere.index()]
    }

    pub fn active(&self, hemisphere: Hemisphere) -> Option<&dyn HostedApplet> {
        self.banks[hemisphere.index()].get(self.selected[hemisphere.index()])
    }

    pub fn active_mut(&mut self, hemisphere: Hemisphere) -> Option<&mut dyn HostedApplet> {
        self.banks[hemisphere.index()].get_mut(self.selected[hemisphere.index()])
    }

    /// Host for registry entry `index` on `hemisphere`, selected or not.
    pub fn hosted(&self, hemisphere: Hemisphere, index: usize) -> Option<&dyn HostedApplet> {
        self.banks[hemisphere.index()].get(index)
    }

    /// Side whose help overlay is showing, if any.
    pub fn help_hemisphere(&self) -> Option<Hemisphere> {
        Hemisphere::ALL
            .into_iter()
            .find(|&h| self.active(h).is_some_and(|a| a.state().help_active()))
    }

    pub fn clock_forward(&self) -> bool {
        self.clock_forward
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }
}
