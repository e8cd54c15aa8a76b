//! Lifecycle driver wrapping one applet instance.
//!
//! Per control-loop iteration, for each hemisphere:
//!
//! 1. `base_start`, only on (re)selection.
//! 2. `base_controller`: sample inputs, close expired pulses, advance the
//!    cursor, then run the applet's `controller`.
//! 3. Exactly one of `base_view` or `base_screensaver_view`.

use log::debug;

use super::context::{HemisphereState, Io, UiContext};
use super::gfx::{icons, Gfx};
use super::{Applet, HelpSection};
use crate::app::ports::{DisplayPort, Hardware};
use crate::config::SCREEN_BLANK_TICKS;
use crate::hemisphere::{CHANNELS, Hemisphere};
use crate::io::input_channel;

/// Object-safe lifecycle surface the manager drives.
pub trait HostedApplet {
    fn applet_name(&self) -> &'static str;

    /// Bind to `hemisphere`, reset timers, and run `start` if it has not
    /// run yet.  Returns whether `start` ran.
    fn base_start(&mut self, hemisphere: Hemisphere, hw: &mut dyn Hardware) -> bool;

    fn base_controller(&mut self, master_clock_on: bool, hw: &mut dyn Hardware);

    fn base_view(&mut self, display: &mut dyn DisplayPort, now: u32);

    /// Returns whether the applet's screensaver view was drawn.
    fn base_screensaver_view(&mut self, display: &mut dyn DisplayPort, now: u32) -> bool;

    /// Toggle the help overlay; returns the new state.
    fn help_screen(&mut self) -> bool;

    fn on_button_press(&mut self);

    fn on_encoder_move(&mut self, direction: i32);

    fn on_data_request(&self) -> u64;

    fn on_data_receive(&mut self, data: u64);

    fn state(&self) -> &HemisphereState;
}

/// An applet plus the host-owned state it runs against.
pub struct AppletHost<A: Applet> {
    state: HemisphereState,
    applet: A,
}

impl<A: Applet> AppletHost<A> {
    pub fn new(applet: A) -> Self {
        Self {
            state: HemisphereState::default(),
            applet,
        }
    }

    pub fn applet(&self) -> &A {
        &self.applet
    }

    pub fn applet_mut(&mut self) -> &mut A {
        &mut self.applet
    }

    fn draw_help_screen(&mut self, display: &mut dyn DisplayPort) {
        let help = self.applet.help();
        let mut gfx = Gfx::new(&self.state, display);
        gfx.header(self.applet.name());

        // The legends use the full panel width.
        let display = gfx.display();
        for (i, section) in HelpSection::ALL.into_iter().enumerate() {
            let y = i as i32 * 12 + 16;
            display.set_print_pos(0, y);
            display.print(section.label());
            display.invert_rect(0, y - 1, 19, 9);
            display.set_print_pos(20, y);
            display.print(help.section(section));
        }
    }

    fn draw_notifications(gfx: &mut Gfx<'_>) {
        if gfx.master_clock_forwarded() {
            gfx.bitmap(56, 1, 8, &icons::CLOCK);
        }
    }
}

impl<A: Applet + Default> Default for AppletHost<A> {
    fn default() -> Self {
        Self::new(A::default())
    }
}

impl<A: Applet> HostedApplet for AppletHost<A> {
    fn applet_name(&self) -> &'static str {
        self.applet.name()
    }

    fn base_start(&mut self, hemisphere: Hemisphere, hw: &mut dyn Hardware) -> bool {
        self.state.bind(hemisphere);

        // The frequency capture sits on digital input 4; hand the line
        // back to the shared input subsystem.
        if hemisphere == Hemisphere::Right {
            hw.stop_capture();
            hw.reinit();
            debug!("{}: capture released, digital inputs reinitialised", self.applet.name());
        }

        if self.state.applet_started {
            return false;
        }
        self.state.applet_started = true;
        debug!("{:?}: starting {}", hemisphere, self.applet.name());
        let mut io = Io::new(&mut self.state, hw);
        self.applet.start(&mut io);
        true
    }

    fn base_controller(&mut self, master_clock_on: bool, hw: &mut dyn Hardware) {
        self.state.clock.set_forwarding(master_clock_on);
        let hemisphere = self.state.hemisphere;
        for ch in CHANNELS {
            self.state.inputs[ch] = hw.raw_pitch_value(input_channel(hemisphere, ch));
            if self.state.clock.step_clock_out(ch) {
                self.state.write_output(hw, ch, 0, 0);
            }
        }
        self.state.cursor.tick();

        let mut io = Io::new(&mut self.state, hw);
        self.applet.controller(&mut io);
    }

    fn base_view(&mut self, display: &mut dyn DisplayPort, now: u32) {
        if self.state.help_active {
            self.draw_help_screen(display);
        } else {
            let mut gfx = Gfx::new(&self.state, display);
            self.applet.view(&mut gfx);
            Self::draw_notifications(&mut gfx);
        }
        self.state.last_view_tick = now;
        self.state.screensaver_on = false;
    }

    fn base_screensaver_view(&mut self, display: &mut dyn DisplayPort, now: u32) -> bool {
        self.state.screensaver_on = true;
        if now.wrapping_sub(self.state.last_view_tick) >= SCREEN_BLANK_TICKS {
            return false;
        }
        let mut gfx = Gfx::new(&self.state, display);
        self.applet.screensaver_view(&mut gfx);
        true
    }

    fn help_screen(&mut self) -> bool {
        self.state.help_active = !self.state.help_active;
        self.state.help_active
    }

    fn on_button_press(&mut self) {
        let mut ui = UiContext::new(&mut self.state);
        self.applet.on_button_press(&mut ui);
    }

    fn on_encoder_move(&mut self, direction: i32) {
        let mut ui = UiContext::new(&mut self.state);
        self.applet.on_encoder_move(&mut ui, direction);
    }

    fn on_data_request(&self) -> u64 {
        self.applet.on_data_request()
    }

    fn on_data_receive(&mut self, data: u64) {
        self.applet.on_data_receive(data);
    }

    fn state(&self) -> &HemisphereState {
        &self.state
    }
}
