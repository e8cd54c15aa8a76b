//! The applet contract and its host.
//!
//! ```text
//!  HemisphereManager ──▶ HostedApplet (dyn) ──▶ AppletHost<A> ──▶ A: Applet
//!                                                  │
//!                                 HemisphereState ─┤ Io / Gfx / UiContext
//! ```
//!
//! An [`Applet`] is a small stateful program.  It never touches hardware
//! directly: every hook receives a context that already knows which
//! hemisphere it runs on, so applet code is written as if it owned
//! channels 0/1 and a 64-pixel canvas starting at x = 0.
//!
//! [`AppletHost`] wraps one applet with the per-instance state (sampled
//! inputs, written outputs, clock/gate timers, cursor blink, help toggle)
//! and drives it through the lifecycle in [`HostedApplet`].

mod context;
mod gfx;
mod host;

pub use context::{HemisphereState, Io, UiContext};
pub use gfx::{format_voltage, icons, Gfx};
pub use host::{AppletHost, HostedApplet};

/// Maximum characters in an applet name.
pub const MAX_NAME_LEN: usize = 9;

/// A program that runs in one hemisphere slot.
///
/// Hooks run on the control loop and must not block.
pub trait Applet {
    /// Display name, at most [`MAX_NAME_LEN`] characters.
    fn name(&self) -> &'static str;

    /// One-time initialisation.  Runs on first selection, and again only
    /// after [`Io::allow_restart`] / [`UiContext::allow_restart`].
    fn start(&mut self, io: &mut Io<'_>);

    /// Called once per control tick after inputs are sampled.
    fn controller(&mut self, io: &mut Io<'_>);

    /// Draw the live view.
    fn view(&mut self, gfx: &mut Gfx<'_>);

    /// Draw the idle view.  Draws nothing unless overridden.
    fn screensaver_view(&mut self, _gfx: &mut Gfx<'_>) {}

    /// The four help-screen legends.
    fn help(&self) -> HelpText;

    fn on_button_press(&mut self, _ui: &mut UiContext<'_>) {}

    fn on_encoder_move(&mut self, _ui: &mut UiContext<'_>, _direction: i32) {}

    /// Pack persistent parameters into one word.
    fn on_data_request(&self) -> u64;

    /// Restore parameters from a word produced by `on_data_request`.
    fn on_data_receive(&mut self, data: u64);
}

/// Sections of the help overlay, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpSection {
    Digitals,
    Cvs,
    Outs,
    Encoder,
}

impl HelpSection {
    pub const ALL: [Self; 4] = [Self::Digitals, Self::Cvs, Self::Outs, Self::Encoder];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Digitals => "Dig",
            Self::Cvs => "CV",
            Self::Outs => "Out",
            Self::Encoder => "Enc",
        }
    }
}

/// Help legends, ideally 18 characters or fewer each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HelpText {
    pub digitals: &'static str,
    pub cvs: &'static str,
    pub outs: &'static str,
    pub encoder: &'static str,
}

impl HelpText {
    pub const fn section(&self, section: HelpSection) -> &'static str {
        match section {
            HelpSection::Digitals => self.digitals,
            HelpSection::Cvs => self.cvs,
            HelpSection::Outs => self.outs,
            HelpSection::Encoder => self.encoder,
        }
    }
}
