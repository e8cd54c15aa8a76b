//! AppletHost lifecycle, offset I/O and offset drawing against mocks.

use hemisphere::app::ports::DigitalInputPort;
use hemisphere::applet::{Applet, AppletHost, Gfx, HelpText, HostedApplet, Io, UiContext};
use hemisphere::config::{ADC_LAG, CLOCK_TICKS, GATE_HIGH_OCTAVE, SCREEN_BLANK_TICKS};
use hemisphere::hemisphere::Hemisphere;
use hemisphere::io::{AdcChannel, DacChannel, DigitalInput};

use crate::mock_hw::{DacWrite, DisplayRecorder, DrawCall, MockHardware};

// ── Recording applet ──────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    starts: u32,
    start_output: Option<(i32, i32)>,
    pulse_on_clock: bool,
    clocks: Vec<bool>,
    detented: Vec<i32>,
    lag_fired: Vec<u32>,
    saver_blink: Vec<bool>,
}

impl Applet for Recorder {
    fn name(&self) -> &'static str {
        "Recorder"
    }

    fn start(&mut self, io: &mut Io<'_>) {
        self.starts += 1;
        if let Some((value, octave)) = self.start_output {
            io.out_octave(0, value, octave);
        }
    }

    fn controller(&mut self, io: &mut Io<'_>) {
        let clocked = io.clock(0);
        self.clocks.push(clocked);
        if clocked {
            io.start_adc_lag(0);
            if self.pulse_on_clock {
                io.clock_out(0);
            }
        }
        if io.end_of_adc_lag(0) {
            self.lag_fired.push(io.ticks());
        }
        self.detented.push(io.detented_input(1));
    }

    fn view(&mut self, gfx: &mut Gfx<'_>) {
        gfx.pixel(0, 0);
        gfx.print_at(1, 2, "x");
    }

    fn screensaver_view(&mut self, gfx: &mut Gfx<'_>) {
        self.saver_blink.push(gfx.cursor_blink());
    }

    fn help(&self) -> HelpText {
        HelpText {
            digitals: "1=Clock",
            cvs: "2=Level",
            outs: "A=Pulse",
            encoder: "Nothing",
        }
    }

    fn on_button_press(&mut self, ui: &mut UiContext<'_>) {
        ui.allow_restart();
    }

    fn on_data_request(&self) -> u64 {
        0
    }

    fn on_data_receive(&mut self, _data: u64) {}
}

fn host() -> AppletHost<Recorder> {
    AppletHost::new(Recorder::default())
}

/// One manager-style control tick: scan, then run the host.
fn tick(host: &mut AppletHost<Recorder>, hw: &mut MockHardware, master_clock_on: bool) {
    hw.scan();
    host.base_controller(master_clock_on, hw);
    hw.ticks += 1;
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn start_runs_once_until_restart_allowed() {
    let mut hw = MockHardware::new();
    let mut host = host();

    assert!(host.base_start(Hemisphere::Left, &mut hw));
    for _ in 0..3 {
        assert!(!host.base_start(Hemisphere::Left, &mut hw));
    }
    assert_eq!(host.applet().starts, 1);

    host.on_button_press();
    assert!(host.base_start(Hemisphere::Left, &mut hw));
    assert_eq!(host.applet().starts, 2);
}

#[test]
fn right_selection_releases_capture_every_time() {
    let mut hw = MockHardware::new();
    let mut host = host();
    host.base_start(Hemisphere::Left, &mut hw);
    assert_eq!(hw.capture_stops, 0);
    host.base_start(Hemisphere::Right, &mut hw);
    host.base_start(Hemisphere::Right, &mut hw);
    assert_eq!(hw.capture_stops, 2);
    assert_eq!(hw.reinits, 2);
}

// ── Offset I/O ────────────────────────────────────────────────

#[test]
fn octave_output_is_recorded_for_view() {
    let mut hw = MockHardware::new();
    let mut host = AppletHost::new(Recorder {
        start_output: Some((1000, 1)),
        ..Recorder::default()
    });
    host.base_start(Hemisphere::Left, &mut hw);
    assert_eq!(host.state().view_out(0), 2536);
    assert_eq!(
        hw.last_write(DacChannel::A),
        Some(DacWrite {
            channel: DacChannel::A,
            value: 1000,
            octave: 1,
        })
    );
}

#[test]
fn right_hemisphere_uses_upper_channels() {
    let mut hw = MockHardware::new();
    hw.set_cv(AdcChannel::Cv3, 11);
    hw.set_cv(AdcChannel::Cv4, 22);
    let mut host = AppletHost::new(Recorder {
        start_output: Some((5, 0)),
        ..Recorder::default()
    });
    host.base_start(Hemisphere::Right, &mut hw);
    tick(&mut host, &mut hw, false);

    assert_eq!(host.state().view_in(0), 11);
    assert_eq!(host.state().view_in(1), 22);
    assert_eq!(hw.writes_to(DacChannel::A), 0);
    assert_eq!(hw.writes_to(DacChannel::C), 1);
}

#[test]
fn detent_band_reads_zero() {
    let mut hw = MockHardware::new();
    let mut host = host();
    host.base_start(Hemisphere::Left, &mut hw);
    for cv in [180, -180, 181, -181, 0] {
        hw.set_cv(AdcChannel::Cv2, cv);
        tick(&mut host, &mut hw, false);
    }
    assert_eq!(host.applet().detented, vec![0, 0, 181, -181, 0]);
}

// ── Clocks ────────────────────────────────────────────────────

#[test]
fn forwarded_clock_replaces_right_channel_zero() {
    let mut hw = MockHardware::new();
    let mut right = host();
    let mut left = host();
    right.base_start(Hemisphere::Right, &mut hw);
    left.base_start(Hemisphere::Left, &mut hw);

    // Right's own line is ignored while forwarding.
    hw.pulse(DigitalInput::Input3);
    hw.scan();
    right.base_controller(true, &mut hw);
    left.base_controller(true, &mut hw);

    // The master clock reaches both: right via forwarding, left natively.
    hw.pulse(DigitalInput::Input1);
    hw.scan();
    right.base_controller(true, &mut hw);
    left.base_controller(true, &mut hw);

    // Forwarding off takes effect on the very next tick.
    hw.pulse(DigitalInput::Input3);
    hw.scan();
    right.base_controller(false, &mut hw);
    left.base_controller(false, &mut hw);

    assert_eq!(right.applet().clocks, vec![false, true, true]);
    assert_eq!(left.applet().clocks, vec![false, true, false]);
}

#[test]
fn adc_lag_fires_once_after_clock() {
    let mut hw = MockHardware::new();
    let mut host = host();
    host.base_start(Hemisphere::Left, &mut hw);

    hw.pulse(DigitalInput::Input1);
    for _ in 0..500 {
        tick(&mut host, &mut hw, false);
    }
    // The arming tick counts towards the lag.
    assert_eq!(host.applet().lag_fired, vec![ADC_LAG as u32 - 1]);
}

#[test]
fn clock_pulse_closes_after_clock_ticks() {
    let mut hw = MockHardware::new();
    let mut host = AppletHost::new(Recorder {
        pulse_on_clock: true,
        ..Recorder::default()
    });
    host.base_start(Hemisphere::Left, &mut hw);

    hw.pulse(DigitalInput::Input1);
    tick(&mut host, &mut hw, false);
    assert_eq!(host.state().view_out(0), GATE_HIGH_OCTAVE * 1536);

    for _ in 1..CLOCK_TICKS {
        tick(&mut host, &mut hw, false);
    }
    assert_eq!(hw.last_write(DacChannel::A).map(|w| w.octave), Some(GATE_HIGH_OCTAVE));

    tick(&mut host, &mut hw, false);
    assert_eq!(host.state().view_out(0), 0);
    assert_eq!(hw.writes_to(DacChannel::A), 2);
}

// ── Rendering ─────────────────────────────────────────────────

#[test]
fn right_view_is_shifted_by_64() {
    let mut hw = MockHardware::new();
    let mut display = DisplayRecorder::new();
    let mut host = host();
    host.base_start(Hemisphere::Right, &mut hw);
    host.base_view(&mut display, 0);

    assert_eq!(
        display.calls,
        vec![
            DrawCall::Pixel(64, 0),
            DrawCall::PrintPos(65, 2),
            DrawCall::Print("x".into()),
        ]
    );
}

#[test]
fn clock_icon_marks_forwarding() {
    let mut hw = MockHardware::new();
    let mut display = DisplayRecorder::new();
    let mut right = host();
    right.base_start(Hemisphere::Right, &mut hw);

    tick(&mut right, &mut hw, true);
    right.base_view(&mut display, 1);
    assert!(display.calls.contains(&DrawCall::Bitmap { x: 120, y: 1, w: 8 }));

    display.clear();
    tick(&mut right, &mut hw, false);
    right.base_view(&mut display, 2);
    assert!(!display.calls.iter().any(|c| matches!(c, DrawCall::Bitmap { .. })));
}

#[test]
fn help_screen_replaces_view() {
    let mut hw = MockHardware::new();
    let mut display = DisplayRecorder::new();
    let mut host = host();
    host.base_start(Hemisphere::Right, &mut hw);
    assert!(host.help_screen());
    host.base_view(&mut display, 0);

    let printed = display.printed();
    assert_eq!(printed[0], "Recorder");
    assert!(printed.contains(&"Dig") && printed.contains(&"Enc"));
    assert!(printed.contains(&"A=Pulse"));
    assert!(!printed.contains(&"x"));
    // Title is offset, legends span the full panel.
    assert_eq!(display.calls[0], DrawCall::PrintPos(65, 2));
    assert!(display.calls.contains(&DrawCall::Invert { x: 0, y: 15, w: 19, h: 9 }));
    assert!(display.calls.contains(&DrawCall::PrintPos(20, 52)));
}

#[test]
fn screensaver_draws_until_blank_threshold() {
    let mut hw = MockHardware::new();
    let mut display = DisplayRecorder::new();
    let mut host = host();
    host.base_start(Hemisphere::Left, &mut hw);

    host.base_view(&mut display, 1_000);
    assert!(!host.state().screensaver_on());

    assert!(host.base_screensaver_view(&mut display, 1_000 + SCREEN_BLANK_TICKS - 1));
    assert!(host.state().screensaver_on());
    assert!(!host.base_screensaver_view(&mut display, 1_000 + SCREEN_BLANK_TICKS));

    // The cursor never blinks over the screensaver.
    assert_eq!(host.applet().saver_blink, vec![false]);
}

#[test]
fn screensaver_threshold_survives_tick_wrap() {
    let mut hw = MockHardware::new();
    let mut display = DisplayRecorder::new();
    let mut host = host();
    host.base_start(Hemisphere::Left, &mut hw);

    host.base_view(&mut display, u32::MAX - 10);
    assert!(host.base_screensaver_view(&mut display, 100));
}
