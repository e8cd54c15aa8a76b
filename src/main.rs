//! Hemisphere simulator: runs the applet host against simulated hardware.
//!
//! ```text
//! hemisphere-sim [config.json] [ticks]
//! ```
//!
//! Drives a clock into digital 1 and 3, steps the control loop, then dumps
//! the frame buffer and round-trips a preset through its blob encoding.
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use hemisphere::adapters::framebuffer::FrameBuffer;
use hemisphere::adapters::log_sink::LogEventSink;
use hemisphere::adapters::sim::SimHardware;
use hemisphere::app::commands::UiCommand;
use hemisphere::app::manager::HemisphereManager;
use hemisphere::app::ports::TickSource;
use hemisphere::applets::APPLET_COUNT;
use hemisphere::config::{CV_3V, ManagerConfig, TICKS_PER_MS};
use hemisphere::hemisphere::Hemisphere;
use hemisphere::io::{AdcChannel, DigitalInput};
use hemisphere::preset::{MAX_ENCODED_LEN, Preset};

const DEFAULT_TICKS: u32 = 20_000;
/// Display refresh interval in control ticks.
const VIEW_INTERVAL: u32 = 1_000;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            ManagerConfig::from_json(&json, APPLET_COUNT)?
        }
        None => ManagerConfig::default(),
    };
    let ticks = match args.next() {
        Some(n) => n.parse().with_context(|| format!("tick count {n:?}"))?,
        None => DEFAULT_TICKS,
    };

    info!("hemisphere-sim v{}", env!("CARGO_PKG_VERSION"));

    // ── Hardware ──────────────────────────────────────────────
    let mut hw = SimHardware::new();
    hw.set_cv(AdcChannel::Cv1, CV_3V);
    hw.set_cv(AdcChannel::Cv2, -CV_3V / 2);
    hw.set_cv(AdcChannel::Cv3, CV_3V / 3);
    hw.set_clock(DigitalInput::Input1, Some(100 * TICKS_PER_MS));
    hw.set_clock(DigitalInput::Input3, Some(150 * TICKS_PER_MS));
    hw.start_capture();

    let mut sink = LogEventSink::new();
    let mut display = FrameBuffer::new();
    let mut manager = HemisphereManager::new(config)?;
    manager.start(&mut hw, &mut sink);

    run_loop(&mut manager, &mut hw, &mut display, ticks);

    display.clear();
    manager.view(&mut display, hw.ticks(), false);
    println!("{}", display.render_ascii());

    manager.handle_command(UiCommand::ToggleHelp(Hemisphere::Right), &mut hw, &mut sink);
    display.clear();
    manager.view(&mut display, hw.ticks(), false);
    println!("{}", display.render_ascii());

    // ── Preset round trip ─────────────────────────────────────
    let preset = manager.snapshot_preset();
    let mut buf = [0u8; MAX_ENCODED_LEN];
    let blob = preset.encode(&mut buf)?;
    info!("Preset encodes to {} bytes", blob.len());
    let restored = Preset::decode(blob)?;
    manager.load_preset(&restored, &mut hw, &mut sink)?;

    Ok(())
}

/// Step the control loop `ticks` times, refreshing the display every
/// [`VIEW_INTERVAL`] ticks.  Views are stamped with the hardware tick count.
fn run_loop(
    manager: &mut HemisphereManager,
    hw: &mut SimHardware,
    display: &mut FrameBuffer,
    ticks: u32,
) {
    for step in 0..ticks {
        hw.advance();
        manager.controller_tick(hw);
        if step % VIEW_INTERVAL == 0 {
            display.clear();
            manager.view(display, hw.ticks(), false);
        }
    }
}
