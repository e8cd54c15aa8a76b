//! Application core: applet orchestration with no direct I/O.
//!
//! The manager drives both hemispheres through the applet lifecycle.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer testable without real peripherals.

pub mod commands;
pub mod events;
pub mod manager;
pub mod ports;
