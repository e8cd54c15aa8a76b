//! Hemisphere applet host.
//!
//! Runs two small "applets" side by side on a dual-channel CV module, one
//! per hemisphere.  Each applet is written against channels 0/1 and a
//! 64-pixel canvas; the host remaps I/O, tracks clocks and gates, blinks
//! the cursor and scales CVs to pixels.  All hardware is reached through
//! the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod applet;
pub mod applets;
pub mod clock;
pub mod config;
pub mod cursor;
pub mod error;
pub mod hemisphere;
pub mod io;
pub mod pack;
pub mod preset;
pub mod scaling;
