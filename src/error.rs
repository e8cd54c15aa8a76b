//! Unified error types for the hemisphere core.
//!
//! The real-time path (control tick, render) never fails: it clamps or
//! produces stale values instead.  Errors only exist at the edges where
//! untrusted data comes in: preset blobs, configuration, and pack layouts
//! checked at load time.  All variants are `Copy`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A bit-packing layout is invalid.
    Pack(PackError),
    /// A preset could not be encoded, decoded or applied.
    Preset(PresetError),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pack(e) => write!(f, "pack: {e}"),
            Self::Preset(e) => write!(f, "preset: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Pack errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    /// Sum of field widths exceeds the storage word.
    LayoutTooWide { bits: u32, capacity: u32 },
    /// A field was declared with zero width.
    EmptyField,
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayoutTooWide { bits, capacity } => {
                write!(f, "layout needs {bits} bits, storage holds {capacity}")
            }
            Self::EmptyField => write!(f, "zero-width field"),
        }
    }
}

impl From<PackError> for Error {
    fn from(e: PackError) -> Self {
        Self::Pack(e)
    }
}

// ---------------------------------------------------------------------------
// Preset errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetError {
    /// The preset names an applet id that is not in the registry.
    UnknownApplet(u8),
    /// The serialized blob is truncated or corrupted.
    Corrupted,
    /// The output buffer is too small for the encoded preset.
    BufferTooSmall,
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownApplet(id) => write!(f, "unknown applet id {id}"),
            Self::Corrupted => write!(f, "preset corrupted"),
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

impl From<PresetError> for Error {
    fn from(e: PresetError) -> Self {
        Self::Preset(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    Malformed,
    /// A default applet index is outside the registry.
    UnknownApplet,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed configuration"),
            Self::UnknownApplet => write!(f, "default applet out of range"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
