//! Saved selection plus packed applet parameters for both hemispheres.
//!
//! The blob format is `postcard`: compact, no heap, stable across builds as
//! long as field order is kept.  Writing it to flash is someone else's job.

use serde::{Deserialize, Serialize};

use crate::error::{PresetError, Result};

/// Worst-case encoded size: two ids, two varint u64 words, one bool.
pub const MAX_ENCODED_LEN: usize = 2 + 2 * 10 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preset {
    /// Registry ids, LEFT then RIGHT.
    pub applet_ids: [u8; 2],
    /// `on_data_request` words, LEFT then RIGHT.
    pub data: [u64; 2],
    pub clock_forward: bool,
}

impl Preset {
    /// Serialize into `buf`, returning the written prefix.
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8]> {
        postcard::to_slice(self, buf).map_err(|e| {
            let kind = match e {
                postcard::Error::SerializeBufferFull => PresetError::BufferTooSmall,
                _ => PresetError::Corrupted,
            };
            kind.into()
        })
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        postcard::from_bytes(bytes).map_err(|_| PresetError::Corrupted.into())
    }
}
