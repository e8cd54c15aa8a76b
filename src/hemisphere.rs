//! The two logical halves of the module.

use crate::config::GFX_WIDTH;

/// Which half of the module an applet instance occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hemisphere {
    #[default]
    Left = 0,
    Right = 1,
}

impl Hemisphere {
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// `0` selects LEFT, anything else RIGHT.
    pub const fn from_index(index: usize) -> Self {
        if index == 0 { Self::Left } else { Self::Right }
    }

    /// Horizontal pixel offset of this half's canvas.
    pub const fn gfx_offset(self) -> i32 {
        self as i32 * GFX_WIDTH
    }

    /// Offset added to a local channel index to reach the physical channel.
    pub const fn io_offset(self) -> usize {
        self as usize * 2
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Iterate both logical channels of a hemisphere.
pub const CHANNELS: [usize; 2] = [0, 1];
