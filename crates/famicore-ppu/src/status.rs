//! PPUSTATUS ($2002).
//!
//! Only the top three bits are driven; the low five float on the data bus
//! and read back as whatever was last driven there.

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// PPU status register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Status: u8 {
        /// Sprite overflow (kept for register fidelity; sprites are not rendered).
        const SPRITE_OVERFLOW = 1 << 5;
        /// Sprite 0 hit (kept for register fidelity).
        const SPRITE_ZERO_HIT = 1 << 6;
        /// Vertical blank started.
        const VBLANK = 1 << 7;
    }
}

impl Status {
    /// In vertical blank.
    #[must_use]
    #[inline]
    pub const fn in_vblank(self) -> bool {
        self.contains(Self::VBLANK)
    }
}
