//! PPUCTRL ($2000).
//!
//! ```text
//! 7  6  5  4  3  2  1  0
//! V  P  H  B  S  I  N  N
//! |  |  |  |  |  |  +--+-- Base nametable (0=$2000, 1=$2400, 2=$2800, 3=$2C00)
//! |  |  |  |  |  +-------- VRAM increment (0: add 1, 1: add 32)
//! |  |  |  |  +----------- Sprite pattern table for 8x8 sprites
//! |  |  |  +-------------- Background pattern table (0: $0000, 1: $1000)
//! |  |  +----------------- Sprite size (0: 8x8, 1: 8x16)
//! |  +-------------------- Master/slave select
//! +----------------------- NMI at VBlank start
//! ```

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// PPU control register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Ctrl: u8 {
        /// Base nametable bit 0.
        const NAMETABLE_LO = 1 << 0;
        /// Base nametable bit 1.
        const NAMETABLE_HI = 1 << 1;
        /// VRAM address increment select.
        const VRAM_INCREMENT = 1 << 2;
        /// Sprite pattern table select (8x8 sprites).
        const SPRITE_TABLE = 1 << 3;
        /// Background pattern table select.
        const BG_TABLE = 1 << 4;
        /// Sprite size select.
        const SPRITE_SIZE = 1 << 5;
        /// EXT pin master/slave select.
        const MASTER_SLAVE = 1 << 6;
        /// Generate NMI at VBlank start.
        const NMI_ENABLE = 1 << 7;
    }
}

impl Ctrl {
    /// VRAM address step after a $2007 access: 1 across, 32 down.
    #[must_use]
    #[inline]
    pub const fn vram_increment(self) -> u16 {
        if self.contains(Self::VRAM_INCREMENT) { 32 } else { 1 }
    }

    /// Background pattern table base address ($0000 or $1000).
    #[must_use]
    #[inline]
    pub const fn bg_table_addr(self) -> u16 {
        if self.contains(Self::BG_TABLE) { 0x1000 } else { 0x0000 }
    }

    /// Nametable select bits (0-3), copied into `t` on write.
    #[must_use]
    #[inline]
    pub const fn nametable_select(self) -> u8 {
        self.bits() & 0x03
    }

    /// Whether VBlank raises NMI.
    #[must_use]
    #[inline]
    pub const fn nmi_enabled(self) -> bool {
        self.contains(Self::NMI_ENABLE)
    }
}
