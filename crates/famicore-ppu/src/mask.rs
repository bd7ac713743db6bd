//! PPUMASK ($2001).

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// PPU mask register: rendering enables, clipping, emphasis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Mask: u8 {
        /// Grayscale output.
        const GRAYSCALE = 1 << 0;
        /// Show background in the leftmost 8 pixels.
        const BG_LEFT = 1 << 1;
        /// Show sprites in the leftmost 8 pixels.
        const SPRITE_LEFT = 1 << 2;
        /// Background rendering enable.
        const SHOW_BG = 1 << 3;
        /// Sprite rendering enable.
        const SHOW_SPRITES = 1 << 4;
        /// Red emphasis.
        const EMPHASIZE_RED = 1 << 5;
        /// Green emphasis.
        const EMPHASIZE_GREEN = 1 << 6;
        /// Blue emphasis.
        const EMPHASIZE_BLUE = 1 << 7;
    }
}

impl Mask {
    /// Background pipeline enabled.
    #[must_use]
    #[inline]
    pub const fn show_background(self) -> bool {
        self.contains(Self::SHOW_BG)
    }

    /// Rendering is on when either layer is enabled; this gates scroll
    /// increments, the odd-frame skip, and the fetch pipeline.
    #[must_use]
    #[inline]
    pub const fn rendering_enabled(self) -> bool {
        self.intersects(Self::SHOW_BG.union(Self::SHOW_SPRITES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_enabled_by_either_layer() {
        assert!(!Mask::empty().rendering_enabled());
        assert!(Mask::SHOW_BG.rendering_enabled());
        assert!(Mask::SHOW_SPRITES.rendering_enabled());
    }
}
