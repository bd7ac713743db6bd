//! Scanline/dot position counter.
//!
//! A frame is 262 scanlines of 341 dots. Scanlines are numbered the way the
//! rendering logic thinks about them: −1 is the pre-render line, 0-239 are
//! visible, 240 is post-render, and 241-260 are vertical blank. The
//! pre-render line sits at the end of the sequence, so dot counting from
//! power-on (which starts at (0,0)) reaches VBlank at dot 341·241+1.
//!
//! On odd frames, with rendering enabled, dot (0,0) is skipped, making the
//! frame one dot shorter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dots per scanline.
pub const DOTS_PER_LINE: u16 = 341;
/// Scanline on which VBlank begins (at dot 1).
pub const VBLANK_LINE: i16 = 241;
/// The pre-render scanline.
pub const PRE_RENDER_LINE: i16 = -1;
/// Last scanline of the frame sequence.
pub const LAST_LINE: i16 = 260;

/// Current beam position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timing {
    scanline: i16,
    dot: u16,
    frame: u64,
}

impl Timing {
    /// Power-on position: scanline 0, dot 0, frame 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { scanline: 0, dot: 0, frame: 0 }
    }

    /// Current scanline (−1 through 260).
    #[must_use]
    #[inline]
    pub const fn scanline(self) -> i16 {
        self.scanline
    }

    /// Current dot within the scanline (0 through 340).
    #[must_use]
    #[inline]
    pub const fn dot(self) -> u16 {
        self.dot
    }

    /// Frames completed so far.
    #[must_use]
    #[inline]
    pub const fn frame(self) -> u64 {
        self.frame
    }

    /// On the pre-render line.
    #[must_use]
    #[inline]
    pub const fn is_prerender(self) -> bool {
        self.scanline == PRE_RENDER_LINE
    }

    /// On a visible scanline (0-239).
    #[must_use]
    #[inline]
    pub const fn is_visible_line(self) -> bool {
        self.scanline >= 0 && self.scanline < 240
    }

    /// On a line where the background pipeline runs (visible or pre-render).
    #[must_use]
    #[inline]
    pub const fn is_rendering_line(self) -> bool {
        self.is_visible_line() || self.is_prerender()
    }

    /// In the per-pixel dot range (1-256).
    #[must_use]
    #[inline]
    pub const fn is_visible_dot(self) -> bool {
        self.dot >= 1 && self.dot <= 256
    }

    /// In the next-line prefetch dot range (321-336).
    #[must_use]
    #[inline]
    pub const fn is_prefetch_dot(self) -> bool {
        self.dot >= 321 && self.dot <= 336
    }

    /// Dots where the tile fetch cadence runs.
    #[must_use]
    #[inline]
    pub const fn is_fetch_dot(self) -> bool {
        self.is_visible_dot() || self.is_prefetch_dot()
    }

    /// Dots where shifters reload on `dot % 8 == 1` (9-257 and 321-337).
    #[must_use]
    #[inline]
    pub const fn is_reload_dot(self) -> bool {
        self.dot % 8 == 1 && ((self.dot >= 9 && self.dot <= 257) || (self.dot >= 321 && self.dot <= 337))
    }

    /// VBlank begins here: (241, 1).
    #[must_use]
    #[inline]
    pub const fn is_vblank_set_dot(self) -> bool {
        self.scanline == VBLANK_LINE && self.dot == 1
    }

    /// Status flags clear here: (−1, 1).
    #[must_use]
    #[inline]
    pub const fn is_vblank_clear_dot(self) -> bool {
        self.is_prerender() && self.dot == 1
    }

    /// Vertical-copy window on the pre-render line (dots 280-304).
    #[must_use]
    #[inline]
    pub const fn is_vertical_copy_dot(self) -> bool {
        self.is_prerender() && self.dot >= 280 && self.dot <= 304
    }

    /// Advance one dot. Returns `true` when a new frame begins.
    pub fn tick(&mut self, rendering_enabled: bool) -> bool {
        self.dot += 1;

        if self.dot >= DOTS_PER_LINE {
            self.dot = 0;
            self.scanline += 1;

            if self.scanline > LAST_LINE {
                self.scanline = PRE_RENDER_LINE;
                self.frame = self.frame.wrapping_add(1);
                return true;
            }

            // Odd frames skip dot (0,0) while rendering.
            if self.scanline == 0 && rendering_enabled && self.frame % 2 == 1 {
                self.dot = 1;
            }
        }

        false
    }

    /// Return to the power-on position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, scanline: i16, dot: u16, frame: u64) {
        self.scanline = scanline;
        self.dot = dot;
        self.frame = frame;
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}
