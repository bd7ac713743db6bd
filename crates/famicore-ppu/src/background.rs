//! Background tile pipeline: fetch latches and shift registers.
//!
//! Every 8 dots the PPU fetches a nametable byte, an attribute quadrant,
//! and the two pattern bitplanes for one tile, then reloads the low halves
//! of four 16-bit shift registers. Each dot the registers shift left one
//! bit; fine X picks which of the top 8 bits feeds the pixel mux.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fetch latches plus the four 16-bit shift registers.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Background {
    /// Latched nametable byte (tile index).
    nametable: u8,
    /// Latched attribute field, already reduced to 2 bits.
    attribute: u8,
    /// Latched pattern low bitplane.
    pattern_lo: u8,
    /// Latched pattern high bitplane.
    pattern_hi: u8,

    shift_pattern_lo: u16,
    shift_pattern_hi: u16,
    shift_attr_lo: u16,
    shift_attr_hi: u16,
}

impl Background {
    /// Zeroed pipeline.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nametable: 0,
            attribute: 0,
            pattern_lo: 0,
            pattern_hi: 0,
            shift_pattern_lo: 0,
            shift_pattern_hi: 0,
            shift_attr_lo: 0,
            shift_attr_hi: 0,
        }
    }

    /// Latch the nametable byte.
    #[inline]
    pub fn latch_nametable(&mut self, byte: u8) {
        self.nametable = byte;
    }

    /// Tile index fetched this cadence, used to address the pattern table.
    #[must_use]
    #[inline]
    pub const fn tile_index(self) -> u8 {
        self.nametable
    }

    /// Latch the attribute byte, reduced to the 2-bit field selected by
    /// the tile's quadrant shift.
    #[inline]
    pub fn latch_attribute(&mut self, byte: u8, quadrant_shift: u8) {
        self.attribute = (byte >> quadrant_shift) & 0x03;
    }

    /// Latch the pattern low bitplane.
    #[inline]
    pub fn latch_pattern_lo(&mut self, byte: u8) {
        self.pattern_lo = byte;
    }

    /// Latch the pattern high bitplane.
    #[inline]
    pub fn latch_pattern_hi(&mut self, byte: u8) {
        self.pattern_hi = byte;
    }

    /// Reload the low byte of each shift register from the latches. The
    /// attribute bits expand to a full byte so they shift in step with
    /// the pattern bits.
    pub fn reload(&mut self) {
        self.shift_pattern_lo = (self.shift_pattern_lo & 0xFF00) | u16::from(self.pattern_lo);
        self.shift_pattern_hi = (self.shift_pattern_hi & 0xFF00) | u16::from(self.pattern_hi);
        self.shift_attr_lo =
            (self.shift_attr_lo & 0xFF00) | if self.attribute & 0x01 != 0 { 0xFF } else { 0x00 };
        self.shift_attr_hi =
            (self.shift_attr_hi & 0xFF00) | if self.attribute & 0x02 != 0 { 0xFF } else { 0x00 };
    }

    /// Shift all four registers one bit left.
    #[inline]
    pub fn shift(&mut self) {
        self.shift_pattern_lo <<= 1;
        self.shift_pattern_hi <<= 1;
        self.shift_attr_lo <<= 1;
        self.shift_attr_hi <<= 1;
    }

    /// Extract the 2-bit pattern and 2-bit palette select at `fine_x`.
    /// A pattern of 0 means the backdrop shows through.
    #[must_use]
    pub fn pixel(self, fine_x: u8) -> (u8, u8) {
        let bit = 0x8000u16 >> fine_x;

        let p0 = u8::from(self.shift_pattern_lo & bit != 0);
        let p1 = u8::from(self.shift_pattern_hi & bit != 0);
        let a0 = u8::from(self.shift_attr_lo & bit != 0);
        let a1 = u8::from(self.shift_attr_hi & bit != 0);

        (p0 | (p1 << 1), a0 | (a1 << 1))
    }

    /// Zero everything.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
