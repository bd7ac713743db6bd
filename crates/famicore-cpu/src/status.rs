//! CPU status register (P).
//!
//! ```text
//! 7  6  5  4  3  2  1  0
//! N  V  U  B  D  I  Z  C
//! │  │  │  │  │  │  │  └─ Carry
//! │  │  │  │  │  │  └──── Zero
//! │  │  │  │  │  └─────── Interrupt disable
//! │  │  │  │  └────────── Decimal (the 2A03 has no BCD unit; the bit still latches)
//! │  │  │  └───────────── Break (1 when pushed by PHP/BRK, 0 by IRQ/NMI)
//! │  │  └──────────────── Unused (reads as 1)
//! │  └─────────────────── Overflow
//! └────────────────────── Negative
//! ```
//!
//! B and U only exist on the stack image: pulls force U to 1 and drop B.

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Processor status flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Status: u8 {
        /// Carry.
        const C = 1 << 0;
        /// Zero.
        const Z = 1 << 1;
        /// Interrupt disable.
        const I = 1 << 2;
        /// Decimal mode (latched but inert on the 2A03).
        const D = 1 << 3;
        /// Break scratch bit.
        const B = 1 << 4;
        /// Unused, always 1.
        const U = 1 << 5;
        /// Signed overflow.
        const V = 1 << 6;
        /// Negative (bit 7 of the last result).
        const N = 1 << 7;
    }
}

impl Status {
    /// Power-on value: $34 (I, B and U set).
    pub const POWER_ON: Self = Self::I.union(Self::B).union(Self::U);

    /// Set Z and N from a result byte.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set(Self::Z, value == 0);
        self.set(Self::N, value & 0x80 != 0);
    }

    /// Byte pushed to the stack. U is always set; B reflects the push source
    /// (PHP and BRK push 1, IRQ and NMI push 0).
    #[inline]
    #[must_use]
    pub const fn to_stack_byte(self, brk: bool) -> u8 {
        let mut bits = self.bits() | Self::U.bits();
        if brk {
            bits |= Self::B.bits();
        } else {
            bits &= !Self::B.bits();
        }
        bits
    }

    /// Register value restored from a stack byte: B is dropped, U forced to 1.
    #[inline]
    #[must_use]
    pub fn from_stack_byte(value: u8) -> Self {
        Self::from_bits_truncate((value & !Self::B.bits()) | Self::U.bits())
    }
}
