//! famicore - NES emulation core.
//!
//! Integrates the 6502 CPU, the 2C02 PPU background pipeline, and the
//! cartridge mapper behind a single console facade driven by a 1:3
//! master-clock scheduler.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                        Nes                            │
//! │  master clock ── every edge ──► PPU (one dot)         │
//! │       │                          │                    │
//! │       └── every 3rd edge ──► CPU │ NMI (pending flag) │
//! │                               │  │                    │
//! │  ┌────────────────────────────▼──▼─────────────────┐  │
//! │  │                   MainBus                       │  │
//! │  │  ┌─────┐  ┌──────┐  ┌──────────┐  ┌──────────┐  │  │
//! │  │  │ RAM │  │ VRAM │  │ PPU regs │  │ Cartridge│  │  │
//! │  │  │ 2K  │  │  2K  │  │  $2000+  │  │  mapper  │  │  │
//! │  │  └─────┘  └──────┘  └──────────┘  └──────────┘  │  │
//! │  └─────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use famicore_core::Nes;
//!
//! let mut nes = Nes::from_file("game.nes").expect("load failed");
//!
//! loop {
//!     // Run one video frame and hand the pixels to the display.
//!     let frame = nes.run_frame();
//!     let _ = frame; // 256x240 RGB triplets
//! }
//! ```
//!
//! Audio, controllers and sprite rendering are outside this core; their
//! register windows exist as stubs so software that touches them runs.

mod bus;
mod nes;

pub use bus::{MainBus, PpuMemory};
pub use nes::{CpuView, Nes};

// Re-export the pieces hosts and tests reach for.
pub use famicore_cart::{Cartridge, Format, Header, LoadError, Mapper, Mirroring};
pub use famicore_cpu::{Cpu, Status};
pub use famicore_ppu::{palette, Ppu, Rgb};

/// Screen geometry.
pub mod screen {
    /// Width in pixels.
    pub const WIDTH: usize = 256;
    /// Height in pixels.
    pub const HEIGHT: usize = 240;
    /// Pixels per frame.
    pub const PIXELS: usize = WIDTH * HEIGHT;
}

/// Emulation timing constants (NTSC).
pub mod timing {
    /// Master clock edges per CPU cycle.
    pub const MASTER_PER_CPU: u64 = 3;
    /// Dots per scanline.
    pub const DOTS_PER_SCANLINE: u16 = 341;
    /// Scanlines per frame, pre-render included.
    pub const SCANLINES_PER_FRAME: u16 = 262;
}
