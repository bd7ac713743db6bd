//! System buses: the CPU-side address decoder and the PPU memory adapter.
//!
//! CPU memory map:
//!
//! ```text
//! $0000-$1FFF: 2 KiB internal RAM, mirrored every $0800
//! $2000-$3FFF: PPU registers, mirrored every 8 bytes
//! $4000-$4017: APU and I/O registers (stubbed)
//! $4018-$401F: disabled test registers (stubbed)
//! $4020-$FFFF: cartridge
//! ```

use famicore_cart::{Cartridge, Mapper};
use famicore_cpu::Bus;
use famicore_ppu::{Ppu, PpuBus};

/// PPU-side view of external memory: pattern tables go to the mapper,
/// nametable addresses fold through the mapper's mirroring policy into
/// console VRAM. Palette RAM never reaches this adapter; the PPU holds it.
pub struct PpuMemory<'a> {
    mapper: &'a mut dyn Mapper,
    vram: &'a mut [u8; 2048],
}

impl PpuMemory<'_> {
    fn vram_slot(&self, addr: u16) -> usize {
        let (page, offset) = self.mapper.nametable_mirror(addr);
        page * 0x0400 + offset
    }
}

impl PpuBus for PpuMemory<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        match addr & 0x3FFF {
            0x0000..=0x1FFF => self.mapper.ppu_read(addr & 0x1FFF),
            // $3000-$3EFF aliases $2000-$2EFF; the fold drops bit 12 anyway.
            addr => self.vram[self.vram_slot(addr)],
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr & 0x3FFF {
            0x0000..=0x1FFF => self.mapper.ppu_write(addr & 0x1FFF, value),
            addr => {
                let slot = self.vram_slot(addr);
                self.vram[slot] = value;
            }
        }
    }
}

/// Everything the CPU can reach, plus the PPU's working memory.
pub struct MainBus {
    /// 2 KiB internal work RAM.
    pub ram: [u8; 2048],
    /// 2 KiB console VRAM holding two nametable pages.
    pub vram: [u8; 2048],
    /// Picture processor.
    pub ppu: Ppu,
    /// Cartridge (header + mapper).
    pub cart: Cartridge,
}

impl MainBus {
    /// Wire a bus around a loaded cartridge.
    #[must_use]
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; 2048],
            vram: [0; 2048],
            ppu: Ppu::new(),
            cart,
        }
    }

    /// Clear memories and return the PPU and mapper to power-on state.
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.vram.fill(0);
        self.ppu.reset();
        self.cart.mapper.reset();
    }

    /// Advance the PPU by one dot.
    pub fn tick_ppu(&mut self) {
        let mut memory = PpuMemory {
            mapper: &mut *self.cart.mapper,
            vram: &mut self.vram,
        };
        self.ppu.tick(&mut memory);
    }

    /// CPU-space read with no side effects, for debuggers.
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.peek_register(addr & 7),
            0x4000..=0x401F => 0,
            0x4020..=0xFFFF => self.cart.mapper.cpu_read(addr).unwrap_or(0),
        }
    }

    /// PPU-space read with no side effects, for debuggers.
    #[must_use]
    pub fn peek_ppu(&self, addr: u16) -> u8 {
        match addr & 0x3FFF {
            0x0000..=0x1FFF => self.cart.mapper.ppu_read(addr & 0x1FFF),
            0x3F00..=0x3FFF => self.ppu.palette_read(addr),
            addr => {
                let (page, offset) = self.cart.mapper.nametable_mirror(addr);
                self.vram[page * 0x0400 + offset]
            }
        }
    }
}

impl Bus for MainBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],

            0x2000..=0x3FFF => {
                let mut memory = PpuMemory {
                    mapper: &mut *self.cart.mapper,
                    vram: &mut self.vram,
                };
                self.ppu.read_register(addr & 7, &mut memory)
            }

            // APU, OAMDMA, controllers, test region: stubs read as 0.
            0x4000..=0x401F => 0,

            0x4020..=0xFFFF => match self.cart.mapper.cpu_read(addr) {
                Some(value) => value,
                None => {
                    log::warn!("unhandled bus read at ${addr:04X}");
                    0
                }
            },
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = value,

            0x2000..=0x3FFF => {
                let mut memory = PpuMemory {
                    mapper: &mut *self.cart.mapper,
                    vram: &mut self.vram,
                };
                self.ppu.write_register(addr & 7, value, &mut memory);
            }

            // APU, OAMDMA ($4014), controllers, test region: writes dropped.
            0x4000..=0x401F => {}

            0x4020..=0xFFFF => {
                if !self.cart.mapper.cpu_write(addr, value) {
                    log::warn!("unhandled bus write at ${addr:04X} <- ${value:02X}");
                }
            }
        }
    }
}
