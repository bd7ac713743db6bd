//! Mapper 0: NROM.
//!
//! The launch-era board with no banking at all. 16 KiB or 32 KiB of PRG-ROM
//! (the 16 KiB variant is mirrored across the upper half), 8 KiB of CHR-ROM
//! or CHR-RAM, optional 8 KiB of PRG-RAM in the $6000-$7FFF window, and
//! mirroring fixed by a solder pad.
//!
//! ```text
//! CPU:
//! $6000-$7FFF: PRG-RAM (when present)
//! $8000-$FFFF: PRG-ROM (16 KiB image repeats at $C000)
//!
//! PPU:
//! $0000-$1FFF: 8 KiB CHR-ROM or CHR-RAM
//! ```

use crate::{Mapper, Mirroring, Rom};

/// NROM board (mapper 0).
pub struct Nrom {
    prg_rom: Vec<u8>,
    prg_ram: Vec<u8>,
    chr: Vec<u8>,
    chr_writable: bool,
    mirroring: Mirroring,
}

impl Nrom {
    /// Build the board from a loaded ROM image.
    ///
    /// A missing CHR section means the board carries 8 KiB of CHR-RAM.
    /// PRG-RAM is allocated when the header asks for it.
    #[must_use]
    pub fn new(rom: &Rom) -> Self {
        let chr_writable = rom.chr_rom.is_empty();
        let chr = if chr_writable {
            vec![0; rom.header.chr_ram_size.max(8192)]
        } else {
            rom.chr_rom.clone()
        };

        Self {
            prg_rom: rom.prg_rom.clone(),
            prg_ram: vec![0; rom.header.prg_ram_size],
            chr,
            chr_writable,
            mirroring: rom.header.mirroring,
        }
    }

    fn prg_offset(&self, addr: u16) -> usize {
        let offset = (addr - 0x8000) as usize;
        if self.prg_rom.len() <= 16384 {
            offset & 0x3FFF
        } else {
            offset
        }
    }
}

impl Mapper for Nrom {
    fn cpu_read(&self, addr: u16) -> Option<u8> {
        match addr {
            0x6000..=0x7FFF if !self.prg_ram.is_empty() => {
                let offset = (addr - 0x6000) as usize % self.prg_ram.len();
                Some(self.prg_ram[offset])
            }
            0x8000..=0xFFFF => Some(self.prg_rom[self.prg_offset(addr)]),
            _ => None,
        }
    }

    fn cpu_write(&mut self, addr: u16, value: u8) -> bool {
        match addr {
            0x6000..=0x7FFF if !self.prg_ram.is_empty() => {
                let offset = (addr - 0x6000) as usize % self.prg_ram.len();
                self.prg_ram[offset] = value;
                true
            }
            // PRG-ROM has no registers; the write lands nowhere.
            0x8000..=0xFFFF => true,
            _ => false,
        }
    }

    fn ppu_read(&self, addr: u16) -> u8 {
        self.chr[addr as usize % self.chr.len()]
    }

    fn ppu_write(&mut self, addr: u16, value: u8) {
        if self.chr_writable {
            let len = self.chr.len();
            self.chr[addr as usize % len] = value;
        }
    }

    fn nametable_mirror(&self, addr: u16) -> (usize, usize) {
        self.mirroring.page_and_offset(addr)
    }

    fn mapper_number(&self) -> u16 {
        0
    }

    fn mapper_name(&self) -> &'static str {
        "NROM"
    }
}
