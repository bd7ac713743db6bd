//! Property tests over the documented bus and scheduler invariants.

mod common;

use common::nrom_image;
use famicore_core::Nes;
use famicore_cpu::Bus;
use proptest::prelude::*;

fn console() -> Nes {
    Nes::from_bytes(&nrom_image(&[0x4C, 0x00, 0x80], 0x8000)).unwrap()
}

proptest! {
    /// Reads and writes anywhere in $0000-$1FFF alias modulo $0800.
    #[test]
    fn ram_aliases_mod_0800(addr in 0u16..0x2000, value: u8) {
        let mut nes = console();
        let bus = nes.bus_mut();

        bus.write(addr, value);
        let base = addr & 0x07FF;
        prop_assert_eq!(bus.read(base), value);
        prop_assert_eq!(bus.read(base | 0x0800), value);
        prop_assert_eq!(bus.read(base | 0x1000), value);
        prop_assert_eq!(bus.read(base | 0x1800), value);
    }

    /// The PPU register file aliases every 8 bytes across $2000-$3FFF.
    #[test]
    fn ppu_registers_alias_mod_8(mirror in 0u16..0x400, value: u8) {
        let mut nes = console();
        let bus = nes.bus_mut();

        // Drive PPUMASK through an arbitrary mirror of $2001.
        bus.write(0x2001 + mirror * 8, value);
        prop_assert_eq!(bus.ppu.mask().bits(), value);
    }

    /// Palette writes to the $3F10/$14/$18/$1C aliases surface at the
    /// backdrop entries and vice versa.
    #[test]
    fn palette_aliases(slot in 0u16..4, value: u8) {
        let mut nes = console();
        let bus = nes.bus_mut();

        let alias = 0x3F10 + slot * 4;
        bus.write(0x2006, (alias >> 8) as u8);
        bus.write(0x2006, (alias & 0xFF) as u8);
        bus.write(0x2007, value);

        let masked = value & 0x3F;
        prop_assert_eq!(nes.peek_ppu(0x3F00 + slot * 4), masked);
        prop_assert_eq!(nes.peek_ppu(alias), masked);
    }

    /// Over any N master ticks the CPU is clocked exactly floor(N/3) times.
    #[test]
    fn cpu_clock_ratio(ticks in 1u64..30_000) {
        let mut nes = console();
        for _ in 0..ticks {
            nes.tick();
        }
        prop_assert_eq!(nes.cpu_view().cycles, ticks / 3);
    }

    /// Reset is idempotent no matter how much the machine ran beforehand.
    #[test]
    fn reset_idempotence(ticks in 0u64..50_000) {
        let mut nes = console();
        for _ in 0..ticks {
            nes.tick();
        }

        nes.reset();
        let once = (nes.cpu_view(), nes.ppu_position(), nes.master_clock());
        nes.reset();
        prop_assert_eq!((nes.cpu_view(), nes.ppu_position(), nes.master_clock()), once);
    }

    /// RAM round-trips through write-then-read at the same address.
    #[test]
    fn ram_round_trip(addr in 0u16..0x0800, value: u8) {
        let mut nes = console();
        nes.bus_mut().write(addr, value);
        prop_assert_eq!(nes.bus_mut().read(addr), value);
        prop_assert_eq!(nes.peek_cpu(addr), value);
    }

    /// The scroll registers stay within their documented widths.
    #[test]
    fn scroll_registers_stay_masked(writes in proptest::collection::vec((0u16..8, any::<u8>()), 0..64)) {
        let mut nes = console();
        let bus = nes.bus_mut();

        for (reg, value) in writes {
            bus.write(0x2000 + reg, value);
        }

        let scroll = bus.ppu.scroll();
        prop_assert!(scroll.addr() <= 0x7FFF);
        prop_assert!(scroll.temp() <= 0x7FFF);
        prop_assert!(scroll.fine_x() <= 7);
    }
}
