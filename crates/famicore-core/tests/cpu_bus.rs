//! CPU bus decode: RAM mirroring, the PPU register window, stubs, and the
//! $2006/$2007 protocol as seen from the CPU side.

mod common;

use common::nrom_image;
use famicore_core::Nes;
use famicore_cpu::Bus;

fn console() -> Nes {
    Nes::from_bytes(&nrom_image(&[0x4C, 0x00, 0x80], 0x8000)).unwrap()
}

#[test]
fn ram_mirrors_every_2k() {
    let mut nes = console();
    let bus = nes.bus_mut();

    bus.write(0x0000, 0x42);
    assert_eq!(bus.read(0x0800), 0x42);
    assert_eq!(bus.read(0x1000), 0x42);
    assert_eq!(bus.read(0x1800), 0x42);

    bus.write(0x1234, 0xAB);
    assert_eq!(bus.read(0x0234), 0xAB);
}

#[test]
fn ppu_registers_mirror_every_8_bytes() {
    let mut nes = console();
    let bus = nes.bus_mut();

    // $2006 written through a high mirror still drives the address pair.
    bus.write(0x3FF6, 0x21);
    bus.write(0x2006, 0x08);
    assert_eq!(bus.ppu.scroll().addr(), 0x2108);
}

#[test]
fn ppuaddr_ppudata_protocol() {
    let mut nes = console();
    let bus = nes.bus_mut();

    // v <- $2345, then write a byte through $2007.
    bus.write(0x2006, 0x23);
    bus.write(0x2006, 0x45);
    bus.write(0x2007, 0x99);

    // Re-point and read twice: first fetch returns the stale buffer.
    bus.write(0x2006, 0x23);
    bus.write(0x2006, 0x45);
    let stale = bus.read(0x2007);
    assert_eq!(stale, 0x00);
    assert_eq!(bus.ppu.scroll().addr(), 0x2346);
    let fresh = bus.read(0x2007);
    assert_eq!(fresh, 0x99);
}

#[test]
fn ppudata_write_lands_in_mirrored_vram() {
    let mut nes = console();
    let bus = nes.bus_mut();

    bus.write(0x2006, 0x20);
    bus.write(0x2006, 0x10);
    bus.write(0x2007, 0x5A);

    // The test cartridge is vertically mirrored: $2010 and $2810 share.
    assert_eq!(nes.peek_ppu(0x2010), 0x5A);
    assert_eq!(nes.peek_ppu(0x2810), 0x5A);
}

#[test]
fn palette_aliases_visible_through_the_bus() {
    let mut nes = console();
    let bus = nes.bus_mut();

    bus.write(0x2006, 0x3F);
    bus.write(0x2006, 0x10);
    bus.write(0x2007, 0x2C);

    assert_eq!(nes.peek_ppu(0x3F00), 0x2C);
    assert_eq!(nes.peek_ppu(0x3F10), 0x2C);
}

#[test]
fn apu_and_io_window_reads_zero() {
    let mut nes = console();
    let bus = nes.bus_mut();

    for addr in [0x4000u16, 0x4013, 0x4014, 0x4015, 0x4016, 0x4017, 0x401F] {
        bus.write(addr, 0xFF);
        assert_eq!(bus.read(addr), 0, "${addr:04X}");
    }
}

#[test]
fn unclaimed_cartridge_space_reads_zero() {
    let mut nes = console();
    // NROM without PRG-RAM leaves $4020-$7FFF unclaimed.
    assert_eq!(nes.bus_mut().read(0x4020), 0);
    assert_eq!(nes.bus_mut().read(0x5123), 0);
}

#[test]
fn program_rom_is_visible_and_write_protected() {
    let mut nes = console();
    let bus = nes.bus_mut();

    assert_eq!(bus.read(0x8000), 0x4C);
    bus.write(0x8000, 0x00);
    assert_eq!(bus.read(0x8000), 0x4C);
}

#[test]
fn peek_matches_read_for_plain_memory() {
    let mut nes = console();
    nes.bus_mut().write(0x0300, 0x77);

    assert_eq!(nes.peek_cpu(0x0300), 0x77);
    assert_eq!(nes.peek_cpu(0x0B00), 0x77); // mirror
    assert_eq!(nes.peek_cpu(0x8000), 0x4C);
}

#[test]
fn status_peek_does_not_clear_vblank() {
    let mut nes = console();

    for _ in 0..=(341 * 241) {
        nes.tick();
    }
    assert_ne!(nes.peek_cpu(0x2002) & 0x80, 0);
    assert_ne!(nes.peek_cpu(0x2002) & 0x80, 0, "peek must not clear VBlank");

    // A real read does clear it.
    assert_ne!(nes.bus_mut().read(0x2002) & 0x80, 0);
    assert_eq!(nes.peek_cpu(0x2002) & 0x80, 0);
}

#[test]
fn disassembly_reads_through_peek() {
    let nes = console();
    assert_eq!(nes.disassemble_at(0x8000), "JMP $8000");
}
