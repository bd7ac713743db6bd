//! Master-clock scheduler behavior: the 1:3 interleave, frame boundaries,
//! NMI delivery, and reset determinism.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{nrom_image, nrom_image_with_nmi};
use famicore_core::Nes;

/// An infinite loop at $8000 (`JMP $8000`).
fn idle_console() -> Nes {
    Nes::from_bytes(&nrom_image(&[0x4C, 0x00, 0x80], 0x8000)).unwrap()
}

#[test]
fn cpu_runs_every_third_master_edge() {
    let mut nes = idle_console();

    for ticks in [1u64, 2, 3, 100, 999, 1000] {
        nes.reset();
        for _ in 0..ticks {
            nes.tick();
        }
        assert_eq!(nes.cpu_view().cycles, ticks / 3, "after {ticks} ticks");
    }
}

#[test]
fn step_instruction_stops_at_a_boundary() {
    let mut nes = idle_console();

    nes.step_instruction(); // the 8-cycle reset sequence
    assert_eq!(nes.cpu_view().cycles, 8);

    let before = nes.cpu_view().cycles;
    nes.step_instruction(); // JMP $8000: 3 cycles
    assert_eq!(nes.cpu_view().cycles - before, 3);
    assert_eq!(nes.cpu_view().pc, 0x8000);
}

#[test]
fn run_frame_returns_at_vblank_boundary() {
    let mut nes = idle_console();

    let frame = nes.run_frame();
    assert_eq!(frame.len(), 256 * 240);
    assert_eq!(nes.ppu_position(), (241, 0));

    // From power-on at (0,0) to (241,0) is exactly 241 scanlines of dots.
    assert_eq!(nes.master_clock(), 341 * 241);
}

#[test]
fn successive_frames_are_a_full_frame_apart_when_idle() {
    let mut nes = idle_console();

    nes.run_frame();
    let first = nes.master_clock();
    nes.run_frame();
    // Rendering disabled: no odd-frame skip, every frame is 341*262 dots.
    assert_eq!(nes.master_clock() - first, 341 * 262);
}

#[test]
fn odd_frames_drop_one_dot_while_rendering() {
    // LDA #$08; STA $2001; JMP $8005 - background on, then spin.
    let program = [0xA9, 0x08, 0x8D, 0x01, 0x20, 0x4C, 0x05, 0x80];
    let mut nes = Nes::from_bytes(&nrom_image(&program, 0x8000)).unwrap();

    nes.run_frame();
    let t1 = nes.master_clock();
    nes.run_frame();
    let t2 = nes.master_clock();
    nes.run_frame();
    let t3 = nes.master_clock();

    let mut deltas = [t2 - t1, t3 - t2];
    deltas.sort_unstable();
    assert_eq!(deltas, [341 * 262 - 1, 341 * 262]);
}

#[test]
fn vblank_flag_rises_at_dot_341x241_plus_1() {
    let mut nes = idle_console();

    for _ in 0..(341 * 241) {
        nes.tick();
    }
    assert_eq!(nes.peek_cpu(0x2002) & 0x80, 0, "one dot early");

    nes.tick();
    assert_eq!(nes.ppu_position(), (241, 1));
    assert_ne!(nes.peek_cpu(0x2002) & 0x80, 0);
}

#[test]
fn nmi_reaches_the_cpu_after_vblank_starts() {
    // Enable NMI ($2000 = $80), then spin. The handler stores $01 to $0010
    // and spins too, marking delivery.
    let program = [0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80];
    let handler = [0xA9, 0x01, 0x85, 0x10, 0x4C, 0x04, 0x90];
    let image = nrom_image_with_nmi(&program, 0x8000, &handler, 0x9000);
    let mut nes = Nes::from_bytes(&image).unwrap();

    for _ in 0..=(341 * 241) {
        nes.tick();
    }
    assert_eq!(nes.peek_cpu(0x0010), 0, "NMI cannot land before VBlank");

    // The interrupt sequence plus the handler's two instructions: a
    // handful of CPU cycles, three master edges each.
    for _ in 0..(3 * 32) {
        nes.tick();
    }
    assert_eq!(nes.peek_cpu(0x0010), 1, "NMI handler never ran");
}

#[test]
fn nmi_disabled_means_no_interrupt() {
    let mut nes = idle_console();

    for _ in 0..(341 * 262 * 2) {
        nes.tick();
    }
    // Still sitting in the idle loop, not in a handler.
    let pc = nes.cpu_view().pc;
    assert!((0x8000..=0x8002).contains(&pc));
}

#[test]
fn reset_is_idempotent() {
    let mut nes = idle_console();

    nes.run_frame();
    nes.run_frame();

    nes.reset();
    let once = (nes.cpu_view(), nes.ppu_position(), nes.master_clock());
    nes.reset();
    let twice = (nes.cpu_view(), nes.ppu_position(), nes.master_clock());
    assert_eq!(once, twice);
    assert_eq!(once.0.sp, 0xFD);
}

#[test]
fn frame_sink_fires_once_per_vblank() {
    let mut nes = idle_console();
    let frames = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&frames);
    nes.set_frame_sink(move |pixels| {
        assert_eq!(pixels.len(), 256 * 240);
        counter.set(counter.get() + 1);
    });

    // Two full frames plus a little: the sink fires at each (241,1).
    for _ in 0..(341 * 262 * 2 + 10) {
        nes.tick();
    }
    assert_eq!(frames.get(), 2);
}

#[test]
fn power_on_registers() {
    let nes = idle_console();
    let view = nes.cpu_view();
    assert_eq!(view.sp, 0xFD);
    assert_eq!(view.pc, 0x8000); // reset vector
    assert_ne!(view.p & 0x04, 0); // I set
}
