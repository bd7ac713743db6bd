//! The console facade and master-clock scheduler.
//!
//! One [`Nes::tick`] is one master-clock edge: the PPU always advances one
//! dot, and every third edge the CPU advances one cycle. The PPU runs
//! first within a tick, so CPU reads observe all PPU side effects up to
//! and including the current dot. NMI travels as a pending flag the CPU
//! consumes at its next instruction boundary.

use std::path::Path;

use famicore_cart::{Cartridge, LoadError};
use famicore_cpu::{trace, Bus, Cpu, Status, OPCODE_TABLE};
use famicore_ppu::Rgb;

use crate::bus::MainBus;

/// Master clock edges per CPU cycle.
const CPU_DIVIDER: u64 = 3;

/// Read-only snapshot of the CPU register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuView {
    /// Accumulator.
    pub a: u8,
    /// X index.
    pub x: u8,
    /// Y index.
    pub y: u8,
    /// Stack pointer.
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
    /// Status byte.
    pub p: u8,
    /// Retired CPU cycles.
    pub cycles: u64,
}

/// A complete NES: CPU, PPU, buses, cartridge, and the clock that
/// interleaves them.
pub struct Nes {
    cpu: Cpu,
    bus: MainBus,
    master_clock: u64,
    frame_sink: Option<Box<dyn FnMut(&[Rgb])>>,
}

impl Nes {
    /// Load a ROM file and power the console on.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`] from the cartridge loader; the console is never
    /// constructed in an invalid state.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        Ok(Self::with_cartridge(Cartridge::from_file(path)?))
    }

    /// Load a ROM image from memory and power the console on.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`] from the cartridge loader.
    pub fn from_bytes(data: &[u8]) -> Result<Self, LoadError> {
        Ok(Self::with_cartridge(Cartridge::from_bytes(data)?))
    }

    /// Build a console around an already-loaded cartridge.
    #[must_use]
    pub fn with_cartridge(cart: Cartridge) -> Self {
        let mut nes = Self {
            cpu: Cpu::new(),
            bus: MainBus::new(cart),
            master_clock: 0,
            frame_sink: None,
        };
        nes.power_on();
        nes
    }

    /// Cold boot: the 2A03 zeroes the APU register window, then the reset
    /// sequence runs.
    pub fn power_on(&mut self) {
        for addr in 0x4000..=0x4013 {
            self.bus.write(addr, 0);
        }
        self.bus.write(0x4015, 0);
        self.bus.write(0x4017, 0);
        self.reset();
    }

    /// Deterministic reset of CPU, PPU, memories and mapper. Applying it
    /// twice equals applying it once.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.master_clock = 0;
    }

    /// Advance one master-clock edge. Returns `true` when the CPU finished
    /// an instruction on this edge.
    pub fn tick(&mut self) -> bool {
        self.master_clock += 1;

        self.bus.tick_ppu();
        if self.bus.ppu.take_nmi() {
            self.cpu.signal_nmi();
        }
        if self.bus.ppu.take_frame_ready() {
            if let Some(sink) = self.frame_sink.as_mut() {
                sink(self.bus.ppu.frame());
            }
        }

        if self.master_clock % CPU_DIVIDER == 0 {
            self.cpu.clock(&mut self.bus)
        } else {
            false
        }
    }

    /// Run master-clock edges until the CPU completes one instruction.
    pub fn step_instruction(&mut self) {
        while !self.tick() {}
    }

    /// Run master-clock edges until the PPU reaches (241, 0), then return
    /// the completed frame. The buffer stays valid until the next VBlank.
    pub fn run_frame(&mut self) -> &[Rgb] {
        loop {
            self.tick();
            if self.bus.ppu.scanline() == 241 && self.bus.ppu.dot() == 0 {
                break;
            }
        }
        self.bus.ppu.frame()
    }

    /// Install the per-frame pixel sink, called at VBlank start. The sink
    /// must copy the buffer before returning.
    pub fn set_frame_sink<F: FnMut(&[Rgb]) + 'static>(&mut self, sink: F) {
        self.frame_sink = Some(Box::new(sink));
    }

    /// The current frame buffer.
    #[must_use]
    pub fn frame(&self) -> &[Rgb] {
        self.bus.ppu.frame()
    }

    /// Master clock edges since reset.
    #[must_use]
    pub fn master_clock(&self) -> u64 {
        self.master_clock
    }

    /// CPU register snapshot.
    #[must_use]
    pub fn cpu_view(&self) -> CpuView {
        CpuView {
            a: self.cpu.a,
            x: self.cpu.x,
            y: self.cpu.y,
            sp: self.cpu.sp,
            pc: self.cpu.pc,
            p: self.cpu.status.bits(),
            cycles: self.cpu.cycles,
        }
    }

    /// PPU beam position as (scanline, dot).
    #[must_use]
    pub fn ppu_position(&self) -> (i16, u16) {
        (self.bus.ppu.scanline(), self.bus.ppu.dot())
    }

    /// Side-effect-free CPU-space read.
    #[must_use]
    pub fn peek_cpu(&self, addr: u16) -> u8 {
        self.bus.peek(addr)
    }

    /// Side-effect-free PPU-space read.
    #[must_use]
    pub fn peek_ppu(&self, addr: u16) -> u8 {
        self.bus.peek_ppu(addr)
    }

    /// Disassemble the instruction at `pc` without disturbing the machine.
    #[must_use]
    pub fn disassemble_at(&self, pc: u16) -> String {
        let mut bus = PeekBus(&self.bus);
        let opcode = bus.read(pc);
        trace::disassemble(&self.cpu, &mut bus, pc, &OPCODE_TABLE[opcode as usize])
    }

    /// One nestest-format trace line for the instruction at the current PC.
    #[must_use]
    pub fn trace_line(&self) -> String {
        let mut bus = PeekBus(&self.bus);
        trace::TraceEntry::capture(&self.cpu, &mut bus).format()
    }

    /// Direct CPU access for test harnesses that need to pin registers
    /// (the nestest automation entry point sets PC=$C000 by hand).
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Shared CPU access.
    #[must_use]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Whether the CPU currently has interrupts disabled (debug helper).
    #[must_use]
    pub fn interrupts_disabled(&self) -> bool {
        self.cpu.status.contains(Status::I)
    }

    /// Bus access for debug tooling.
    #[must_use]
    pub fn bus(&self) -> &MainBus {
        &self.bus
    }

    /// Mutable bus access for debug tooling and test harnesses.
    pub fn bus_mut(&mut self) -> &mut MainBus {
        &mut self.bus
    }
}

/// Bus adapter that routes reads through the side-effect-free peek path,
/// so tracing never perturbs PPU latches.
struct PeekBus<'a>(&'a MainBus);

impl Bus for PeekBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        self.0.peek(addr)
    }

    fn write(&mut self, _addr: u16, _value: u8) {}
}
