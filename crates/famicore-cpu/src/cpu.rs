//! 6502 interpreter core.
//!
//! The CPU runs on a remaining-cycles model: each call to [`Cpu::clock`]
//! either begins a new instruction (performing all of its bus traffic and
//! charging its full cycle cost up front) or burns one cycle of the current
//! instruction. The return value marks instruction boundaries, which is
//! where pending interrupts are taken.

use crate::addressing::AddrMode;
use crate::opcodes::{Instr, Op, OPCODE_TABLE};
use crate::status::Status;
use crate::vectors;

/// Memory bus seen by the CPU.
///
/// Reads take `&mut self` because real NES reads have side effects
/// (PPU register reads clear latches and advance addresses).
pub trait Bus {
    /// Read one byte.
    fn read(&mut self, addr: u16) -> u8;

    /// Write one byte.
    fn write(&mut self, addr: u16, value: u8);

    /// Read a little-endian word.
    fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }
}

/// NES 2A03 CPU core (6502 without BCD).
#[derive(Debug)]
pub struct Cpu {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer into page $0100-$01FF, growing downward.
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
    /// Status flags.
    pub status: Status,
    /// Total cycles retired since power-on or reset.
    pub cycles: u64,
    /// Cycles remaining in the instruction in flight.
    cycles_left: u8,
    /// Edge-triggered NMI request, consumed at the next boundary.
    nmi_pending: bool,
    /// Level-triggered IRQ line, sampled at each boundary and gated on I.
    irq_line: bool,
}

impl Cpu {
    /// Power-on state: A=X=Y=0, SP=$FD, P=$34, PC not yet loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: Status::POWER_ON,
            cycles: 0,
            cycles_left: 0,
            nmi_pending: false,
            irq_line: false,
        }
    }

    /// RESET sequence: load PC from $FFFC/$FFFD, set I, land SP at $FD.
    /// Nothing is pushed; the sequence costs 8 cycles. Deterministic, so
    /// applying it twice equals applying it once.
    pub fn reset(&mut self, bus: &mut impl Bus) {
        self.sp = 0xFD;
        self.status.insert(Status::I);
        self.pc = bus.read_u16(vectors::RESET);
        self.cycles = 0;
        self.cycles_left = 8;
        self.nmi_pending = false;
        self.irq_line = false;
    }

    /// Advance one CPU cycle. Returns `true` at an instruction boundary.
    pub fn clock(&mut self, bus: &mut impl Bus) -> bool {
        if self.cycles_left == 0 {
            self.begin_instruction(bus);
        }
        self.cycles_left -= 1;
        self.cycles += 1;
        self.cycles_left == 0
    }

    /// Run to the next instruction boundary, returning the cycles spent.
    /// If an instruction is partially elapsed, only its remainder is run.
    pub fn step(&mut self, bus: &mut impl Bus) -> u8 {
        let mut spent = 0;
        loop {
            spent += 1;
            if self.clock(bus) {
                return spent;
            }
        }
    }

    /// Request an NMI. Edge-triggered: latched until the next boundary.
    pub fn signal_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Drive the IRQ line. Level-triggered and masked by the I flag.
    pub fn set_irq(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }

    /// Whether an instruction is currently in flight.
    #[must_use]
    pub fn mid_instruction(&self) -> bool {
        self.cycles_left != 0
    }

    /// Decode, execute and charge one full instruction (or interrupt).
    fn begin_instruction(&mut self, bus: &mut impl Bus) {
        // NMI beats IRQ; both are taken between instructions only.
        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt(bus, vectors::NMI);
            return;
        }
        if self.irq_line && !self.status.contains(Status::I) {
            self.interrupt(bus, vectors::IRQ);
            return;
        }

        let opcode_pc = self.pc;
        let opcode = bus.read(opcode_pc);
        self.pc = self.pc.wrapping_add(1);

        let instr = &OPCODE_TABLE[opcode as usize];
        if instr.op == Op::Jam {
            log::warn!("illegal opcode ${opcode:02X} at ${opcode_pc:04X}, executing as NOP");
        }

        let (addr, crossed) = self.resolve(instr.mode, bus);
        let branch_extra = self.execute(instr, addr, crossed, bus);
        let cross_extra = u8::from(crossed && instr.page_penalty);
        self.cycles_left = instr.cycles + cross_extra + branch_extra;
    }

    /// Hardware interrupt entry (NMI or IRQ): push PC and status with B=0,
    /// set I, load the vector. 7 cycles.
    fn interrupt(&mut self, bus: &mut impl Bus, vector: u16) {
        self.push_u16(bus, self.pc);
        self.push(bus, self.status.to_stack_byte(false));
        self.status.insert(Status::I);
        self.pc = bus.read_u16(vector);
        self.cycles_left = 7;
    }

    /// Resolve the effective address for `mode`, advancing PC over the
    /// operand. Returns the address (0 for Imp/Acc, which never use it;
    /// the branch target for Rel) and whether a page boundary was crossed.
    fn resolve(&mut self, mode: AddrMode, bus: &mut impl Bus) -> (u16, bool) {
        match mode {
            AddrMode::Imp | AddrMode::Acc => (0, false),

            AddrMode::Imm => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }

            AddrMode::Zp0 => {
                let addr = u16::from(bus.read(self.pc));
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }

            AddrMode::Zpx => {
                let base = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                (u16::from(base.wrapping_add(self.x)), false)
            }

            AddrMode::Zpy => {
                let base = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                (u16::from(base.wrapping_add(self.y)), false)
            }

            AddrMode::Rel => {
                let offset = bus.read(self.pc) as i8;
                self.pc = self.pc.wrapping_add(1);
                let target = self.pc.wrapping_add(offset as u16);
                (target, (self.pc & 0xFF00) != (target & 0xFF00))
            }

            AddrMode::Abs => (self.fetch_u16(bus), false),

            AddrMode::Abx => {
                let base = self.fetch_u16(bus);
                let addr = base.wrapping_add(u16::from(self.x));
                (addr, (base & 0xFF00) != (addr & 0xFF00))
            }

            AddrMode::Aby => {
                let base = self.fetch_u16(bus);
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, (base & 0xFF00) != (addr & 0xFF00))
            }

            AddrMode::Ind => {
                let ptr = self.fetch_u16(bus);
                let lo = bus.read(ptr);
                // Hardware bug: a pointer ending in $FF fetches its high
                // byte from $xx00 of the same page, not the next one.
                let hi_addr = if ptr & 0x00FF == 0x00FF {
                    ptr & 0xFF00
                } else {
                    ptr.wrapping_add(1)
                };
                let hi = bus.read(hi_addr);
                (u16::from_le_bytes([lo, hi]), false)
            }

            AddrMode::Izx => {
                let zp = bus.read(self.pc).wrapping_add(self.x);
                self.pc = self.pc.wrapping_add(1);
                let lo = bus.read(u16::from(zp));
                let hi = bus.read(u16::from(zp.wrapping_add(1)));
                (u16::from_le_bytes([lo, hi]), false)
            }

            AddrMode::Izy => {
                let zp = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let lo = bus.read(u16::from(zp));
                let hi = bus.read(u16::from(zp.wrapping_add(1)));
                let base = u16::from_le_bytes([lo, hi]);
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, (base & 0xFF00) != (addr & 0xFF00))
            }
        }
    }

    fn fetch_u16(&mut self, bus: &mut impl Bus) -> u16 {
        let value = bus.read_u16(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    /// Read the operand value (A for accumulator mode, memory otherwise).
    fn read_value(&mut self, mode: AddrMode, addr: u16, bus: &mut impl Bus) -> u8 {
        if mode == AddrMode::Acc {
            self.a
        } else {
            bus.read(addr)
        }
    }

    /// Write a shift/rotate result back to A or memory.
    fn write_value(&mut self, mode: AddrMode, addr: u16, value: u8, bus: &mut impl Bus) {
        if mode == AddrMode::Acc {
            self.a = value;
        } else {
            bus.write(addr, value);
        }
    }

    /// Execute one operation. Returns extra cycles (branches only).
    #[allow(clippy::too_many_lines)]
    fn execute(&mut self, instr: &Instr, addr: u16, crossed: bool, bus: &mut impl Bus) -> u8 {
        let mode = instr.mode;
        match instr.op {
            // Loads
            Op::Lda => {
                self.a = bus.read(addr);
                self.status.set_zn(self.a);
            }
            Op::Ldx => {
                self.x = bus.read(addr);
                self.status.set_zn(self.x);
            }
            Op::Ldy => {
                self.y = bus.read(addr);
                self.status.set_zn(self.y);
            }

            // Stores
            Op::Sta => bus.write(addr, self.a),
            Op::Stx => bus.write(addr, self.x),
            Op::Sty => bus.write(addr, self.y),

            // Arithmetic
            Op::Adc => {
                let value = bus.read(addr);
                self.adc(value);
            }
            Op::Sbc => {
                let value = bus.read(addr);
                self.adc(!value);
            }
            Op::Cmp => {
                let value = bus.read(addr);
                self.compare(self.a, value);
            }
            Op::Cpx => {
                let value = bus.read(addr);
                self.compare(self.x, value);
            }
            Op::Cpy => {
                let value = bus.read(addr);
                self.compare(self.y, value);
            }

            // Logic
            Op::And => {
                self.a &= bus.read(addr);
                self.status.set_zn(self.a);
            }
            Op::Ora => {
                self.a |= bus.read(addr);
                self.status.set_zn(self.a);
            }
            Op::Eor => {
                self.a ^= bus.read(addr);
                self.status.set_zn(self.a);
            }
            Op::Bit => {
                let value = bus.read(addr);
                self.status.set(Status::Z, self.a & value == 0);
                self.status.set(Status::V, value & 0x40 != 0);
                self.status.set(Status::N, value & 0x80 != 0);
            }

            // Shifts and rotates (A or read-modify-write through memory)
            Op::Asl => {
                let value = self.read_value(mode, addr, bus);
                let result = value << 1;
                self.status.set(Status::C, value & 0x80 != 0);
                self.status.set_zn(result);
                self.write_value(mode, addr, result, bus);
            }
            Op::Lsr => {
                let value = self.read_value(mode, addr, bus);
                let result = value >> 1;
                self.status.set(Status::C, value & 0x01 != 0);
                self.status.set_zn(result);
                self.write_value(mode, addr, result, bus);
            }
            Op::Rol => {
                let value = self.read_value(mode, addr, bus);
                let result = (value << 1) | u8::from(self.status.contains(Status::C));
                self.status.set(Status::C, value & 0x80 != 0);
                self.status.set_zn(result);
                self.write_value(mode, addr, result, bus);
            }
            Op::Ror => {
                let value = self.read_value(mode, addr, bus);
                let result = (value >> 1) | (u8::from(self.status.contains(Status::C)) << 7);
                self.status.set(Status::C, value & 0x01 != 0);
                self.status.set_zn(result);
                self.write_value(mode, addr, result, bus);
            }

            // Memory increment/decrement
            Op::Inc => {
                let result = bus.read(addr).wrapping_add(1);
                self.status.set_zn(result);
                bus.write(addr, result);
            }
            Op::Dec => {
                let result = bus.read(addr).wrapping_sub(1);
                self.status.set_zn(result);
                bus.write(addr, result);
            }

            // Register increment/decrement
            Op::Inx => {
                self.x = self.x.wrapping_add(1);
                self.status.set_zn(self.x);
            }
            Op::Iny => {
                self.y = self.y.wrapping_add(1);
                self.status.set_zn(self.y);
            }
            Op::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.status.set_zn(self.x);
            }
            Op::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.status.set_zn(self.y);
            }

            // Transfers
            Op::Tax => {
                self.x = self.a;
                self.status.set_zn(self.x);
            }
            Op::Tay => {
                self.y = self.a;
                self.status.set_zn(self.y);
            }
            Op::Txa => {
                self.a = self.x;
                self.status.set_zn(self.a);
            }
            Op::Tya => {
                self.a = self.y;
                self.status.set_zn(self.a);
            }
            Op::Tsx => {
                self.x = self.sp;
                self.status.set_zn(self.x);
            }
            Op::Txs => self.sp = self.x,

            // Flag operations
            Op::Clc => self.status.remove(Status::C),
            Op::Sec => self.status.insert(Status::C),
            Op::Cli => self.status.remove(Status::I),
            Op::Sei => self.status.insert(Status::I),
            Op::Clv => self.status.remove(Status::V),
            Op::Cld => self.status.remove(Status::D),
            Op::Sed => self.status.insert(Status::D),

            // Stack
            Op::Pha => self.push(bus, self.a),
            Op::Php => {
                let byte = self.status.to_stack_byte(true);
                self.push(bus, byte);
            }
            Op::Pla => {
                self.a = self.pull(bus);
                self.status.set_zn(self.a);
            }
            Op::Plp => {
                let byte = self.pull(bus);
                self.status = Status::from_stack_byte(byte);
            }

            // Jumps and returns
            Op::Jmp => self.pc = addr,
            Op::Jsr => {
                self.push_u16(bus, self.pc.wrapping_sub(1));
                self.pc = addr;
            }
            Op::Rts => {
                self.pc = self.pull_u16(bus).wrapping_add(1);
            }
            Op::Rti => {
                let byte = self.pull(bus);
                self.status = Status::from_stack_byte(byte);
                self.pc = self.pull_u16(bus);
            }
            Op::Brk => {
                // The byte after BRK is a signature byte the sequence skips.
                self.pc = self.pc.wrapping_add(1);
                self.push_u16(bus, self.pc);
                self.push(bus, self.status.to_stack_byte(true));
                self.status.insert(Status::I);
                self.pc = bus.read_u16(vectors::IRQ);
            }

            // Branches: +1 cycle when taken, +2 when taken across a page
            Op::Bcc => return self.branch(!self.status.contains(Status::C), addr, crossed),
            Op::Bcs => return self.branch(self.status.contains(Status::C), addr, crossed),
            Op::Bne => return self.branch(!self.status.contains(Status::Z), addr, crossed),
            Op::Beq => return self.branch(self.status.contains(Status::Z), addr, crossed),
            Op::Bpl => return self.branch(!self.status.contains(Status::N), addr, crossed),
            Op::Bmi => return self.branch(self.status.contains(Status::N), addr, crossed),
            Op::Bvc => return self.branch(!self.status.contains(Status::V), addr, crossed),
            Op::Bvs => return self.branch(self.status.contains(Status::V), addr, crossed),

            // Stable illegals
            Op::Lax => {
                let value = bus.read(addr);
                self.a = value;
                self.x = value;
                self.status.set_zn(value);
            }
            Op::Sax => bus.write(addr, self.a & self.x),
            Op::Dcp => {
                let result = bus.read(addr).wrapping_sub(1);
                bus.write(addr, result);
                self.compare(self.a, result);
            }
            Op::Isb => {
                let result = bus.read(addr).wrapping_add(1);
                bus.write(addr, result);
                self.adc(!result);
            }
            Op::Slo => {
                let value = bus.read(addr);
                let result = value << 1;
                self.status.set(Status::C, value & 0x80 != 0);
                bus.write(addr, result);
                self.a |= result;
                self.status.set_zn(self.a);
            }
            Op::Rla => {
                let value = bus.read(addr);
                let result = (value << 1) | u8::from(self.status.contains(Status::C));
                self.status.set(Status::C, value & 0x80 != 0);
                bus.write(addr, result);
                self.a &= result;
                self.status.set_zn(self.a);
            }
            Op::Sre => {
                let value = bus.read(addr);
                let result = value >> 1;
                self.status.set(Status::C, value & 0x01 != 0);
                bus.write(addr, result);
                self.a ^= result;
                self.status.set_zn(self.a);
            }
            Op::Rra => {
                let value = bus.read(addr);
                let result = (value >> 1) | (u8::from(self.status.contains(Status::C)) << 7);
                self.status.set(Status::C, value & 0x01 != 0);
                bus.write(addr, result);
                self.adc(result);
            }

            Op::Nop | Op::Jam => {}
        }
        0
    }

    fn branch(&mut self, condition: bool, target: u16, crossed: bool) -> u8 {
        if condition {
            self.pc = target;
            1 + u8::from(crossed)
        } else {
            0
        }
    }

    /// ADC core, shared by SBC (operand inverted) and RRA/ISB.
    fn adc(&mut self, value: u8) {
        let carry = u16::from(self.status.contains(Status::C));
        let sum = u16::from(self.a) + u16::from(value) + carry;
        let result = sum as u8;

        self.status.set(Status::C, sum > 0xFF);
        self.status
            .set(Status::V, (!(self.a ^ value) & (self.a ^ result) & 0x80) != 0);
        self.a = result;
        self.status.set_zn(result);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.status.set(Status::C, register >= value);
        self.status.set_zn(register.wrapping_sub(value));
    }

    fn push(&mut self, bus: &mut impl Bus, value: u8) {
        bus.write(0x0100 | u16::from(self.sp), value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn push_u16(&mut self, bus: &mut impl Bus, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, (value & 0xFF) as u8);
    }

    fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 | u16::from(self.sp))
    }

    fn pull_u16(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = self.pull(bus);
        let hi = self.pull(bus);
        u16::from_le_bytes([lo, hi])
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
