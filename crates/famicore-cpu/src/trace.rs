//! Execution tracing and disassembly in the nestest.log format.
//!
//! One line per instruction, captured *before* the instruction executes:
//!
//! ```text
//! C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7
//! ```
//!
//! Unofficial opcodes carry a `*` prefix which steals one column from the
//! byte field, keeping the register block aligned with the golden log.

use std::fmt::Write;

use crate::addressing::AddrMode;
use crate::cpu::{Bus, Cpu};
use crate::opcodes::{Instr, OPCODE_TABLE};

/// Snapshot of one instruction about to execute.
#[derive(Debug, Clone)]
pub struct TraceEntry {
    /// Address of the opcode.
    pub pc: u16,
    /// Opcode byte.
    pub opcode: u8,
    /// Operand bytes (0-2).
    pub operands: Vec<u8>,
    /// Disassembled text, `*`-prefixed for unofficial encodings.
    pub disassembly: String,
    /// Register file at capture time.
    pub a: u8,
    /// X register.
    pub x: u8,
    /// Y register.
    pub y: u8,
    /// Status byte.
    pub p: u8,
    /// Stack pointer.
    pub sp: u8,
    /// Retired cycle count.
    pub cycles: u64,
}

impl TraceEntry {
    /// Capture the instruction at the CPU's current PC.
    pub fn capture(cpu: &Cpu, bus: &mut impl Bus) -> Self {
        let pc = cpu.pc;
        let opcode = bus.read(pc);
        let instr = &OPCODE_TABLE[opcode as usize];

        let operands: Vec<u8> = (1..=instr.mode.operand_bytes())
            .map(|i| bus.read(pc.wrapping_add(i)))
            .collect();

        Self {
            pc,
            opcode,
            operands,
            disassembly: disassemble(cpu, bus, pc, instr),
            a: cpu.a,
            x: cpu.x,
            y: cpu.y,
            p: cpu.status.bits(),
            sp: cpu.sp,
            cycles: cpu.cycles,
        }
    }

    /// Render the entry as one nestest.log line.
    #[must_use]
    pub fn format(&self) -> String {
        let mut bytes = String::new();
        write!(bytes, "{:02X}", self.opcode).ok();
        for byte in &self.operands {
            write!(bytes, " {byte:02X}").ok();
        }

        // The `*` prefix shifts the field split by one column.
        let (bytes_width, disasm_width) = if self.disassembly.starts_with('*') {
            (9, 33)
        } else {
            (10, 32)
        };

        format!(
            "{:04X}  {:<bytes_width$}{:<disasm_width$}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc, bytes, self.disassembly, self.a, self.x, self.y, self.p, self.sp, self.cycles,
        )
    }
}

/// Disassemble the instruction at `pc` without disturbing CPU state.
///
/// Memory-operand modes annotate the resolved address and the value there,
/// matching the nestest reference (`LDA $0200 = 42`). Reads go through the
/// caller's bus, so pass a side-effect-free bus when inspecting live
/// hardware registers.
pub fn disassemble(cpu: &Cpu, bus: &mut impl Bus, pc: u16, instr: &Instr) -> String {
    let mnemonic = instr.mnemonic;
    let prefix = if instr.unofficial { "*" } else { "" };

    match instr.mode {
        AddrMode::Imp => format!("{prefix}{mnemonic}"),
        AddrMode::Acc => format!("{prefix}{mnemonic} A"),

        AddrMode::Imm => {
            let value = bus.read(pc.wrapping_add(1));
            format!("{prefix}{mnemonic} #${value:02X}")
        }

        AddrMode::Zp0 => {
            let addr = bus.read(pc.wrapping_add(1));
            let value = bus.read(u16::from(addr));
            format!("{prefix}{mnemonic} ${addr:02X} = {value:02X}")
        }

        AddrMode::Zpx => {
            let base = bus.read(pc.wrapping_add(1));
            let addr = base.wrapping_add(cpu.x);
            let value = bus.read(u16::from(addr));
            format!("{prefix}{mnemonic} ${base:02X},X @ {addr:02X} = {value:02X}")
        }

        AddrMode::Zpy => {
            let base = bus.read(pc.wrapping_add(1));
            let addr = base.wrapping_add(cpu.y);
            let value = bus.read(u16::from(addr));
            format!("{prefix}{mnemonic} ${base:02X},Y @ {addr:02X} = {value:02X}")
        }

        AddrMode::Rel => {
            let offset = bus.read(pc.wrapping_add(1)) as i8;
            let target = pc.wrapping_add(2).wrapping_add(offset as u16);
            format!("{prefix}{mnemonic} ${target:04X}")
        }

        AddrMode::Abs => {
            let addr = read_operand_u16(bus, pc);
            // Jumps show the target only; everything else shows the value.
            if matches!(mnemonic, "JMP" | "JSR") {
                format!("{prefix}{mnemonic} ${addr:04X}")
            } else {
                let value = bus.read(addr);
                format!("{prefix}{mnemonic} ${addr:04X} = {value:02X}")
            }
        }

        AddrMode::Abx => {
            let base = read_operand_u16(bus, pc);
            let addr = base.wrapping_add(u16::from(cpu.x));
            let value = bus.read(addr);
            format!("{prefix}{mnemonic} ${base:04X},X @ {addr:04X} = {value:02X}")
        }

        AddrMode::Aby => {
            let base = read_operand_u16(bus, pc);
            let addr = base.wrapping_add(u16::from(cpu.y));
            let value = bus.read(addr);
            format!("{prefix}{mnemonic} ${base:04X},Y @ {addr:04X} = {value:02X}")
        }

        AddrMode::Ind => {
            let ptr = read_operand_u16(bus, pc);
            let lo = bus.read(ptr);
            let hi_addr = if ptr & 0x00FF == 0x00FF {
                ptr & 0xFF00
            } else {
                ptr.wrapping_add(1)
            };
            let hi = bus.read(hi_addr);
            let target = u16::from_le_bytes([lo, hi]);
            format!("{prefix}{mnemonic} (${ptr:04X}) = {target:04X}")
        }

        AddrMode::Izx => {
            let base = bus.read(pc.wrapping_add(1));
            let zp = base.wrapping_add(cpu.x);
            let lo = bus.read(u16::from(zp));
            let hi = bus.read(u16::from(zp.wrapping_add(1)));
            let addr = u16::from_le_bytes([lo, hi]);
            let value = bus.read(addr);
            format!("{prefix}{mnemonic} (${base:02X},X) @ {zp:02X} = {addr:04X} = {value:02X}")
        }

        AddrMode::Izy => {
            let zp = bus.read(pc.wrapping_add(1));
            let lo = bus.read(u16::from(zp));
            let hi = bus.read(u16::from(zp.wrapping_add(1)));
            let base = u16::from_le_bytes([lo, hi]);
            let addr = base.wrapping_add(u16::from(cpu.y));
            let value = bus.read(addr);
            format!("{prefix}{mnemonic} (${zp:02X}),Y = {base:04X} @ {addr:04X} = {value:02X}")
        }
    }
}

fn read_operand_u16(bus: &mut impl Bus, pc: u16) -> u16 {
    let lo = bus.read(pc.wrapping_add(1));
    let hi = bus.read(pc.wrapping_add(2));
    u16::from_le_bytes([lo, hi])
}

/// Accumulating trace logger.
#[derive(Debug, Default)]
pub struct Tracer {
    lines: Vec<String>,
}

impl Tracer {
    /// Empty tracer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture one line. Call before executing the instruction.
    pub fn trace(&mut self, cpu: &Cpu, bus: &mut impl Bus) {
        self.lines.push(TraceEntry::capture(cpu, bus).format());
    }

    /// Captured lines so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Full log joined with newlines.
    #[must_use]
    pub fn log(&self) -> String {
        self.lines.join("\n")
    }
}
