//! Decoded opcode table.
//!
//! All 256 opcode slots are populated: the 151 official encodings, the
//! stable documented illegals (LAX, SAX, DCP, ISB, SLO, RLA, SRE, RRA and
//! the extra SBC at $EB), the multi-byte NOPs, and the jam/unstable group
//! which executes as a NOP so the machine never halts.

use crate::addressing::AddrMode;

/// Instruction operation, dispatched by `match` during execution.
/// Variant names are the 6502 mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Op {
    // Official operations
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
    // Stable documented illegals
    Lax, Sax, Dcp, Isb, Slo, Rla, Sre, Rra,
    /// Halt opcodes and the unstable illegals: executed as a NOP and
    /// reported through the log channel.
    Jam,
}

/// One decoded opcode table entry.
#[derive(Debug, Clone, Copy)]
pub struct Instr {
    /// Three-letter mnemonic for disassembly.
    pub mnemonic: &'static str,
    /// Operation to execute.
    pub op: Op,
    /// Addressing mode.
    pub mode: AddrMode,
    /// Base cycle count.
    pub cycles: u8,
    /// Whether crossing a page during address resolution adds one cycle.
    /// Branches handle their own taken/page penalties.
    pub page_penalty: bool,
    /// Unofficial encoding (drawn with a `*` prefix in traces).
    pub unofficial: bool,
}

const fn of(mnemonic: &'static str, op: Op, mode: AddrMode, cycles: u8) -> Instr {
    Instr { mnemonic, op, mode, cycles, page_penalty: false, unofficial: false }
}

const fn ofp(mnemonic: &'static str, op: Op, mode: AddrMode, cycles: u8) -> Instr {
    Instr { mnemonic, op, mode, cycles, page_penalty: true, unofficial: false }
}

const fn un(mnemonic: &'static str, op: Op, mode: AddrMode, cycles: u8) -> Instr {
    Instr { mnemonic, op, mode, cycles, page_penalty: false, unofficial: true }
}

const fn unp(mnemonic: &'static str, op: Op, mode: AddrMode, cycles: u8) -> Instr {
    Instr { mnemonic, op, mode, cycles, page_penalty: true, unofficial: true }
}

use AddrMode::{Abs, Abx, Aby, Acc, Imm, Imp, Ind, Izx, Izy, Rel, Zp0, Zpx, Zpy};

/// The 256-entry decode table, indexed by opcode byte.
#[rustfmt::skip]
pub static OPCODE_TABLE: [Instr; 256] = [
    // 0x00
    of("BRK", Op::Brk, Imp, 7),  of("ORA", Op::Ora, Izx, 6),  un("JAM", Op::Jam, Imp, 2),  un("SLO", Op::Slo, Izx, 8),
    un("NOP", Op::Nop, Zp0, 3),  of("ORA", Op::Ora, Zp0, 3),  of("ASL", Op::Asl, Zp0, 5),  un("SLO", Op::Slo, Zp0, 5),
    of("PHP", Op::Php, Imp, 3),  of("ORA", Op::Ora, Imm, 2),  of("ASL", Op::Asl, Acc, 2),  un("NOP", Op::Jam, Imm, 2),
    un("NOP", Op::Nop, Abs, 4),  of("ORA", Op::Ora, Abs, 4),  of("ASL", Op::Asl, Abs, 6),  un("SLO", Op::Slo, Abs, 6),
    // 0x10
    of("BPL", Op::Bpl, Rel, 2),  ofp("ORA", Op::Ora, Izy, 5), un("JAM", Op::Jam, Imp, 2),  un("SLO", Op::Slo, Izy, 8),
    un("NOP", Op::Nop, Zpx, 4),  of("ORA", Op::Ora, Zpx, 4),  of("ASL", Op::Asl, Zpx, 6),  un("SLO", Op::Slo, Zpx, 6),
    of("CLC", Op::Clc, Imp, 2),  ofp("ORA", Op::Ora, Aby, 4), un("NOP", Op::Nop, Imp, 2),  un("SLO", Op::Slo, Aby, 7),
    unp("NOP", Op::Nop, Abx, 4), ofp("ORA", Op::Ora, Abx, 4), of("ASL", Op::Asl, Abx, 7),  un("SLO", Op::Slo, Abx, 7),
    // 0x20
    of("JSR", Op::Jsr, Abs, 6),  of("AND", Op::And, Izx, 6),  un("JAM", Op::Jam, Imp, 2),  un("RLA", Op::Rla, Izx, 8),
    of("BIT", Op::Bit, Zp0, 3),  of("AND", Op::And, Zp0, 3),  of("ROL", Op::Rol, Zp0, 5),  un("RLA", Op::Rla, Zp0, 5),
    of("PLP", Op::Plp, Imp, 4),  of("AND", Op::And, Imm, 2),  of("ROL", Op::Rol, Acc, 2),  un("NOP", Op::Jam, Imm, 2),
    of("BIT", Op::Bit, Abs, 4),  of("AND", Op::And, Abs, 4),  of("ROL", Op::Rol, Abs, 6),  un("RLA", Op::Rla, Abs, 6),
    // 0x30
    of("BMI", Op::Bmi, Rel, 2),  ofp("AND", Op::And, Izy, 5), un("JAM", Op::Jam, Imp, 2),  un("RLA", Op::Rla, Izy, 8),
    un("NOP", Op::Nop, Zpx, 4),  of("AND", Op::And, Zpx, 4),  of("ROL", Op::Rol, Zpx, 6),  un("RLA", Op::Rla, Zpx, 6),
    of("SEC", Op::Sec, Imp, 2),  ofp("AND", Op::And, Aby, 4), un("NOP", Op::Nop, Imp, 2),  un("RLA", Op::Rla, Aby, 7),
    unp("NOP", Op::Nop, Abx, 4), ofp("AND", Op::And, Abx, 4), of("ROL", Op::Rol, Abx, 7),  un("RLA", Op::Rla, Abx, 7),
    // 0x40
    of("RTI", Op::Rti, Imp, 6),  of("EOR", Op::Eor, Izx, 6),  un("JAM", Op::Jam, Imp, 2),  un("SRE", Op::Sre, Izx, 8),
    un("NOP", Op::Nop, Zp0, 3),  of("EOR", Op::Eor, Zp0, 3),  of("LSR", Op::Lsr, Zp0, 5),  un("SRE", Op::Sre, Zp0, 5),
    of("PHA", Op::Pha, Imp, 3),  of("EOR", Op::Eor, Imm, 2),  of("LSR", Op::Lsr, Acc, 2),  un("NOP", Op::Jam, Imm, 2),
    of("JMP", Op::Jmp, Abs, 3),  of("EOR", Op::Eor, Abs, 4),  of("LSR", Op::Lsr, Abs, 6),  un("SRE", Op::Sre, Abs, 6),
    // 0x50
    of("BVC", Op::Bvc, Rel, 2),  ofp("EOR", Op::Eor, Izy, 5), un("JAM", Op::Jam, Imp, 2),  un("SRE", Op::Sre, Izy, 8),
    un("NOP", Op::Nop, Zpx, 4),  of("EOR", Op::Eor, Zpx, 4),  of("LSR", Op::Lsr, Zpx, 6),  un("SRE", Op::Sre, Zpx, 6),
    of("CLI", Op::Cli, Imp, 2),  ofp("EOR", Op::Eor, Aby, 4), un("NOP", Op::Nop, Imp, 2),  un("SRE", Op::Sre, Aby, 7),
    unp("NOP", Op::Nop, Abx, 4), ofp("EOR", Op::Eor, Abx, 4), of("LSR", Op::Lsr, Abx, 7),  un("SRE", Op::Sre, Abx, 7),
    // 0x60
    of("RTS", Op::Rts, Imp, 6),  of("ADC", Op::Adc, Izx, 6),  un("JAM", Op::Jam, Imp, 2),  un("RRA", Op::Rra, Izx, 8),
    un("NOP", Op::Nop, Zp0, 3),  of("ADC", Op::Adc, Zp0, 3),  of("ROR", Op::Ror, Zp0, 5),  un("RRA", Op::Rra, Zp0, 5),
    of("PLA", Op::Pla, Imp, 4),  of("ADC", Op::Adc, Imm, 2),  of("ROR", Op::Ror, Acc, 2),  un("NOP", Op::Jam, Imm, 2),
    of("JMP", Op::Jmp, Ind, 5),  of("ADC", Op::Adc, Abs, 4),  of("ROR", Op::Ror, Abs, 6),  un("RRA", Op::Rra, Abs, 6),
    // 0x70
    of("BVS", Op::Bvs, Rel, 2),  ofp("ADC", Op::Adc, Izy, 5), un("JAM", Op::Jam, Imp, 2),  un("RRA", Op::Rra, Izy, 8),
    un("NOP", Op::Nop, Zpx, 4),  of("ADC", Op::Adc, Zpx, 4),  of("ROR", Op::Ror, Zpx, 6),  un("RRA", Op::Rra, Zpx, 6),
    of("SEI", Op::Sei, Imp, 2),  ofp("ADC", Op::Adc, Aby, 4), un("NOP", Op::Nop, Imp, 2),  un("RRA", Op::Rra, Aby, 7),
    unp("NOP", Op::Nop, Abx, 4), ofp("ADC", Op::Adc, Abx, 4), of("ROR", Op::Ror, Abx, 7),  un("RRA", Op::Rra, Abx, 7),
    // 0x80
    un("NOP", Op::Nop, Imm, 2),  of("STA", Op::Sta, Izx, 6),  un("NOP", Op::Nop, Imm, 2),  un("SAX", Op::Sax, Izx, 6),
    of("STY", Op::Sty, Zp0, 3),  of("STA", Op::Sta, Zp0, 3),  of("STX", Op::Stx, Zp0, 3),  un("SAX", Op::Sax, Zp0, 3),
    of("DEY", Op::Dey, Imp, 2),  un("NOP", Op::Nop, Imm, 2),  of("TXA", Op::Txa, Imp, 2),  un("NOP", Op::Jam, Imm, 2),
    of("STY", Op::Sty, Abs, 4),  of("STA", Op::Sta, Abs, 4),  of("STX", Op::Stx, Abs, 4),  un("SAX", Op::Sax, Abs, 4),
    // 0x90
    of("BCC", Op::Bcc, Rel, 2),  of("STA", Op::Sta, Izy, 6),  un("JAM", Op::Jam, Imp, 2),  un("NOP", Op::Jam, Izy, 6),
    of("STY", Op::Sty, Zpx, 4),  of("STA", Op::Sta, Zpx, 4),  of("STX", Op::Stx, Zpy, 4),  un("SAX", Op::Sax, Zpy, 4),
    of("TYA", Op::Tya, Imp, 2),  of("STA", Op::Sta, Aby, 5),  of("TXS", Op::Txs, Imp, 2),  un("NOP", Op::Jam, Aby, 5),
    un("NOP", Op::Jam, Abx, 5),  of("STA", Op::Sta, Abx, 5),  un("NOP", Op::Jam, Aby, 5),  un("NOP", Op::Jam, Aby, 5),
    // 0xA0
    of("LDY", Op::Ldy, Imm, 2),  of("LDA", Op::Lda, Izx, 6),  of("LDX", Op::Ldx, Imm, 2),  un("LAX", Op::Lax, Izx, 6),
    of("LDY", Op::Ldy, Zp0, 3),  of("LDA", Op::Lda, Zp0, 3),  of("LDX", Op::Ldx, Zp0, 3),  un("LAX", Op::Lax, Zp0, 3),
    of("TAY", Op::Tay, Imp, 2),  of("LDA", Op::Lda, Imm, 2),  of("TAX", Op::Tax, Imp, 2),  un("NOP", Op::Jam, Imm, 2),
    of("LDY", Op::Ldy, Abs, 4),  of("LDA", Op::Lda, Abs, 4),  of("LDX", Op::Ldx, Abs, 4),  un("LAX", Op::Lax, Abs, 4),
    // 0xB0
    of("BCS", Op::Bcs, Rel, 2),  ofp("LDA", Op::Lda, Izy, 5), un("JAM", Op::Jam, Imp, 2),  unp("LAX", Op::Lax, Izy, 5),
    of("LDY", Op::Ldy, Zpx, 4),  of("LDA", Op::Lda, Zpx, 4),  of("LDX", Op::Ldx, Zpy, 4),  un("LAX", Op::Lax, Zpy, 4),
    of("CLV", Op::Clv, Imp, 2),  ofp("LDA", Op::Lda, Aby, 4), of("TSX", Op::Tsx, Imp, 2),  unp("NOP", Op::Jam, Aby, 4),
    ofp("LDY", Op::Ldy, Abx, 4), ofp("LDA", Op::Lda, Abx, 4), ofp("LDX", Op::Ldx, Aby, 4), unp("LAX", Op::Lax, Aby, 4),
    // 0xC0
    of("CPY", Op::Cpy, Imm, 2),  of("CMP", Op::Cmp, Izx, 6),  un("NOP", Op::Nop, Imm, 2),  un("DCP", Op::Dcp, Izx, 8),
    of("CPY", Op::Cpy, Zp0, 3),  of("CMP", Op::Cmp, Zp0, 3),  of("DEC", Op::Dec, Zp0, 5),  un("DCP", Op::Dcp, Zp0, 5),
    of("INY", Op::Iny, Imp, 2),  of("CMP", Op::Cmp, Imm, 2),  of("DEX", Op::Dex, Imp, 2),  un("NOP", Op::Jam, Imm, 2),
    of("CPY", Op::Cpy, Abs, 4),  of("CMP", Op::Cmp, Abs, 4),  of("DEC", Op::Dec, Abs, 6),  un("DCP", Op::Dcp, Abs, 6),
    // 0xD0
    of("BNE", Op::Bne, Rel, 2),  ofp("CMP", Op::Cmp, Izy, 5), un("JAM", Op::Jam, Imp, 2),  un("DCP", Op::Dcp, Izy, 8),
    un("NOP", Op::Nop, Zpx, 4),  of("CMP", Op::Cmp, Zpx, 4),  of("DEC", Op::Dec, Zpx, 6),  un("DCP", Op::Dcp, Zpx, 6),
    of("CLD", Op::Cld, Imp, 2),  ofp("CMP", Op::Cmp, Aby, 4), un("NOP", Op::Nop, Imp, 2),  un("DCP", Op::Dcp, Aby, 7),
    unp("NOP", Op::Nop, Abx, 4), ofp("CMP", Op::Cmp, Abx, 4), of("DEC", Op::Dec, Abx, 7),  un("DCP", Op::Dcp, Abx, 7),
    // 0xE0
    of("CPX", Op::Cpx, Imm, 2),  of("SBC", Op::Sbc, Izx, 6),  un("NOP", Op::Nop, Imm, 2),  un("ISB", Op::Isb, Izx, 8),
    of("CPX", Op::Cpx, Zp0, 3),  of("SBC", Op::Sbc, Zp0, 3),  of("INC", Op::Inc, Zp0, 5),  un("ISB", Op::Isb, Zp0, 5),
    of("INX", Op::Inx, Imp, 2),  of("SBC", Op::Sbc, Imm, 2),  of("NOP", Op::Nop, Imp, 2),  un("SBC", Op::Sbc, Imm, 2),
    of("CPX", Op::Cpx, Abs, 4),  of("SBC", Op::Sbc, Abs, 4),  of("INC", Op::Inc, Abs, 6),  un("ISB", Op::Isb, Abs, 6),
    // 0xF0
    of("BEQ", Op::Beq, Rel, 2),  ofp("SBC", Op::Sbc, Izy, 5), un("JAM", Op::Jam, Imp, 2),  un("ISB", Op::Isb, Izy, 8),
    un("NOP", Op::Nop, Zpx, 4),  of("SBC", Op::Sbc, Zpx, 4),  of("INC", Op::Inc, Zpx, 6),  un("ISB", Op::Isb, Zpx, 6),
    of("SED", Op::Sed, Imp, 2),  ofp("SBC", Op::Sbc, Aby, 4), un("NOP", Op::Nop, Imp, 2),  un("ISB", Op::Isb, Aby, 7),
    unp("NOP", Op::Nop, Abx, 4), ofp("SBC", Op::Sbc, Abx, 4), of("INC", Op::Inc, Abx, 7),  un("ISB", Op::Isb, Abx, 7),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn official_landmarks() {
        assert_eq!(OPCODE_TABLE[0x00].mnemonic, "BRK");
        assert_eq!(OPCODE_TABLE[0x00].cycles, 7);
        assert_eq!(OPCODE_TABLE[0x4C].op, Op::Jmp);
        assert_eq!(OPCODE_TABLE[0x4C].cycles, 3);
        assert_eq!(OPCODE_TABLE[0x6C].mode, AddrMode::Ind);
        assert_eq!(OPCODE_TABLE[0x6C].cycles, 5);
        assert_eq!(OPCODE_TABLE[0xA9].op, Op::Lda);
        assert_eq!(OPCODE_TABLE[0xEA].op, Op::Nop);
        assert!(!OPCODE_TABLE[0xEA].unofficial);
    }

    #[test]
    fn page_penalty_only_on_read_indexing() {
        // Loads pay the crossing penalty...
        assert!(OPCODE_TABLE[0xBD].page_penalty); // LDA abs,X
        assert!(OPCODE_TABLE[0xB1].page_penalty); // LDA (zp),Y
        // ...stores and read-modify-writes never do.
        assert!(!OPCODE_TABLE[0x9D].page_penalty); // STA abs,X
        assert!(!OPCODE_TABLE[0xFE].page_penalty); // INC abs,X
        assert_eq!(OPCODE_TABLE[0x9D].cycles, 5);
        assert_eq!(OPCODE_TABLE[0xFE].cycles, 7);
    }

    #[test]
    fn stable_illegals_are_wired() {
        assert_eq!(OPCODE_TABLE[0xA3].op, Op::Lax);
        assert_eq!(OPCODE_TABLE[0x87].op, Op::Sax);
        assert_eq!(OPCODE_TABLE[0xC3].op, Op::Dcp);
        assert_eq!(OPCODE_TABLE[0xE3].op, Op::Isb);
        assert_eq!(OPCODE_TABLE[0xEB].op, Op::Sbc);
        assert!(OPCODE_TABLE[0xEB].unofficial);
    }

    #[test]
    fn every_slot_is_populated() {
        for (byte, instr) in OPCODE_TABLE.iter().enumerate() {
            assert!(
                instr.cycles >= 2,
                "opcode {byte:#04X} has implausible cycle count {}",
                instr.cycles
            );
            assert_eq!(instr.mnemonic.len(), 3, "opcode {byte:#04X}");
        }
    }
}
