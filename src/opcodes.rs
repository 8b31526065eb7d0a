//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for instruction decoding, both for the CPU and for the
//! assembler's encoder.
//!
//! The table covers the **151 documented NMOS 6502 opcodes**. The remaining
//! 105 entries are `None`: the processor reports them as undefined
//! instructions instead of executing them.
//!
//! Each opcode entry includes:
//! - Mnemonic (instruction name)
//! - Addressing mode
//! - Base cycle cost (excluding page-crossing and branch penalties)
//! - Instruction size in bytes

use std::fmt;
use std::str::FromStr;

use crate::addressing::AddressingMode;

/// The 56 documented 6502 instruction mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    ADC,
    AND,
    ASL,
    BCC,
    BCS,
    BEQ,
    BIT,
    BMI,
    BNE,
    BPL,
    BRK,
    BVC,
    BVS,
    CLC,
    CLD,
    CLI,
    CLV,
    CMP,
    CPX,
    CPY,
    DEC,
    DEX,
    DEY,
    EOR,
    INC,
    INX,
    INY,
    JMP,
    JSR,
    LDA,
    LDX,
    LDY,
    LSR,
    NOP,
    ORA,
    PHA,
    PHP,
    PLA,
    PLP,
    ROL,
    ROR,
    RTI,
    RTS,
    SBC,
    SEC,
    SED,
    SEI,
    STA,
    STX,
    STY,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
}

impl Mnemonic {
    /// Every mnemonic, alphabetically.
    pub const ALL: [Mnemonic; 56] = [
        Mnemonic::ADC,
        Mnemonic::AND,
        Mnemonic::ASL,
        Mnemonic::BCC,
        Mnemonic::BCS,
        Mnemonic::BEQ,
        Mnemonic::BIT,
        Mnemonic::BMI,
        Mnemonic::BNE,
        Mnemonic::BPL,
        Mnemonic::BRK,
        Mnemonic::BVC,
        Mnemonic::BVS,
        Mnemonic::CLC,
        Mnemonic::CLD,
        Mnemonic::CLI,
        Mnemonic::CLV,
        Mnemonic::CMP,
        Mnemonic::CPX,
        Mnemonic::CPY,
        Mnemonic::DEC,
        Mnemonic::DEX,
        Mnemonic::DEY,
        Mnemonic::EOR,
        Mnemonic::INC,
        Mnemonic::INX,
        Mnemonic::INY,
        Mnemonic::JMP,
        Mnemonic::JSR,
        Mnemonic::LDA,
        Mnemonic::LDX,
        Mnemonic::LDY,
        Mnemonic::LSR,
        Mnemonic::NOP,
        Mnemonic::ORA,
        Mnemonic::PHA,
        Mnemonic::PHP,
        Mnemonic::PLA,
        Mnemonic::PLP,
        Mnemonic::ROL,
        Mnemonic::ROR,
        Mnemonic::RTI,
        Mnemonic::RTS,
        Mnemonic::SBC,
        Mnemonic::SEC,
        Mnemonic::SED,
        Mnemonic::SEI,
        Mnemonic::STA,
        Mnemonic::STX,
        Mnemonic::STY,
        Mnemonic::TAX,
        Mnemonic::TAY,
        Mnemonic::TSX,
        Mnemonic::TXA,
        Mnemonic::TXS,
        Mnemonic::TYA,
    ];

    /// Three-letter upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::ADC => "ADC",
            Mnemonic::AND => "AND",
            Mnemonic::ASL => "ASL",
            Mnemonic::BCC => "BCC",
            Mnemonic::BCS => "BCS",
            Mnemonic::BEQ => "BEQ",
            Mnemonic::BIT => "BIT",
            Mnemonic::BMI => "BMI",
            Mnemonic::BNE => "BNE",
            Mnemonic::BPL => "BPL",
            Mnemonic::BRK => "BRK",
            Mnemonic::BVC => "BVC",
            Mnemonic::BVS => "BVS",
            Mnemonic::CLC => "CLC",
            Mnemonic::CLD => "CLD",
            Mnemonic::CLI => "CLI",
            Mnemonic::CLV => "CLV",
            Mnemonic::CMP => "CMP",
            Mnemonic::CPX => "CPX",
            Mnemonic::CPY => "CPY",
            Mnemonic::DEC => "DEC",
            Mnemonic::DEX => "DEX",
            Mnemonic::DEY => "DEY",
            Mnemonic::EOR => "EOR",
            Mnemonic::INC => "INC",
            Mnemonic::INX => "INX",
            Mnemonic::INY => "INY",
            Mnemonic::JMP => "JMP",
            Mnemonic::JSR => "JSR",
            Mnemonic::LDA => "LDA",
            Mnemonic::LDX => "LDX",
            Mnemonic::LDY => "LDY",
            Mnemonic::LSR => "LSR",
            Mnemonic::NOP => "NOP",
            Mnemonic::ORA => "ORA",
            Mnemonic::PHA => "PHA",
            Mnemonic::PHP => "PHP",
            Mnemonic::PLA => "PLA",
            Mnemonic::PLP => "PLP",
            Mnemonic::ROL => "ROL",
            Mnemonic::ROR => "ROR",
            Mnemonic::RTI => "RTI",
            Mnemonic::RTS => "RTS",
            Mnemonic::SBC => "SBC",
            Mnemonic::SEC => "SEC",
            Mnemonic::SED => "SED",
            Mnemonic::SEI => "SEI",
            Mnemonic::STA => "STA",
            Mnemonic::STX => "STX",
            Mnemonic::STY => "STY",
            Mnemonic::TAX => "TAX",
            Mnemonic::TAY => "TAY",
            Mnemonic::TSX => "TSX",
            Mnemonic::TXA => "TXA",
            Mnemonic::TXS => "TXS",
            Mnemonic::TYA => "TYA",
        }
    }

    /// True for the eight conditional branches.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Mnemonic::BCC
                | Mnemonic::BCS
                | Mnemonic::BEQ
                | Mnemonic::BMI
                | Mnemonic::BNE
                | Mnemonic::BPL
                | Mnemonic::BVC
                | Mnemonic::BVS
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mnemonic {
    type Err = ();

    /// Case-insensitive parse of a mnemonic name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Metadata for a single documented 6502 opcode.
///
/// # Examples
///
/// ```
/// use sim6502::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.mnemonic, Mnemonic::LDA);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
///
/// // 0x02 is not a documented opcode
/// assert!(OPCODE_TABLE[0x02].is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost (before page crossing and branch-taken penalties).
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,
}

use AddressingMode::*;
use Mnemonic::*;

/// (opcode, mnemonic, addressing mode, base cycles) for every documented opcode.
const DOCUMENTED: [(u8, Mnemonic, AddressingMode, u8); 151] = [
    (0x69, ADC, Immediate, 2),
    (0x65, ADC, ZeroPage, 3),
    (0x75, ADC, ZeroPageX, 4),
    (0x6D, ADC, Absolute, 4),
    (0x7D, ADC, AbsoluteX, 4),
    (0x79, ADC, AbsoluteY, 4),
    (0x61, ADC, IndirectX, 6),
    (0x71, ADC, IndirectY, 5),
    (0x29, AND, Immediate, 2),
    (0x25, AND, ZeroPage, 3),
    (0x35, AND, ZeroPageX, 4),
    (0x2D, AND, Absolute, 4),
    (0x3D, AND, AbsoluteX, 4),
    (0x39, AND, AbsoluteY, 4),
    (0x21, AND, IndirectX, 6),
    (0x31, AND, IndirectY, 5),
    (0x0A, ASL, Accumulator, 2),
    (0x06, ASL, ZeroPage, 5),
    (0x16, ASL, ZeroPageX, 6),
    (0x0E, ASL, Absolute, 6),
    (0x1E, ASL, AbsoluteX, 7),
    (0x90, BCC, Relative, 2),
    (0xB0, BCS, Relative, 2),
    (0xF0, BEQ, Relative, 2),
    (0x24, BIT, ZeroPage, 3),
    (0x2C, BIT, Absolute, 4),
    (0x30, BMI, Relative, 2),
    (0xD0, BNE, Relative, 2),
    (0x10, BPL, Relative, 2),
    (0x00, BRK, Implicit, 7),
    (0x50, BVC, Relative, 2),
    (0x70, BVS, Relative, 2),
    (0x18, CLC, Implicit, 2),
    (0xD8, CLD, Implicit, 2),
    (0x58, CLI, Implicit, 2),
    (0xB8, CLV, Implicit, 2),
    (0xC9, CMP, Immediate, 2),
    (0xC5, CMP, ZeroPage, 3),
    (0xD5, CMP, ZeroPageX, 4),
    (0xCD, CMP, Absolute, 4),
    (0xDD, CMP, AbsoluteX, 4),
    (0xD9, CMP, AbsoluteY, 4),
    (0xC1, CMP, IndirectX, 6),
    (0xD1, CMP, IndirectY, 5),
    (0xE0, CPX, Immediate, 2),
    (0xE4, CPX, ZeroPage, 3),
    (0xEC, CPX, Absolute, 4),
    (0xC0, CPY, Immediate, 2),
    (0xC4, CPY, ZeroPage, 3),
    (0xCC, CPY, Absolute, 4),
    (0xC6, DEC, ZeroPage, 5),
    (0xD6, DEC, ZeroPageX, 6),
    (0xCE, DEC, Absolute, 6),
    (0xDE, DEC, AbsoluteX, 7),
    (0xCA, DEX, Implicit, 2),
    (0x88, DEY, Implicit, 2),
    (0x49, EOR, Immediate, 2),
    (0x45, EOR, ZeroPage, 3),
    (0x55, EOR, ZeroPageX, 4),
    (0x4D, EOR, Absolute, 4),
    (0x5D, EOR, AbsoluteX, 4),
    (0x59, EOR, AbsoluteY, 4),
    (0x41, EOR, IndirectX, 6),
    (0x51, EOR, IndirectY, 5),
    (0xE6, INC, ZeroPage, 5),
    (0xF6, INC, ZeroPageX, 6),
    (0xEE, INC, Absolute, 6),
    (0xFE, INC, AbsoluteX, 7),
    (0xE8, INX, Implicit, 2),
    (0xC8, INY, Implicit, 2),
    (0x4C, JMP, Absolute, 3),
    (0x6C, JMP, Indirect, 5),
    (0x20, JSR, Absolute, 6),
    (0xA9, LDA, Immediate, 2),
    (0xA5, LDA, ZeroPage, 3),
    (0xB5, LDA, ZeroPageX, 4),
    (0xAD, LDA, Absolute, 4),
    (0xBD, LDA, AbsoluteX, 4),
    (0xB9, LDA, AbsoluteY, 4),
    (0xA1, LDA, IndirectX, 6),
    (0xB1, LDA, IndirectY, 5),
    (0xA2, LDX, Immediate, 2),
    (0xA6, LDX, ZeroPage, 3),
    (0xB6, LDX, ZeroPageY, 4),
    (0xAE, LDX, Absolute, 4),
    (0xBE, LDX, AbsoluteY, 4),
    (0xA0, LDY, Immediate, 2),
    (0xA4, LDY, ZeroPage, 3),
    (0xB4, LDY, ZeroPageX, 4),
    (0xAC, LDY, Absolute, 4),
    (0xBC, LDY, AbsoluteX, 4),
    (0x4A, LSR, Accumulator, 2),
    (0x46, LSR, ZeroPage, 5),
    (0x56, LSR, ZeroPageX, 6),
    (0x4E, LSR, Absolute, 6),
    (0x5E, LSR, AbsoluteX, 7),
    (0xEA, NOP, Implicit, 2),
    (0x09, ORA, Immediate, 2),
    (0x05, ORA, ZeroPage, 3),
    (0x15, ORA, ZeroPageX, 4),
    (0x0D, ORA, Absolute, 4),
    (0x1D, ORA, AbsoluteX, 4),
    (0x19, ORA, AbsoluteY, 4),
    (0x01, ORA, IndirectX, 6),
    (0x11, ORA, IndirectY, 5),
    (0x48, PHA, Implicit, 3),
    (0x08, PHP, Implicit, 3),
    (0x68, PLA, Implicit, 4),
    (0x28, PLP, Implicit, 4),
    (0x2A, ROL, Accumulator, 2),
    (0x26, ROL, ZeroPage, 5),
    (0x36, ROL, ZeroPageX, 6),
    (0x2E, ROL, Absolute, 6),
    (0x3E, ROL, AbsoluteX, 7),
    (0x6A, ROR, Accumulator, 2),
    (0x66, ROR, ZeroPage, 5),
    (0x76, ROR, ZeroPageX, 6),
    (0x6E, ROR, Absolute, 6),
    (0x7E, ROR, AbsoluteX, 7),
    (0x40, RTI, Implicit, 6),
    (0x60, RTS, Implicit, 6),
    (0xE9, SBC, Immediate, 2),
    (0xE5, SBC, ZeroPage, 3),
    (0xF5, SBC, ZeroPageX, 4),
    (0xED, SBC, Absolute, 4),
    (0xFD, SBC, AbsoluteX, 4),
    (0xF9, SBC, AbsoluteY, 4),
    (0xE1, SBC, IndirectX, 6),
    (0xF1, SBC, IndirectY, 5),
    (0x38, SEC, Implicit, 2),
    (0xF8, SED, Implicit, 2),
    (0x78, SEI, Implicit, 2),
    (0x85, STA, ZeroPage, 3),
    (0x95, STA, ZeroPageX, 4),
    (0x8D, STA, Absolute, 4),
    (0x9D, STA, AbsoluteX, 5),
    (0x99, STA, AbsoluteY, 5),
    (0x81, STA, IndirectX, 6),
    (0x91, STA, IndirectY, 6),
    (0x86, STX, ZeroPage, 3),
    (0x96, STX, ZeroPageY, 4),
    (0x8E, STX, Absolute, 4),
    (0x84, STY, ZeroPage, 3),
    (0x94, STY, ZeroPageX, 4),
    (0x8C, STY, Absolute, 4),
    (0xAA, TAX, Implicit, 2),
    (0xA8, TAY, Implicit, 2),
    (0xBA, TSX, Implicit, 2),
    (0x8A, TXA, Implicit, 2),
    (0x9A, TXS, Implicit, 2),
    (0x98, TYA, Implicit, 2),
];

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    let mut table: [Option<OpcodeMetadata>; 256] = [None; 256];
    let mut i = 0;
    while i < DOCUMENTED.len() {
        let (opcode, mnemonic, addressing_mode, base_cycles) = DOCUMENTED[i];
        table[opcode as usize] = Some(OpcodeMetadata {
            mnemonic,
            addressing_mode,
            base_cycles,
            size_bytes: 1 + addressing_mode.operand_bytes(),
        });
        i += 1;
    }
    table
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// Documented opcodes map to `Some(metadata)`; undocumented ones are `None`.
/// Built once at compile time and never mutated.
///
/// # Examples
///
/// ```
/// use sim6502::{Mnemonic, OPCODE_TABLE};
///
/// let brk = OPCODE_TABLE[0x00].unwrap();
/// assert_eq!(brk.mnemonic, Mnemonic::BRK);
/// assert_eq!(brk.base_cycles, 7);
///
/// let documented = OPCODE_TABLE.iter().filter(|m| m.is_some()).count();
/// assert_eq!(documented, 151);
/// ```
pub const OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

/// Finds the opcode byte for a mnemonic in a given addressing mode.
///
/// Returns `None` when the combination does not exist on the 6502.
pub fn opcode_for(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    DOCUMENTED
        .iter()
        .find(|(_, m, am, _)| *m == mnemonic && *am == mode)
        .map(|(opcode, ..)| *opcode)
}

/// Returns every addressing mode a mnemonic supports.
pub fn modes_for(mnemonic: Mnemonic) -> impl Iterator<Item = AddressingMode> {
    DOCUMENTED
        .iter()
        .filter(move |(_, m, ..)| *m == mnemonic)
        .map(|(_, _, mode, _)| *mode)
}
