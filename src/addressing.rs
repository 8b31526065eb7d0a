//! # Addressing Modes
//!
//! This module defines the 13 addressing modes supported by the 6502 processor
//! and the logic that turns an instruction's operand bytes into an effective
//! address. Every operand byte fetched and every pointer byte read goes
//! through the CPU's bus primitives, so resolution bills its own cycles.

use crate::{MemoryBus, CPU};

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into accumulator)
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by X register.
    ///
    /// Example: LDA $80,X (load from address 0x0080 + X, wraps within zero page)
    ZeroPageX,

    /// Zero page address indexed by Y register.
    ///
    /// Example: LDX $80,Y (load from address 0x0080 + Y, wraps within zero page)
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label (branch if zero flag set, offset is relative to PC)
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234 (jump to address 0x1234)
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X (load from address 0x1234 + X)
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y (load from address 0x1234 + Y)
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC) (jump to address stored at 0xFFFC/0xFFFD)
    /// Only used by JMP instruction.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X) (add X to 0x40, read 16-bit address from that ZP location, load from result)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y (read 16-bit address from ZP 0x40, add Y, load from result)
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Whether indexing in this mode can cross a page and cost an extra cycle.
    pub const fn has_page_penalty(self) -> bool {
        matches!(
            self,
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::IndirectY
        )
    }
}

/// How an instruction uses its effective address.
///
/// Reads only pay the indexed page-crossing cycle when the page actually
/// changes. Writes and read-modify-write instructions always pay it, since
/// the hardware has already issued the bus cycle before it knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
    ReadModifyWrite,
}

/// Returns true when two addresses lie in different 256-byte pages.
pub(crate) fn page_crossed(from: u16, to: u16) -> bool {
    (from & 0xFF00) != (to & 0xFF00)
}

impl<M: MemoryBus> CPU<M> {
    /// Resolves the effective address for `mode`, fetching operand bytes
    /// from PC and billing one cycle per bus access plus any internal cycle.
    ///
    /// For `Immediate` the effective address is the operand byte's own
    /// location; PC is advanced past it and the caller's read bills the
    /// cycle. Implicit, Accumulator and Relative never name a memory operand
    /// and resolve to the current PC without side effects.
    pub(crate) fn effective_address(&mut self, mode: AddressingMode, access: Access) -> u16 {
        match mode {
            AddressingMode::Immediate => {
                let address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                address
            }
            AddressingMode::ZeroPage => self.fetch_byte() as u16,
            AddressingMode::ZeroPageX => {
                let base = self.fetch_byte();
                self.tick();
                base.wrapping_add(self.x) as u16
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_byte();
                self.tick();
                base.wrapping_add(self.y) as u16
            }
            AddressingMode::Absolute => self.fetch_word(),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                self.index_address(base, self.x, access)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                self.index_address(base, self.y, access)
            }
            AddressingMode::IndirectX => {
                let pointer = self.fetch_byte();
                self.tick();
                self.read_zero_page_word(pointer.wrapping_add(self.x))
            }
            AddressingMode::IndirectY => {
                let pointer = self.fetch_byte();
                let base = self.read_zero_page_word(pointer);
                self.index_address(base, self.y, access)
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                self.read_word_page_bug(pointer)
            }
            AddressingMode::Implicit | AddressingMode::Accumulator | AddressingMode::Relative => {
                self.pc
            }
        }
    }

    /// Reads the operand value for `mode`: the immediate byte, or the byte
    /// at the effective address.
    pub(crate) fn operand_value(&mut self, mode: AddressingMode) -> u8 {
        let address = self.effective_address(mode, Access::Read);
        self.read_byte(address)
    }

    /// Adds an index register to a 16-bit base with full carry.
    fn index_address(&mut self, base: u16, index: u8, access: Access) -> u16 {
        let address = base.wrapping_add(index as u16);
        if access != Access::Read || page_crossed(base, address) {
            self.tick();
        }
        address
    }

    /// Reads a little-endian pointer from zero page; the high byte wraps
    /// to 0x00 instead of reading 0x0100.
    fn read_zero_page_word(&mut self, pointer: u8) -> u16 {
        let low = self.read_byte(pointer as u16);
        let high = self.read_byte(pointer.wrapping_add(1) as u16);
        u16::from_le_bytes([low, high])
    }

    /// Reads a 16-bit word with the NMOS indirect-JMP bug: if the pointer is
    /// $xxFF the high byte comes from $xx00.
    fn read_word_page_bug(&mut self, pointer: u16) -> u16 {
        let low = self.read_byte(pointer);
        let high_address = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
        let high = self.read_byte(high_address);
        u16::from_le_bytes([low, high])
    }
}
