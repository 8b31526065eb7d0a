//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is a standalone function taking the CPU and the addressing mode decoded
//! from the opcode table. The opcode byte has already been fetched (and billed) by `step`;
//! handlers fetch their own operands and bill every further bus access and internal cycle.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::{Flag, MemoryBus, Mnemonic, OpcodeMetadata, Register, CPU};

/// Runs the instruction described by `metadata`.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, metadata: OpcodeMetadata) {
    let mode = metadata.addressing_mode;

    match metadata.mnemonic {
        Mnemonic::ADC => alu::execute_adc(cpu, mode),
        Mnemonic::SBC => alu::execute_sbc(cpu, mode),
        Mnemonic::AND => alu::execute_and(cpu, mode),
        Mnemonic::ORA => alu::execute_ora(cpu, mode),
        Mnemonic::EOR => alu::execute_eor(cpu, mode),
        Mnemonic::CMP => alu::execute_compare(cpu, Register::A, mode),
        Mnemonic::CPX => alu::execute_compare(cpu, Register::X, mode),
        Mnemonic::CPY => alu::execute_compare(cpu, Register::Y, mode),
        Mnemonic::BIT => alu::execute_bit(cpu, mode),

        Mnemonic::BCC => branches::execute_branch(cpu, Flag::C, false),
        Mnemonic::BCS => branches::execute_branch(cpu, Flag::C, true),
        Mnemonic::BNE => branches::execute_branch(cpu, Flag::Z, false),
        Mnemonic::BEQ => branches::execute_branch(cpu, Flag::Z, true),
        Mnemonic::BPL => branches::execute_branch(cpu, Flag::N, false),
        Mnemonic::BMI => branches::execute_branch(cpu, Flag::N, true),
        Mnemonic::BVC => branches::execute_branch(cpu, Flag::V, false),
        Mnemonic::BVS => branches::execute_branch(cpu, Flag::V, true),

        Mnemonic::ASL => shifts::execute_asl(cpu, mode),
        Mnemonic::LSR => shifts::execute_lsr(cpu, mode),
        Mnemonic::ROL => shifts::execute_rol(cpu, mode),
        Mnemonic::ROR => shifts::execute_ror(cpu, mode),

        Mnemonic::LDA => load_store::execute_load(cpu, Register::A, mode),
        Mnemonic::LDX => load_store::execute_load(cpu, Register::X, mode),
        Mnemonic::LDY => load_store::execute_load(cpu, Register::Y, mode),
        Mnemonic::STA => load_store::execute_store(cpu, Register::A, mode),
        Mnemonic::STX => load_store::execute_store(cpu, Register::X, mode),
        Mnemonic::STY => load_store::execute_store(cpu, Register::Y, mode),

        Mnemonic::INC => inc_dec::execute_memory_step(cpu, mode, 1),
        Mnemonic::DEC => inc_dec::execute_memory_step(cpu, mode, -1),
        Mnemonic::INX => inc_dec::execute_register_step(cpu, Register::X, 1),
        Mnemonic::INY => inc_dec::execute_register_step(cpu, Register::Y, 1),
        Mnemonic::DEX => inc_dec::execute_register_step(cpu, Register::X, -1),
        Mnemonic::DEY => inc_dec::execute_register_step(cpu, Register::Y, -1),

        Mnemonic::JMP => control::execute_jmp(cpu, mode),
        Mnemonic::JSR => control::execute_jsr(cpu),
        Mnemonic::RTS => control::execute_rts(cpu),
        Mnemonic::BRK => control::execute_brk(cpu),
        Mnemonic::RTI => control::execute_rti(cpu),
        Mnemonic::NOP => control::execute_nop(cpu),

        Mnemonic::PHA => stack::execute_pha(cpu),
        Mnemonic::PHP => stack::execute_php(cpu),
        Mnemonic::PLA => stack::execute_pla(cpu),
        Mnemonic::PLP => stack::execute_plp(cpu),

        Mnemonic::CLC => flags::execute_set_flag(cpu, Flag::C, false),
        Mnemonic::SEC => flags::execute_set_flag(cpu, Flag::C, true),
        Mnemonic::CLI => flags::execute_set_flag(cpu, Flag::I, false),
        Mnemonic::SEI => flags::execute_set_flag(cpu, Flag::I, true),
        Mnemonic::CLD => flags::execute_set_flag(cpu, Flag::D, false),
        Mnemonic::SED => flags::execute_set_flag(cpu, Flag::D, true),
        Mnemonic::CLV => flags::execute_set_flag(cpu, Flag::V, false),

        Mnemonic::TAX => transfer::execute_transfer(cpu, Register::A, Register::X),
        Mnemonic::TAY => transfer::execute_transfer(cpu, Register::A, Register::Y),
        Mnemonic::TXA => transfer::execute_transfer(cpu, Register::X, Register::A),
        Mnemonic::TYA => transfer::execute_transfer(cpu, Register::Y, Register::A),
        Mnemonic::TSX => transfer::execute_transfer(cpu, Register::SP, Register::X),
        Mnemonic::TXS => transfer::execute_transfer(cpu, Register::X, Register::SP),
    }
}
