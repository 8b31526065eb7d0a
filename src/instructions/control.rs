//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address
//! - JSR / RTS: Subroutine call and return
//! - BRK / RTI: Software interrupt and return from interrupt
//! - NOP: No operation
//!
//! BRK is a software interrupt that:
//! 1. Skips a padding byte, so the pushed return address is BRK + 2
//! 2. Pushes the return address (high byte first, then low byte)
//! 3. Pushes processor status to stack with B and bit 5 set
//! 4. Sets the B and I flags
//! 5. Loads PC from IRQ vector at $FFFE/F

use log::debug;

use crate::addressing::Access;
use crate::registers::UNUSED_STATUS_BIT;
use crate::{AddressingMode, Flag, MemoryBus, CPU, IRQ_VECTOR};

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234 - 3 cycles
/// - Indirect (0x6C): JMP ($1234) - 5 cycles
///
/// The indirect form reproduces the NMOS page-wrap bug: a pointer at $xxFF
/// takes its high byte from $xx00. For example, JMP ($10FF) reads from $10FF
/// and $1000 (not $1100).
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.pc = cpu.effective_address(mode, Access::Read);
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the JSR's last byte (the return address minus
/// one) and jumps to the absolute target. 6 cycles: the low target byte is
/// fetched, the stack is read once internally, PC is pushed and the high
/// target byte is fetched last.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>) {
    let low = cpu.fetch_byte();
    cpu.tick();
    cpu.push_word(cpu.pc);
    let high = cpu.read_byte(cpu.pc);
    cpu.pc = u16::from_le_bytes([low, high]);
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the address pushed by JSR and resumes one byte past it. 6 cycles.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick();
    cpu.tick();
    let address = cpu.pull_word();
    cpu.tick();
    cpu.pc = address.wrapping_add(1);
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// Cycle timing: 7 cycles (fixed)
///
/// Flags affected:
/// - B: Set to 1 (in the pushed byte and in the live register)
/// - I: Set to 1
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    let opcode_address = cpu.pc.wrapping_sub(1);

    // Padding byte after the opcode is read and skipped
    cpu.fetch_byte();
    cpu.push_word(cpu.pc);
    let status = cpu.status() | Flag::B.mask() | UNUSED_STATUS_BIT;
    cpu.push(status);

    cpu.flag_b = true;
    cpu.flag_i = true;
    cpu.pc = cpu.read_word(IRQ_VECTOR);

    debug!(
        "BRK at ${:04X} -> ${:04X} (cycle {})",
        opcode_address, cpu.pc, cpu.cycles
    );
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status byte (ignoring bits 4 and 5), then PC. Unlike RTS the
/// pulled address is used as-is. B is cleared on the way out. 6 cycles.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick();
    cpu.tick();
    let status = cpu.pull();
    cpu.restore_status(status);
    cpu.flag_b = false;
    cpu.pc = cpu.pull_word();
}

/// Executes the NOP instruction: one idle cycle after the fetch.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick();
}
