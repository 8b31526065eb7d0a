//! # Increment and Decrement Instructions
//!
//! This module implements increment/decrement operations:
//! - INC, DEC: Read-modify-write on memory
//! - INX, INY, DEX, DEY: Index registers
//!
//! Results wrap modulo 256; only Z and N are affected, never C or V.

use crate::addressing::Access;
use crate::{AddressingMode, MemoryBus, Register, CPU};

/// Executes INC (`delta == 1`) or DEC (`delta == -1`) on memory.
///
/// Read-modify-write timing: the value is read, an internal cycle modifies
/// it and the result is written back. Indexed forms always pay the
/// page-crossing cycle.
pub(crate) fn execute_memory_step<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    delta: i8,
) {
    let address = cpu.effective_address(mode, Access::ReadModifyWrite);
    let value = cpu.read_byte(address);
    cpu.tick();

    let result = value.wrapping_add_signed(delta);
    cpu.write_byte(address, result);
    cpu.set_zn(result);
}

/// Executes INX, INY, DEX or DEY. 2 cycles.
pub(crate) fn execute_register_step<M: MemoryBus>(cpu: &mut CPU<M>, register: Register, delta: i8) {
    cpu.tick();

    let result = cpu.byte_register(register).wrapping_add_signed(delta);
    cpu.set_byte_register(register, result);
    cpu.set_zn(result);
}
