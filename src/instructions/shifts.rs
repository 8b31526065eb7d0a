//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator (2 cycles) or as a read-modify-write on
//! memory. The bit shifted out lands in C; Z and N follow the result.

use crate::addressing::Access;
use crate::{AddressingMode, MemoryBus, CPU};

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 0 is set to 0 and bit 7 is placed in the carry flag.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, |value, _| (value << 1, value & 0x80 != 0));
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 7 is set to 0 and bit 0 is placed in the carry flag, so N is always
/// cleared.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, |value, _| (value >> 1, value & 0x01 != 0));
}

/// Executes the ROL (Rotate Left) instruction. The old carry enters bit 0.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

/// Executes the ROR (Rotate Right) instruction. The old carry enters bit 7.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}

/// Applies `op(value, carry_in) -> (result, carry_out)` to the accumulator
/// or to memory.
fn modify<M, F>(cpu: &mut CPU<M>, mode: AddressingMode, op: F)
where
    M: MemoryBus,
    F: FnOnce(u8, bool) -> (u8, bool),
{
    let result = if mode == AddressingMode::Accumulator {
        cpu.tick();
        let (result, carry) = op(cpu.a, cpu.flag_c);
        cpu.flag_c = carry;
        cpu.a = result;
        result
    } else {
        let address = cpu.effective_address(mode, Access::ReadModifyWrite);
        let value = cpu.read_byte(address);
        // The unmodified value is written back while the ALU works
        cpu.tick();
        let (result, carry) = op(value, cpu.flag_c);
        cpu.flag_c = carry;
        cpu.write_byte(address, result);
        result
    };

    cpu.set_zn(result);
}
