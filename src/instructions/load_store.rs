//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA, LDX, LDY: Load a register from memory
//! - STA, STX, STY: Store a register to memory
//!
//! One handler per direction serves all three registers; the dispatcher
//! passes the register selected by the opcode.

use crate::addressing::Access;
use crate::{AddressingMode, MemoryBus, Register, CPU};

/// Executes LDA, LDX or LDY.
///
/// Loads a byte of memory into `register`, setting the zero and negative
/// flags as appropriate.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if the loaded value is 0
/// - Negative (N): Set if bit 7 of the loaded value is set
/// - Other flags: Not affected
///
/// Indexed forms pay one extra cycle only when the index crosses a page.
pub(crate) fn execute_load<M: MemoryBus>(
    cpu: &mut CPU<M>,
    register: Register,
    mode: AddressingMode,
) {
    let value = cpu.operand_value(mode);
    cpu.set_byte_register(register, value);
    cpu.set_zn(value);
}

/// Executes STA, STX or STY.
///
/// Writes `register` to the effective address. No flags are affected.
/// Indexed stores always spend the page-crossing cycle, so STA abs,X is 5
/// cycles and STA (zp),Y is 6 whatever the index.
pub(crate) fn execute_store<M: MemoryBus>(
    cpu: &mut CPU<M>,
    register: Register,
    mode: AddressingMode,
) {
    let address = cpu.effective_address(mode, Access::Write);
    let value = cpu.byte_register(register);
    cpu.write_byte(address, value);
}
