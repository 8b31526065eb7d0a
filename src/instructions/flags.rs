//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV. There is no SEV on the 6502; V is
//! only set by ADC, SBC, BIT, PLP and RTI.

use crate::{Flag, MemoryBus, CPU};

/// Sets `flag` to `value`. Implied addressing, 2 cycles.
pub(crate) fn execute_set_flag<M: MemoryBus>(cpu: &mut CPU<M>, flag: Flag, value: bool) {
    cpu.tick();
    cpu.set_flag(flag, value);
}
