//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA, TSX and TXS copy one register into another. All are
//! implied, 2 cycles, and set Z and N from the copied value except TXS,
//! which leaves the flags alone.

use crate::{MemoryBus, Register, CPU};

/// Copies `source` into `destination`.
pub(crate) fn execute_transfer<M: MemoryBus>(
    cpu: &mut CPU<M>,
    source: Register,
    destination: Register,
) {
    cpu.tick();

    let value = cpu.byte_register(source);
    cpu.set_byte_register(destination, value);
    if destination != Register::SP {
        cpu.set_zn(value);
    }
}
