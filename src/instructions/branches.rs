//! # Branch Instructions
//!
//! This module implements the eight conditional branches (BCC, BCS, BEQ,
//! BNE, BMI, BPL, BVC, BVS) with one handler parameterised by the flag tested
//! and the value that makes the branch taken.
//!
//! All branch instructions use relative addressing with a signed 8-bit offset.
//! Cycle timing varies based on whether the branch is taken and whether a page boundary is crossed.

use crate::addressing::page_crossed;
use crate::{Flag, MemoryBus, CPU};

/// Executes a conditional branch on `flag == taken_when`.
///
/// The offset is relative to the address of the next instruction.
///
/// Cycle timing:
/// - 2 cycles if branch not taken
/// - 3 cycles if branch taken to same page
/// - 4 cycles if branch taken to different page
///
/// No flags are affected.
pub(crate) fn execute_branch<M: MemoryBus>(cpu: &mut CPU<M>, flag: Flag, taken_when: bool) {
    let offset = cpu.fetch_byte() as i8;

    if cpu.flag(flag) != taken_when {
        return;
    }

    let next = cpu.pc;
    let target = next.wrapping_add_signed(offset as i16);
    cpu.tick();
    if page_crossed(next, target) {
        cpu.tick();
    }
    cpu.pc = target;
}
