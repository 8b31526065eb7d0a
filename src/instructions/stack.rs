//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PHP: Push Processor Status on Stack
//! - PLA: Pull Accumulator from Stack
//! - PLP: Pull Processor Status from Stack
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. The full stack address is calculated as 0x0100 | SP. Pushes write and then
//! decrement; pulls increment and then read. SP wraps within the page.

use crate::registers::UNUSED_STATUS_BIT;
use crate::{Flag, MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction.
///
/// Bytes: 1, Cycles: 3. Flags affected: None.
///
/// # Examples
///
/// ```
/// use sim6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0x48); // PHA
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x42);
///
/// cpu.step().unwrap();
///
/// // Stack should contain the accumulator value
/// assert_eq!(cpu.memory().read(0x01FD), 0x42);
/// assert_eq!(cpu.sp(), 0xFC);
/// assert_eq!(cpu.pc(), 0x8001);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick();
    cpu.push(cpu.a);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed byte always has B (bit 4) and bit 5 set. 3 cycles.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick();
    let status = cpu.status() | Flag::B.mask() | UNUSED_STATUS_BIT;
    cpu.push(status);
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N. 4 cycles.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick();
    cpu.tick();
    let value = cpu.pull();
    cpu.a = value;
    cpu.set_zn(value);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Bits 4 and 5 of the pulled byte are ignored. 4 cycles.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick();
    cpu.tick();
    let status = cpu.pull();
    cpu.restore_status(status);
}
