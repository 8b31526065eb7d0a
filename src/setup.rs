//! # Processor Setup Harness
//!
//! `ProcessorSetup` prepares a ready-to-step `CPU<FlatMemory>` from a short
//! description: instruction bytes, a memory overlay, initial registers and
//! flags. Test suites use it to state a scenario in one expression.
//!
//! Everything is validated in [`ProcessorSetup::build`], so a processor that
//! comes out of the harness never holds an out-of-width register or a
//! program that runs off the end of memory.
//!
//! ```
//! use sim6502::{Flag, ProcessorSetup, Register};
//!
//! // ASL $80 with $80 = %11000001
//! let mut cpu = ProcessorSetup::new()
//!     .instruction(&[0x06, 0x80])
//!     .data(0x0080, 0b1100_0001)
//!     .flag(Flag::C, false)
//!     .build()
//!     .unwrap();
//!
//! cpu.step().unwrap();
//! assert_eq!(cpu.memory().as_slice()[0x80], 0b1000_0010);
//! assert!(cpu.flag_c());
//! assert_eq!(cpu.cycles(), 5);
//! ```

use log::debug;
use thiserror::Error;

use crate::{Flag, FlatMemory, MemoryBus, Register, CPU};

/// Highest valid bus address, widened so overlay addresses can be checked.
const ADDRESS_LIMIT: u32 = 0xFFFF;

/// Errors reported by [`ProcessorSetup::build`] and [`CPU::set_register`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The value does not fit the register's width.
    #[error("value ${value:X} does not fit register {register}")]
    RegisterOutOfRange { register: Register, value: u16 },

    /// A memory overlay address lies outside 0x0000-0xFFFF.
    #[error("address ${address:X} is outside the 64K address space")]
    AddressOutOfRange { address: u32 },

    /// The instruction bytes would run past 0xFFFF.
    #[error("{len}-byte program at ${start:04X} runs past $FFFF")]
    ProgramOutOfRange { start: u16, len: usize },
}

/// Builder for a processor in a known state.
///
/// Build order: memory overlay, processor construction (PC from the reset
/// vector, 0 in an otherwise empty memory), registers, flags, and finally the
/// instruction bytes written starting at the resulting PC.
#[derive(Debug, Clone, Default)]
pub struct ProcessorSetup {
    instruction: Vec<u8>,
    data: Vec<(u32, u8)>,
    registers: Vec<(Register, u16)>,
    flags: Vec<(Flag, bool)>,
}

impl ProcessorSetup {
    /// Starts an empty setup: zeroed memory, power-on registers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instruction bytes to place at PC.
    pub fn instruction(mut self, bytes: &[u8]) -> Self {
        self.instruction = bytes.to_vec();
        self
    }

    /// Adds a single byte to the memory overlay.
    pub fn data(mut self, address: u32, value: u8) -> Self {
        self.data.push((address, value));
        self
    }

    /// Adds every `(address, byte)` pair to the memory overlay.
    pub fn data_map<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, u8)>,
    {
        self.data.extend(entries);
        self
    }

    /// Sets a register after reset. Later calls for the same register win.
    pub fn register(mut self, register: Register, value: u16) -> Self {
        self.registers.push((register, value));
        self
    }

    /// Sets a flag after reset. Later calls for the same flag win.
    pub fn flag(mut self, flag: Flag, value: bool) -> Self {
        self.flags.push((flag, value));
        self
    }

    /// Validates the description and produces the processor.
    ///
    /// The cycle counter starts at 0; preparing memory costs no cycles.
    ///
    /// # Errors
    ///
    /// - `SetupError::AddressOutOfRange` for an overlay address above 0xFFFF
    /// - `SetupError::RegisterOutOfRange` for a value wider than its register
    /// - `SetupError::ProgramOutOfRange` if the instruction bytes pass 0xFFFF
    pub fn build(self) -> Result<CPU<FlatMemory>, SetupError> {
        let mut memory = FlatMemory::new();
        for &(address, value) in &self.data {
            if address > ADDRESS_LIMIT {
                return Err(SetupError::AddressOutOfRange { address });
            }
            memory.write(address as u16, value);
        }

        let mut cpu = CPU::new(memory);
        for &(register, value) in &self.registers {
            cpu.set_register(register, value)?;
        }
        for &(flag, value) in &self.flags {
            cpu.set_flag(flag, value);
        }

        let start = cpu.pc();
        if start as usize + self.instruction.len() > ADDRESS_LIMIT as usize + 1 {
            return Err(SetupError::ProgramOutOfRange {
                start,
                len: self.instruction.len(),
            });
        }
        for (offset, &byte) in self.instruction.iter().enumerate() {
            cpu.memory_mut().write(start + offset as u16, byte);
        }

        debug!(
            "setup: {} instruction bytes at ${:04X}, {} overlay bytes",
            self.instruction.len(),
            start,
            self.data.len()
        );
        Ok(cpu)
    }
}
