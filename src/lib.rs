//! # sim6502
//!
//! A cycle-counting MOS 6502 interpreter together with the small two-pass
//! assembler and Intel HEX loader that feed it programs.
//!
//! The processor executes one instruction per [`CPU::step`] call. Every bus
//! access (opcode fetch, operand fetch, data read, data write, stack access,
//! vector read) costs one cycle, and internal operations add the idle cycles
//! the NMOS part spends, so cycle totals match the documented timing tables.
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // LDA #$F0 ; ADC #$F0
//! memory.write(0x8000, 0xA9);
//! memory.write(0x8001, 0xF0);
//! memory.write(0x8002, 0x69);
//! memory.write(0x8003, 0xF0);
//!
//! let mut cpu = CPU::new(memory);
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.a(), 0xE0);
//! assert!(cpu.flag_c());
//! assert_eq!(cpu.cycles(), 4);
//! ```
//!
//! ## Assembling a program
//!
//! ```rust
//! use sim6502::{assemble, CPU, FlatMemory, MemoryBus};
//!
//! let output = assemble(
//!     "        .ORG $0200
//!      START   LDX #3
//!      LOOP    DEX
//!              BNE LOOP
//!              BRK",
//! )
//! .unwrap();
//!
//! let mut memory = FlatMemory::new();
//! memory.load(&output.image);
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x02);
//!
//! let mut cpu = CPU::new(memory);
//! for _ in 0..7 {
//!     cpu.step().unwrap();
//! }
//! assert_eq!(cpu.x(), 0);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, bus primitives and the fetch-decode-execute loop
//! - `memory` - MemoryBus trait and the flat 64KB implementation
//! - `opcodes` - Static opcode metadata table
//! - `addressing` - Addressing modes and effective address resolution
//! - `registers` - Register and flag selectors
//! - `setup` - Builder used by tests to prepare a ready-to-step processor
//! - `loader` - Memory images and Intel HEX
//! - `assembler` - Two-pass assembler producing memory images

pub mod addressing;
pub mod assembler;
pub mod cpu;
pub mod loader;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod setup;

#[cfg(feature = "wasm")]
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{assemble, AssemblerError, AssemblerOutput, ErrorType};
pub use cpu::{TraceKind, TraceRecord, CPU, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use loader::{parse_intel_hex, to_intel_hex, HexError, MemoryImage};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use registers::{Flag, Register};
pub use setup::{ProcessorSetup, SetupError};

use thiserror::Error;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The fetched byte is not a documented 6502 opcode.
    ///
    /// Carries the opcode byte and the address it was fetched from.
    #[error("undefined instruction ${opcode:02X} at ${address:04X}")]
    UndefinedInstruction { opcode: u8, address: u16 },
}
