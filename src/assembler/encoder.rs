//! Instruction encoder for the 6502 assembler
//!
//! Two steps, one per pass. [`select_mode`] fixes an instruction's
//! addressing mode (and so its size) in pass 1, using only the symbols
//! defined so far; [`encode`] produces the bytes in pass 2, when every symbol
//! is known. Opcodes come from the same table the processor decodes with.

use crate::assembler::parser::{Expression, Operand};
use crate::assembler::symbol_table::SymbolTable;
use crate::assembler::{AssemblerError, ErrorType};
use crate::opcodes::{modes_for, opcode_for};
use crate::{AddressingMode, Mnemonic};

/// Picks the addressing mode for `mnemonic` with `operand`.
///
/// A value that is known to fit in one byte selects the zero-page form when
/// the instruction has one. Forward references are assumed to be 16-bit.
pub fn select_mode(
    mnemonic: Mnemonic,
    operand: &Operand,
    symbols: &SymbolTable,
    line: usize,
) -> Result<AddressingMode, AssemblerError> {
    let supports = |mode| opcode_for(mnemonic, mode).is_some();

    let mode = match operand {
        Operand::None if supports(AddressingMode::Accumulator) => AddressingMode::Accumulator,
        Operand::None => AddressingMode::Implicit,
        Operand::Accumulator => AddressingMode::Accumulator,
        Operand::Immediate(_) => AddressingMode::Immediate,
        Operand::Displacement(_) => AddressingMode::Relative,
        Operand::Direct(_) if mnemonic.is_branch() => AddressingMode::Relative,
        Operand::Direct(value) => sized(
            &supports,
            is_zero_page(value, symbols),
            AddressingMode::ZeroPage,
            AddressingMode::Absolute,
        ),
        Operand::IndexedX(value) => sized(
            &supports,
            is_zero_page(value, symbols),
            AddressingMode::ZeroPageX,
            AddressingMode::AbsoluteX,
        ),
        Operand::IndexedY(value) => sized(
            &supports,
            is_zero_page(value, symbols),
            AddressingMode::ZeroPageY,
            AddressingMode::AbsoluteY,
        ),
        Operand::Indirect(_) => AddressingMode::Indirect,
        Operand::IndirectX(_) => AddressingMode::IndirectX,
        Operand::IndirectY(_) => AddressingMode::IndirectY,
    };

    if supports(mode) {
        Ok(mode)
    } else {
        let valid: Vec<String> = modes_for(mnemonic).map(|m| format!("{:?}", m)).collect();
        Err(AssemblerError::new(
            ErrorType::InvalidOperand,
            line,
            format!(
                "{} does not support {:?} addressing (valid: {})",
                mnemonic,
                mode,
                valid.join(", ")
            ),
        ))
    }
}

/// Chooses between the zero-page and absolute form of an operand.
fn sized<F>(supports: &F, zero_page: bool, short: AddressingMode, long: AddressingMode) -> AddressingMode
where
    F: Fn(AddressingMode) -> bool,
{
    if supports(short) && (zero_page || !supports(long)) {
        short
    } else {
        long
    }
}

/// Whether a value is known, at this point of pass 1, to be one byte wide.
fn is_zero_page(value: &Expression, symbols: &SymbolTable) -> bool {
    match value {
        Expression::Number(number) => number.zero_page,
        Expression::Symbol { name, offset } => symbols
            .lookup_symbol(name)
            .map(|symbol| {
                let resolved = symbol.value as i32 + offset;
                symbol.zero_page && (0..=0xFF).contains(&resolved)
            })
            .unwrap_or(false),
    }
}

/// Resolves an expression against the complete symbol table.
pub fn resolve(
    value: &Expression,
    symbols: &SymbolTable,
    line: usize,
) -> Result<u16, AssemblerError> {
    match value {
        Expression::Number(number) => Ok(number.value),
        Expression::Symbol { name, offset } => {
            let symbol = symbols.lookup_symbol(name).ok_or_else(|| {
                AssemblerError::new(
                    ErrorType::UndefinedLabel,
                    line,
                    format!("undefined label '{}'", name),
                )
            })?;
            let resolved = symbol.value as i32 + offset;
            u16::try_from(resolved).map_err(|_| {
                AssemblerError::new(
                    ErrorType::RangeError,
                    line,
                    format!("{}{:+} is outside $0000-$FFFF", name, offset),
                )
            })
        }
    }
}

/// Encodes one instruction located at `address`.
pub fn encode(
    mnemonic: Mnemonic,
    mode: AddressingMode,
    operand: &Operand,
    address: u16,
    symbols: &SymbolTable,
    line: usize,
) -> Result<Vec<u8>, AssemblerError> {
    let opcode = opcode_for(mnemonic, mode).ok_or_else(|| {
        AssemblerError::new(
            ErrorType::InvalidOperand,
            line,
            format!("{} does not support {:?} addressing", mnemonic, mode),
        )
    })?;

    let mut bytes = vec![opcode];
    match operand {
        Operand::None | Operand::Accumulator => {}
        Operand::Displacement(distance) => {
            let target = address as i32 + distance;
            let target = u16::try_from(target).map_err(|_| {
                AssemblerError::new(
                    ErrorType::RangeError,
                    line,
                    format!("branch target {:+} leaves the address space", distance),
                )
            })?;
            bytes.push(branch_offset(address, target, line)?);
        }
        Operand::Immediate(value)
        | Operand::Direct(value)
        | Operand::IndexedX(value)
        | Operand::IndexedY(value)
        | Operand::Indirect(value)
        | Operand::IndirectX(value)
        | Operand::IndirectY(value) => {
            let value = resolve(value, symbols, line)?;
            match mode {
                AddressingMode::Relative => bytes.push(branch_offset(address, value, line)?),
                _ if mode.operand_bytes() == 2 => bytes.extend_from_slice(&value.to_le_bytes()),
                _ => bytes.push(single_byte(value, mode, line)?),
            }
        }
    }

    Ok(bytes)
}

fn single_byte(value: u16, mode: AddressingMode, line: usize) -> Result<u8, AssemblerError> {
    u8::try_from(value).map_err(|_| {
        AssemblerError::new(
            ErrorType::RangeError,
            line,
            format!("value ${:04X} does not fit in one byte ({:?})", value, mode),
        )
    })
}

/// Offset byte for a branch at `address` to `target`.
///
/// The offset counts from the instruction after the branch and must fit in
/// a signed byte.
pub fn branch_offset(address: u16, target: u16, line: usize) -> Result<u8, AssemblerError> {
    let offset = target as i32 - (address as i32 + 2);
    i8::try_from(offset).map(|o| o as u8).map_err(|_| {
        AssemblerError::new(
            ErrorType::RangeError,
            line,
            format!(
                "branch to ${:04X} is {} bytes away (limit -128..127)",
                target, offset
            ),
        )
    })
}
