//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register/memory comparison
//! - BIT: Bit test
//!
//! ADC and SBC honour the decimal flag. Decimal mode adjusts each nibble of
//! the result; the NMOS part's undefined flag behaviour for invalid BCD
//! operands is not reproduced.

use crate::{AddressingMode, MemoryBus, Register, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator.
///
/// # Flag Behavior
///
/// - Carry (C): Set if the unsigned sum exceeds 0xFF (decimal: exceeds 99)
/// - Overflow (V): Set if both operands share a sign the result does not
/// - Zero (Z), Negative (N): From the result
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.operand_value(mode);
    if cpu.flag_d {
        add_decimal(cpu, value);
    } else {
        add_binary(cpu, value);
    }
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Computes `A - M - (1 - C)`. Carry is the inverted borrow: it is set when
/// no borrow was needed. In binary mode this is exactly ADC of the operand's
/// one's complement.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.operand_value(mode);
    if cpu.flag_d {
        subtract_decimal(cpu, value);
    } else {
        add_binary(cpu, !value);
    }
}

fn add_binary<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let sum = a as u16 + value as u16 + cpu.flag_c as u16;
    let result = sum as u8;

    cpu.flag_c = sum > 0xFF;
    // Both inputs agree in sign and the result disagrees
    cpu.flag_v = (a ^ result) & (value ^ result) & 0x80 != 0;
    cpu.a = result;
    cpu.set_zn(result);
}

fn add_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;

    let mut low = (a & 0x0F) as u16 + (value & 0x0F) as u16 + cpu.flag_c as u16;
    if low > 0x09 {
        low += 0x06;
    }
    let mut high = (a >> 4) as u16 + (value >> 4) as u16 + (low > 0x0F) as u16;

    // V is taken before the high nibble is adjusted
    let intermediate = ((high << 4) | (low & 0x0F)) as u8;
    cpu.flag_v = !(a ^ value) & (a ^ intermediate) & 0x80 != 0;

    if high > 0x09 {
        high += 0x06;
    }
    cpu.flag_c = high > 0x0F;

    let result = ((high << 4) | (low & 0x0F)) as u8;
    cpu.a = result;
    cpu.set_zn(result);
}

fn subtract_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let borrow = !cpu.flag_c as i16;

    // C and V follow the binary subtraction
    let difference = a as i16 - value as i16 - borrow;
    let binary = difference as u8;
    cpu.flag_c = difference >= 0;
    cpu.flag_v = (a ^ value) & (a ^ binary) & 0x80 != 0;

    let mut low = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
    let mut high = (a >> 4) as i16 - (value >> 4) as i16;
    if low < 0 {
        low -= 0x06;
        high -= 1;
    }
    if high < 0 {
        high -= 0x06;
    }

    let result = ((high << 4) | (low & 0x0F)) as u8;
    cpu.a = result;
    cpu.set_zn(result);
}

/// Executes the AND (Logical AND) instruction. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let result = cpu.a & cpu.operand_value(mode);
    cpu.a = result;
    cpu.set_zn(result);
}

/// Executes the ORA (Logical Inclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let result = cpu.a | cpu.operand_value(mode);
    cpu.a = result;
    cpu.set_zn(result);
}

/// Executes the EOR (Exclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let result = cpu.a ^ cpu.operand_value(mode);
    cpu.a = result;
    cpu.set_zn(result);
}

/// Executes CMP, CPX or CPY against `register`.
///
/// # Flag Behavior
///
/// - Carry (C): Set if register >= operand (unsigned)
/// - Zero (Z): Set if register == operand
/// - Negative (N): Bit 7 of `register - operand`
///
/// The register itself is not modified.
pub(crate) fn execute_compare<M: MemoryBus>(
    cpu: &mut CPU<M>,
    register: Register,
    mode: AddressingMode,
) {
    let value = cpu.operand_value(mode);
    let lhs = cpu.byte_register(register);

    cpu.flag_c = lhs >= value;
    cpu.set_zn(lhs.wrapping_sub(value));
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from `A & M`; N and V are copied from bits 7 and 6 of the
/// operand. The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.operand_value(mode);

    cpu.flag_z = cpu.a & value == 0;
    cpu.flag_n = value & 0x80 != 0;
    cpu.flag_v = value & 0x40 != 0;
}
