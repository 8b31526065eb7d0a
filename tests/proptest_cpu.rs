//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to check arithmetic laws, addressing wrap-around
//! and cycle accounting across the whole input space.

use proptest::prelude::*;
use sim6502::{Flag, FlatMemory, MemoryBus, ProcessorSetup, Register, CPU};

/// Builds a processor at $0200 running `program`.
fn setup_cpu(program: &[u8], a: u8, carry: bool, decimal: bool) -> CPU<FlatMemory> {
    ProcessorSetup::new()
        .register(Register::PC, 0x0200)
        .register(Register::A, a as u16)
        .flag(Flag::C, carry)
        .flag(Flag::D, decimal)
        .instruction(program)
        .build()
        .unwrap()
}

fn to_bcd(n: u8) -> u8 {
    ((n / 10) << 4) | (n % 10)
}

proptest! {
    /// Binary ADC is addition modulo 256 with carry out and signed overflow.
    #[test]
    fn prop_adc_binary(a in any::<u8>(), m in any::<u8>(), c in any::<bool>()) {
        let mut cpu = setup_cpu(&[0x69, m], a, c, false);
        cpu.step().unwrap();

        let sum = a as u16 + m as u16 + c as u16;
        let signed = a as i8 as i16 + m as i8 as i16 + c as i16;
        prop_assert_eq!(cpu.a(), sum as u8);
        prop_assert_eq!(cpu.flag_c(), sum > 0xFF);
        prop_assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
        prop_assert_eq!(cpu.flag_z(), sum as u8 == 0);
        prop_assert_eq!(cpu.flag_n(), sum as u8 & 0x80 != 0);
        prop_assert_eq!(cpu.cycles(), 2);
    }

    /// Binary SBC computes A - M - borrow; carry means no borrow.
    #[test]
    fn prop_sbc_binary(a in any::<u8>(), m in any::<u8>(), c in any::<bool>()) {
        let mut cpu = setup_cpu(&[0xE9, m], a, c, false);
        cpu.step().unwrap();

        let difference = a as i16 - m as i16 - !c as i16;
        let signed = a as i8 as i16 - m as i8 as i16 - !c as i16;
        prop_assert_eq!(cpu.a(), difference as u8);
        prop_assert_eq!(cpu.flag_c(), difference >= 0);
        prop_assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
    }

    /// Decimal ADC on valid BCD operands is addition modulo 100.
    #[test]
    fn prop_adc_decimal(a in 0u8..100, m in 0u8..100, c in any::<bool>()) {
        let mut cpu = setup_cpu(&[0x69, to_bcd(m)], to_bcd(a), c, true);
        cpu.step().unwrap();

        let sum = a as u16 + m as u16 + c as u16;
        prop_assert_eq!(cpu.a(), to_bcd((sum % 100) as u8));
        prop_assert_eq!(cpu.flag_c(), sum >= 100);
    }

    /// Decimal SBC on valid BCD operands is subtraction modulo 100.
    #[test]
    fn prop_sbc_decimal(a in 0u8..100, m in 0u8..100, c in any::<bool>()) {
        let mut cpu = setup_cpu(&[0xE9, to_bcd(m)], to_bcd(a), c, true);
        cpu.step().unwrap();

        let difference = a as i16 - m as i16 - !c as i16;
        prop_assert_eq!(cpu.a(), to_bcd(difference.rem_euclid(100) as u8));
        prop_assert_eq!(cpu.flag_c(), difference >= 0);
    }

    /// CMP sets C, Z and N like an unsigned subtraction that is thrown away.
    #[test]
    fn prop_compare(a in any::<u8>(), m in any::<u8>()) {
        let mut cpu = setup_cpu(&[0xC9, m], a, false, false);
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.flag_c(), a >= m);
        prop_assert_eq!(cpu.flag_z(), a == m);
        prop_assert_eq!(cpu.flag_n(), a.wrapping_sub(m) & 0x80 != 0);
    }

    /// Zero-page indexed addresses never leave page zero.
    #[test]
    fn prop_zero_page_x_wraps(base in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let target = base.wrapping_add(x) as u16;
        let mut cpu = ProcessorSetup::new()
            .register(Register::PC, 0x0200)
            .register(Register::X, x as u16)
            .data(target as u32, value)
            .instruction(&[0xB5, base])
            .build()
            .unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.cycles(), 4);
    }

    /// Absolute,X reads cost one extra cycle exactly when a page is crossed.
    #[test]
    fn prop_absolute_x_page_penalty(base in 0x1000u16..0xF000, x in any::<u8>()) {
        let [low, high] = base.to_le_bytes();
        let mut cpu = ProcessorSetup::new()
            .register(Register::PC, 0x0200)
            .register(Register::X, x as u16)
            .instruction(&[0xBD, low, high])
            .build()
            .unwrap();
        cpu.step().unwrap();

        let crossed = (base & 0xFF00) != (base.wrapping_add(x as u16) & 0xFF00);
        prop_assert_eq!(cpu.cycles(), 4 + crossed as u64);
    }

    /// PHA followed by PLA restores A and SP in 7 cycles.
    #[test]
    fn prop_pha_pla(a in any::<u8>(), sp in any::<u8>()) {
        let mut cpu = ProcessorSetup::new()
            .register(Register::PC, 0x0200)
            .register(Register::A, a as u16)
            .register(Register::SP, sp as u16)
            .instruction(&[0x48, 0x68])
            .build()
            .unwrap();
        cpu.step().unwrap();
        prop_assert_eq!(cpu.memory().read(0x0100 | sp as u16), a);
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.sp(), sp);
        prop_assert_eq!(cpu.cycles(), 7);
    }

    /// JSR then RTS lands on the instruction after the JSR.
    #[test]
    fn prop_jsr_rts(target in 0x1000u16..0xF000) {
        let [low, high] = target.to_le_bytes();
        let mut cpu = ProcessorSetup::new()
            .register(Register::PC, 0x0200)
            .data(target as u32, 0x60)
            .instruction(&[0x20, low, high])
            .build()
            .unwrap();

        cpu.step().unwrap();
        prop_assert_eq!(cpu.pc(), target);
        cpu.step().unwrap();

        prop_assert_eq!(cpu.pc(), 0x0203);
        prop_assert_eq!(cpu.sp(), 0xFD);
        prop_assert_eq!(cpu.cycles(), 12);
    }
}
