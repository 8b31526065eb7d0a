//! Tests for AND, ORA, EOR and BIT.

use sim6502::{Flag, FlatMemory, ProcessorSetup, Register, CPU};

fn run(program: &[u8], a: u8, data: &[(u32, u8)]) -> CPU<FlatMemory> {
    let mut cpu = ProcessorSetup::new()
        .instruction(program)
        .data_map(data.iter().copied())
        .register(Register::A, a as u16)
        .build()
        .unwrap();
    cpu.step().unwrap();
    cpu
}

#[test]
fn test_and_immediate() {
    let cpu = run(&[0x29, 0x0F], 0xF5, &[]);
    assert_eq!(cpu.a(), 0x05);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_and_to_zero() {
    let cpu = run(&[0x29, 0x0F], 0xF0, &[]);
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_ora_zero_page() {
    let cpu = run(&[0x05, 0x20], 0x01, &[(0x20, 0x80)]);
    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_eor_indirect_x() {
    let cpu = run(
        &[0x41, 0x10],
        0xFF,
        &[(0x10, 0x00), (0x11, 0x30), (0x3000, 0xFF)],
    );
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_logical_ops_leave_carry_and_overflow() {
    let mut cpu = ProcessorSetup::new()
        .instruction(&[0x09, 0x01])
        .flag(Flag::C, true)
        .flag(Flag::V, true)
        .build()
        .unwrap();
    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(cpu.flag_v());
}

#[test]
fn test_bit_copies_high_bits() {
    let cpu = run(&[0x24, 0x40], 0xFF, &[(0x40, 0xC0)]);
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(!cpu.flag_z());
    // A is untouched
    assert_eq!(cpu.a(), 0xFF);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_bit_zero_from_mask() {
    let cpu = run(&[0x2C, 0x00, 0x20], 0x0F, &[(0x2000, 0x30)]);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert_eq!(cpu.cycles(), 4);
}
