//! Tests for CMP, CPX and CPY.

use sim6502::{FlatMemory, ProcessorSetup, Register, CPU};

fn compare(program: &[u8], register: Register, value: u8) -> CPU<FlatMemory> {
    let mut cpu = ProcessorSetup::new()
        .instruction(program)
        .register(register, value as u16)
        .build()
        .unwrap();
    cpu.step().unwrap();
    cpu
}

#[test]
fn test_cmp_equal() {
    let cpu = compare(&[0xC9, 0x42], Register::A, 0x42);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0x42);
}

#[test]
fn test_cmp_greater() {
    let cpu = compare(&[0xC9, 0x10], Register::A, 0x50);
    assert!(!cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_less() {
    let cpu = compare(&[0xC9, 0x50], Register::A, 0x10);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
    // $10 - $50 = $C0
    assert!(cpu.flag_n());
}

#[test]
fn test_cmp_is_unsigned() {
    let cpu = compare(&[0xC9, 0x01], Register::A, 0xFF);
    assert!(cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_cpx_zero_page() {
    let mut cpu = ProcessorSetup::new()
        .instruction(&[0xE4, 0x33])
        .data(0x33, 0x07)
        .register(Register::X, 0x07)
        .build()
        .unwrap();
    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_cpy_absolute() {
    let mut cpu = ProcessorSetup::new()
        .instruction(&[0xCC, 0x00, 0x30])
        .data(0x3000, 0x80)
        .register(Register::Y, 0x7F)
        .build()
        .unwrap();
    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_cmp_indirect_y_page_cross() {
    let mut cpu = ProcessorSetup::new()
        .instruction(&[0xD1, 0x20])
        .data_map([(0x20, 0xF0), (0x21, 0x10), (0x1110, 0x05)])
        .register(Register::A, 0x05)
        .register(Register::Y, 0x20)
        .build()
        .unwrap();
    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 6);
}
