//! Tests for the register transfer instructions.

use sim6502::{FlatMemory, ProcessorSetup, Register, CPU};

fn transfer(opcode: u8, registers: &[(Register, u16)]) -> CPU<FlatMemory> {
    let mut setup = ProcessorSetup::new().instruction(&[opcode]);
    for &(register, value) in registers {
        setup = setup.register(register, value);
    }
    let mut cpu = setup.build().unwrap();
    cpu.step().unwrap();
    cpu
}

#[test]
fn test_tax() {
    let cpu = transfer(0xAA, &[(Register::A, 0x80)]);
    assert_eq!(cpu.x(), 0x80);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_tay_zero() {
    let cpu = transfer(0xA8, &[(Register::A, 0x00), (Register::Y, 0x12)]);
    assert_eq!(cpu.y(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_txa_and_tya() {
    let cpu = transfer(0x8A, &[(Register::X, 0x33)]);
    assert_eq!(cpu.a(), 0x33);

    let cpu = transfer(0x98, &[(Register::Y, 0xF0)]);
    assert_eq!(cpu.a(), 0xF0);
    assert!(cpu.flag_n());
}

#[test]
fn test_tsx_sets_flags() {
    let cpu = transfer(0xBA, &[(Register::SP, 0xF0)]);
    assert_eq!(cpu.x(), 0xF0);
    assert!(cpu.flag_n());
}

#[test]
fn test_txs_leaves_flags() {
    let cpu = transfer(0x9A, &[(Register::X, 0x00)]);
    assert_eq!(cpu.sp(), 0x00);
    // TXS is the one transfer that does not touch Z/N
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycles(), 2);
}
