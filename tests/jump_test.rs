//! Tests for JMP, JSR and RTS.

use sim6502::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    for (i, &byte) in program.iter().enumerate() {
        memory.write(0x8000 + i as u16, byte);
    }
    CPU::new(memory)
}

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu(&[0x4C, 0x34, 0x12]);
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_jmp_indirect() {
    let mut cpu = setup_cpu(&[0x6C, 0x00, 0x30]);
    cpu.memory_mut().write(0x3000, 0x78);
    cpu.memory_mut().write(0x3001, 0x56);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x5678);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_jmp_indirect_page_wrap_bug() {
    let mut cpu = setup_cpu(&[0x6C, 0xFF, 0x30]);
    cpu.memory_mut().write(0x30FF, 0x80);
    cpu.memory_mut().write(0x3000, 0x50);
    cpu.memory_mut().write(0x3100, 0x40);

    cpu.step().unwrap();

    // High byte comes from $3000, not $3100
    assert_eq!(cpu.pc(), 0x5080);
}

#[test]
fn test_jsr_pushes_return_minus_one() {
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x90]);
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFB);
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_jsr_rts_round_trip() {
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x90, 0xEA]);
    cpu.memory_mut().write(0x9000, 0x60); // RTS

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 12);
}

#[test]
fn test_nested_subroutines() {
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x90]);
    // $9000: JSR $9100 ; RTS
    cpu.memory_mut().write(0x9000, 0x20);
    cpu.memory_mut().write(0x9001, 0x00);
    cpu.memory_mut().write(0x9002, 0x91);
    cpu.memory_mut().write(0x9003, 0x60);
    cpu.memory_mut().write(0x9100, 0x60);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0xF9);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x9003);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_rts_from_crafted_stack() {
    let mut cpu = setup_cpu(&[0x60]);
    cpu.set_sp(0xFB);
    cpu.memory_mut().write(0x01FC, 0xFF);
    cpu.memory_mut().write(0x01FD, 0x1F);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x2000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 6);
}
