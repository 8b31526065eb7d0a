//! Integration tests for BRK, RTI and the IRQ/NMI lines.
//!
//! These tests verify:
//! - 7-cycle interrupt entry for BRK, IRQ and NMI
//! - The B bit in the pushed status (set for BRK only)
//! - Interrupt entry followed by an instruction in the same step
//! - IRQ requests dropped while the I flag masks them
//! - NMI handler running ahead of a simultaneous IRQ handler
//! - RTI restoring PC and status

use sim6502::{
    Flag, FlatMemory, MemoryBus, ProcessorSetup, Register, TraceKind, CPU, IRQ_VECTOR, NMI_VECTOR,
};

/// Program at $0200 with IRQ handler at $9000 and NMI handler at $A000.
fn setup_cpu(program: &[u8], irq_enabled: bool) -> CPU<FlatMemory> {
    ProcessorSetup::new()
        .data_map([
            (0xFFFE, 0x00),
            (0xFFFF, 0x90),
            (0xFFFA, 0x00),
            (0xFFFB, 0xA0),
            (0x9000, 0x40), // RTI
            (0xA000, 0x40), // RTI
        ])
        .register(Register::PC, 0x0200)
        .flag(Flag::I, !irq_enabled)
        .instruction(program)
        .build()
        .unwrap()
}

#[test]
fn test_brk_enters_handler() {
    let mut cpu = setup_cpu(&[0x00, 0xFF], true);
    cpu.set_flag(Flag::C, true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
    assert!(cpu.flag_i());
    assert_eq!(cpu.sp(), 0xFA);
    assert_eq!(cpu.memory().read(0x01FD), 0x02);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);
    // N V - B D I Z C with B, bit 5 and C
    assert_eq!(cpu.memory().read(0x01FB), 0b0011_0001);
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_brk_rti_resumes_after_padding() {
    let mut cpu = setup_cpu(&[0x00, 0xFF, 0xEA], true);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0202);
    assert_eq!(cpu.sp(), 0xFD);
    assert!(!cpu.flag_i());
    assert!(!cpu.flag_b());
    assert_eq!(cpu.cycles(), 13);
}

#[test]
fn test_rti_restores_status() {
    let mut cpu = setup_cpu(&[0x40], true);
    cpu.set_sp(0xFA);
    cpu.memory_mut().write(0x01FB, 0b1100_0011);
    cpu.memory_mut().write(0x01FC, 0x34);
    cpu.memory_mut().write(0x01FD, 0x12);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_i());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_irq_serviced_when_enabled() {
    let mut cpu = setup_cpu(&[0xEA], true);
    cpu.request_irq();

    let mut records = Vec::new();
    cpu.step_traced(|record| records.push(*record)).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, TraceKind::Interrupt { vector: IRQ_VECTOR });
    assert_eq!(records[0].address, 0x0200);
    assert_eq!(records[0].cycles, 7);
    // The handler's RTI runs in the same step
    assert_eq!(records[1].address, 0x9000);
    assert_eq!(records[1].cycles, 6);
    assert!(!cpu.irq_pending());
    // B clear in the pushed status
    assert_eq!(cpu.memory().read(0x01FB) & 0x30, 0x20);
    assert_eq!(cpu.pc(), 0x0200);
    assert_eq!(cpu.cycles(), 13);
}

#[test]
fn test_irq_step_runs_handler_first_instruction() {
    let mut cpu = setup_cpu(&[0xEA], true);
    // LDA #$42 at the top of the handler
    cpu.memory_mut().write(0x9000, 0xA9);
    cpu.memory_mut().write(0x9001, 0x42);
    cpu.request_irq();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.pc(), 0x9002);
    assert!(cpu.flag_i());
    assert_eq!(cpu.memory().read(0x01FD), 0x02);
    assert_eq!(cpu.memory().read(0x01FC), 0x00);
    assert_eq!(cpu.cycles(), 9);
}

#[test]
fn test_masked_irq_is_dropped() {
    let mut cpu = setup_cpu(&[0xEA, 0x58, 0xEA, 0xEA], false);
    cpu.request_irq();

    // NOP runs and the masked request is discarded
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0201);
    assert!(!cpu.irq_pending());

    // CLI
    cpu.step().unwrap();
    assert!(!cpu.flag_i());

    // Nothing left to service
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0203);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_clear_irq_drops_request() {
    let mut cpu = setup_cpu(&[0xEA], true);
    cpu.request_irq();
    cpu.clear_irq();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0201);
}

#[test]
fn test_nmi_ignores_interrupt_disable() {
    let mut cpu = setup_cpu(&[0xEA], false);
    cpu.memory_mut().write(0xA000, 0xEA); // NOP
    cpu.request_nmi();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0xA001);
    assert!(!cpu.nmi_pending());
    assert_eq!(cpu.cycles(), 9);
}

#[test]
fn test_nmi_handler_runs_before_irq_handler() {
    let mut cpu = setup_cpu(&[0xEA], true);
    cpu.request_irq();
    cpu.request_nmi();

    let mut records = Vec::new();
    cpu.step_traced(|record| records.push(*record)).unwrap();

    let kinds: Vec<_> = records.iter().map(|r| (r.kind, r.address)).collect();
    assert_eq!(kinds[0], (TraceKind::Interrupt { vector: IRQ_VECTOR }, 0x0200));
    assert_eq!(kinds[1], (TraceKind::Interrupt { vector: NMI_VECTOR }, 0x9000));
    // The NMI handler's RTI returns into the IRQ handler
    assert_eq!(records[2].address, 0xA000);
    assert_eq!(cpu.pc(), 0x9000);
    assert!(!cpu.irq_pending());
    assert!(!cpu.nmi_pending());
    assert_eq!(cpu.cycles(), 20);

    // The IRQ handler's RTI returns to the program
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0200);
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_vectors_are_documented_addresses() {
    assert_eq!(NMI_VECTOR, 0xFFFA);
    assert_eq!(IRQ_VECTOR, 0xFFFE);
}
