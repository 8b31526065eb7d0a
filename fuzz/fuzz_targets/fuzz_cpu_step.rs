//! Fuzz target for processor stepping.
//!
//! Builds an arbitrary processor state through `ProcessorSetup`, executes one
//! step and checks interrupt entry and the cycle accounting against the
//! opcode table.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::{ExecutionError, Flag, ProcessorSetup, Register, TraceKind, OPCODE_TABLE};

/// Arbitrary register and flag state
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    flags: [bool; 7],
    irq: bool,
    nmi: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Bytes at PC (opcode + operands)
    instruction_bytes: [u8; 3],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
}

fuzz_target!(|input: FuzzInput| {
    let state = &input.cpu_state;
    let overlay = input
        .zero_page
        .iter()
        .enumerate()
        .map(|(i, &b)| (i as u32, b))
        .chain(
            input
                .stack_page
                .iter()
                .enumerate()
                .map(|(i, &b)| (0x0100 + i as u32, b)),
        );

    let mut setup = ProcessorSetup::new()
        .instruction(&input.instruction_bytes)
        .data_map(overlay)
        .register(Register::A, state.a as u16)
        .register(Register::X, state.x as u16)
        .register(Register::Y, state.y as u16)
        .register(Register::SP, state.sp as u16)
        .register(Register::PC, state.pc);
    for (flag, &value) in Flag::ALL.iter().zip(state.flags.iter()) {
        setup = setup.flag(*flag, value);
    }

    // Programs that would run past $FFFF are rejected, not a bug
    let mut cpu = match setup.build() {
        Ok(cpu) => cpu,
        Err(_) => return,
    };
    if state.irq {
        cpu.request_irq();
    }
    if state.nmi {
        cpu.request_nmi();
    }

    let mut interrupts = 0u64;
    let mut executed = None;
    let result = cpu.step_traced(|record| match record.kind {
        TraceKind::Interrupt { .. } => {
            assert_eq!(record.cycles, 7);
            interrupts += 1;
        }
        TraceKind::Instruction { metadata, .. } => executed = Some((metadata, record.cycles)),
    });

    let expected = u64::from(state.irq && !state.flags[2]) + u64::from(state.nmi);
    assert_eq!(interrupts, expected);
    assert!(!cpu.irq_pending() && !cpu.nmi_pending());

    match result {
        Ok(()) => {
            let (metadata, cycles) = executed.expect("a successful step reports its instruction");
            let base = metadata.base_cycles as u64;
            // Page crossings and taken branches add at most two cycles
            assert!(cycles >= base && cycles <= base + 2);
            assert_eq!(cpu.cycles(), interrupts * 7 + cycles);
        }
        Err(ExecutionError::UndefinedInstruction { opcode, .. }) => {
            assert!(executed.is_none());
            assert!(OPCODE_TABLE[opcode as usize].is_none());
            assert_eq!(cpu.cycles(), interrupts * 7 + 1);
        }
    }
});
