//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Interrupt lines**: pending IRQ and NMI requests
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Service pending interrupts, then execute one instruction
//! - `step_traced()`: Same, reporting a `TraceRecord` to a callback
//! - `run_for_cycles()`: Execute until cycle budget exhausted
//!
//! ## Cycle Accounting
//!
//! Cycles are not taken from the opcode table. Every bus access goes through
//! `read_byte`/`write_byte`, which bill one cycle each, and instructions call
//! `tick` for the internal cycles the hardware spends without touching the
//! bus. The table's `base_cycles` is a description of the result.

use log::{debug, trace, warn};

use crate::registers::UNUSED_STATUS_BIT;
use crate::{instructions, ExecutionError, Flag, MemoryBus, OpcodeMetadata, Register};
use crate::{SetupError, OPCODE_TABLE};

/// Address of the NMI vector (low byte; high byte follows).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Address of the reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the hardware stack page.
const STACK_BASE: u16 = 0x0100;

/// What a trace record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// An instruction was fetched and executed.
    Instruction {
        opcode: u8,
        metadata: OpcodeMetadata,
    },

    /// A hardware interrupt was serviced through `vector`.
    Interrupt { vector: u16 },
}

/// Snapshot reported by [`CPU::step_traced`].
///
/// A step reports one record per interrupt it entered, then one for the
/// instruction. Registers are captured after the event; `address` is the
/// opcode address, or the interrupted PC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    pub address: u16,
    pub kind: TraceKind,
    /// Cycles consumed by this event alone.
    pub cycles: u64,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
}

/// 6502 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags, program counter,
/// stack pointer, and cycle counter. It is generic over the memory implementation via the
/// `MemoryBus` trait.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use sim6502::{CPU, FlatMemory, MemoryBus};
///
/// // Create memory and set reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// // Initialize CPU - loads PC from reset vector
/// let cpu = CPU::new(memory);
///
/// // Inspect initial state
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.flag_i(), true); // Interrupt disable set on reset
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag (set when BRK instruction executed)
    pub(crate) flag_b: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow/underflow)
    pub(crate) flag_c: bool,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// IRQ request waiting for the next step
    irq_pending: bool,

    /// NMI edge latched; serviced on the next step
    nmi_pending: bool,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// The CPU is initialized to the 6502 power-on reset state:
    /// - Program counter (PC) is loaded from the reset vector at addresses 0xFFFC/0xFFFD (little-endian)
    /// - Stack pointer (SP) is set to 0xFD
    /// - Status register has Interrupt Disable flag set (I = true)
    /// - All other registers (A, X, Y) are zeroed
    /// - Cycle counter is reset to 0
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let cpu = CPU::new(mem);
    /// assert_eq!(cpu.pc(), 0x8000);
    /// ```
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0xFD,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: true,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            irq_pending: false,
            nmi_pending: false,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Re-runs the reset sequence against the current memory.
    ///
    /// Registers and flags return to their power-on values, pending
    /// interrupt requests are dropped, the cycle counter restarts at 0 and
    /// PC is reloaded from the reset vector. Memory is left untouched.
    pub fn reset(&mut self) {
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.sp = 0xFD;
        self.set_status(Flag::I.mask());
        self.cycles = 0;
        self.irq_pending = false;
        self.nmi_pending = false;

        let low = self.memory.read(RESET_VECTOR);
        let high = self.memory.read(RESET_VECTOR.wrapping_add(1));
        self.pc = u16::from_le_bytes([low, high]);

        debug!("reset: PC=${:04X}", self.pc);
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Pending interrupts are sampled first. An unmasked IRQ and then an NMI
    /// are entered (7 cycles each), after which the opcode at the new PC is
    /// fetched, decoded through `OPCODE_TABLE` and executed. When both are
    /// taken the NMI handler runs first and returns into the IRQ handler.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::UndefinedInstruction` when the fetched byte
    /// is not a documented opcode. The fetch cycle is counted and PC is left
    /// after the offending byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus, ExecutionError};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    /// mem.write(0x8001, 0x02); // not a 6502 instruction
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.step().unwrap();
    /// assert_eq!(cpu.cycles(), 2);
    ///
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::UndefinedInstruction { opcode: 0x02, address: 0x8001 })
    /// );
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        self.step_traced(|_| {})
    }

    /// Executes one step like [`step`](Self::step) and hands a
    /// [`TraceRecord`] for each event of it to `observer`.
    ///
    /// Interrupt entries are reported as they happen. The instruction is
    /// not reported when its opcode is undefined.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus, Mnemonic};
    /// use sim6502::cpu::TraceKind;
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x0000, 0xA9); // LDA #$42
    /// mem.write(0x0001, 0x42);
    ///
    /// let mut cpu = CPU::new(mem);
    /// let mut seen = Vec::new();
    /// cpu.step_traced(|record| seen.push(*record)).unwrap();
    ///
    /// assert_eq!(seen[0].address, 0x0000);
    /// assert_eq!(seen[0].cycles, 2);
    /// assert_eq!(seen[0].a, 0x42);
    /// match seen[0].kind {
    ///     TraceKind::Instruction { metadata, .. } => assert_eq!(metadata.mnemonic, Mnemonic::LDA),
    ///     _ => panic!("expected an instruction"),
    /// }
    /// ```
    pub fn step_traced<F>(&mut self, mut observer: F) -> Result<(), ExecutionError>
    where
        F: FnMut(&TraceRecord),
    {
        // Both lines are sampled once per step. A masked IRQ is dropped.
        let irq = std::mem::take(&mut self.irq_pending) && !self.flag_i;
        let nmi = std::mem::take(&mut self.nmi_pending);

        // IRQ is entered first so the NMI handler runs before the IRQ handler.
        if irq {
            self.enter_interrupt(IRQ_VECTOR, &mut observer);
        }
        if nmi {
            self.enter_interrupt(NMI_VECTOR, &mut observer);
        }

        let start_cycles = self.cycles;
        let address = self.pc;
        let opcode = self.fetch_byte();
        let metadata = match OPCODE_TABLE[opcode as usize] {
            Some(metadata) => metadata,
            None => {
                warn!("undefined opcode ${:02X} at ${:04X}", opcode, address);
                return Err(ExecutionError::UndefinedInstruction { opcode, address });
            }
        };

        instructions::execute(self, metadata);

        trace!(
            "${:04X}  {:02X}  {:<3}  A={:02X} X={:02X} Y={:02X} SP={:02X} P={:02X} CYC={}",
            address,
            opcode,
            metadata.mnemonic,
            self.a,
            self.x,
            self.y,
            self.sp,
            self.status(),
            self.cycles
        );

        observer(&self.trace_record(
            address,
            TraceKind::Instruction { opcode, metadata },
            start_cycles,
        ));

        Ok(())
    }

    fn enter_interrupt<F>(&mut self, vector: u16, observer: &mut F)
    where
        F: FnMut(&TraceRecord),
    {
        let start_cycles = self.cycles;
        let address = self.pc;
        self.service_interrupt(vector);
        observer(&self.trace_record(address, TraceKind::Interrupt { vector }, start_cycles));
    }

    fn trace_record(&self, address: u16, kind: TraceKind, start_cycles: u64) -> TraceRecord {
        TraceRecord {
            address,
            kind,
            cycles: self.cycles - start_cycles,
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            pc: self.pc,
            status: self.status(),
        }
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or an error occurs.
    /// Returns the actual number of cycles consumed (may be slightly more than budget
    /// due to instruction granularity).
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8010 {
    ///     mem.write(addr, 0xEA); // NOP
    /// }
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.run_for_cycles(10).unwrap(), 10);
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Interrupt Lines ==========

    /// Raises the IRQ line.
    ///
    /// The request is sampled by the next step and consumed there. It is
    /// serviced only if the I flag is clear at that point, otherwise it is
    /// dropped.
    pub fn request_irq(&mut self) {
        self.irq_pending = true;
    }

    /// Drops a pending IRQ request that has not been serviced yet.
    pub fn clear_irq(&mut self) {
        self.irq_pending = false;
    }

    /// Latches a non-maskable interrupt, serviced at the start of the next step
    /// regardless of the I flag.
    pub fn request_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Returns true while an IRQ request is waiting to be serviced.
    pub fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    /// Returns true while an NMI is waiting to be serviced.
    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// Hardware interrupt entry: two internal cycles, push PC and status
    /// (B clear), set I, load PC from `vector`.
    fn service_interrupt(&mut self, vector: u16) {
        debug!(
            "interrupt via ${:04X} at PC=${:04X} (cycle {})",
            vector, self.pc, self.cycles
        );
        self.tick();
        self.tick();
        self.push_word(self.pc);
        let status = self.status() & !Flag::B.mask();
        self.push(status);
        self.flag_i = true;
        self.pc = self.read_word(vector);
    }

    // ========== Bus Primitives ==========

    /// Spends one internal cycle without a bus access.
    pub(crate) fn tick(&mut self) {
        self.cycles += 1;
    }

    /// Reads a byte from the bus (1 cycle).
    pub(crate) fn read_byte(&mut self, address: u16) -> u8 {
        self.tick();
        self.memory.read(address)
    }

    /// Writes a byte to the bus (1 cycle).
    pub(crate) fn write_byte(&mut self, address: u16, value: u8) {
        self.tick();
        self.memory.write(address, value);
    }

    /// Reads a little-endian word (2 cycles).
    pub(crate) fn read_word(&mut self, address: u16) -> u16 {
        let low = self.read_byte(address);
        let high = self.read_byte(address.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.read_byte(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads the little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let low = self.fetch_byte();
        let high = self.fetch_byte();
        u16::from_le_bytes([low, high])
    }

    /// Writes to `0x0100 + SP`, then decrements SP.
    pub(crate) fn push(&mut self, value: u8) {
        self.write_byte(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pushes high byte first so the word reads little-endian in memory.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push(high);
        self.push(low);
    }

    /// Increments SP, then reads from `0x0100 + SP`.
    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.read_byte(STACK_BASE | self.sp as u16)
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let low = self.pull();
        let high = self.pull();
        u16::from_le_bytes([low, high])
    }

    /// Sets Z and N from a result byte.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    /// Loads flags from a pulled status byte. Bits 4 and 5 have no
    /// storage on the chip, so B keeps its current value.
    pub(crate) fn restore_status(&mut self, value: u8) {
        let flag_b = self.flag_b;
        self.set_status(value);
        self.flag_b = flag_b;
    }

    /// Reads one of the 8-bit registers. PC reads as its low byte.
    pub(crate) fn byte_register(&self, register: Register) -> u8 {
        match register {
            Register::A => self.a,
            Register::X => self.x,
            Register::Y => self.y,
            Register::SP => self.sp,
            Register::PC => self.pc as u8,
        }
    }

    /// Writes one of the 8-bit registers. PC is replaced in its low byte only.
    pub(crate) fn set_byte_register(&mut self, register: Register, value: u8) {
        match register {
            Register::A => self.a = value,
            Register::X => self.x = value,
            Register::Y => self.y = value,
            Register::SP => self.sp = value,
            Register::PC => self.pc = (self.pc & 0xFF00) | value as u16,
        }
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let cpu = CPU::new(mem);
    /// assert_eq!(cpu.a(), 0x00); // Initial value
    /// ```
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns any register widened to 16 bits.
    pub fn register(&self, register: Register) -> u16 {
        match register {
            Register::PC => self.pc,
            other => self.byte_register(other) as u16,
        }
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    ///
    /// // I flag set (bit 2), bit 5 always 1
    /// assert_eq!(cpu.status(), 0b0010_0100);
    /// ```
    pub fn status(&self) -> u8 {
        Flag::ALL
            .iter()
            .filter(|&&f| self.flag(f))
            .fold(UNUSED_STATUS_BIT, |status, f| status | f.mask())
    }

    /// Returns the total number of CPU cycles executed since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Borrows the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutably borrows the memory bus. Writes through it cost no cycles.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Status Flag Getters ==========

    /// Returns the value of any status flag.
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::C => self.flag_c,
            Flag::Z => self.flag_z,
            Flag::I => self.flag_i,
            Flag::D => self.flag_d,
            Flag::B => self.flag_b,
            Flag::V => self.flag_v,
            Flag::N => self.flag_n,
        }
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets any register from a 16-bit value.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::RegisterOutOfRange` if `value` does not fit the
    /// register's width; the register is left unchanged.
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, Register};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.set_register(Register::PC, 0x1234).unwrap();
    /// assert!(cpu.set_register(Register::X, 0x100).is_err());
    /// ```
    pub fn set_register(&mut self, register: Register, value: u16) -> Result<(), SetupError> {
        if value > register.max_value() {
            return Err(SetupError::RegisterOutOfRange { register, value });
        }
        match register {
            Register::PC => self.pc = value,
            other => self.set_byte_register(other, value as u8),
        }
        Ok(())
    }

    /// Sets or clears one status flag.
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::C => self.flag_c = value,
            Flag::Z => self.flag_z = value,
            Flag::I => self.flag_i = value,
            Flag::D => self.flag_d = value,
            Flag::B => self.flag_b = value,
            Flag::V => self.flag_v = value,
            Flag::N => self.flag_n = value,
        }
    }

    /// Unpacks a status byte into the seven flags. Bit 5 is ignored.
    pub fn set_status(&mut self, value: u8) {
        for flag in Flag::ALL {
            self.set_flag(flag, value & flag.mask() != 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn cpu_with_reset_vector() -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        CPU::new(mem)
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = cpu_with_reset_vector();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);

        assert!(cpu.flag_i());
        assert!(!cpu.flag_n());
        assert!(!cpu.flag_v());
        assert!(!cpu.flag_b());
        assert!(!cpu.flag_d());
        assert!(!cpu.flag_z());
        assert!(!cpu.flag_c());
        assert!(!cpu.irq_pending());
        assert!(!cpu.nmi_pending());
    }

    #[test]
    fn test_status_round_trip() {
        let mut cpu = cpu_with_reset_vector();
        cpu.set_status(0b1100_1011);

        assert!(cpu.flag_n());
        assert!(cpu.flag_v());
        assert!(cpu.flag_d());
        assert!(!cpu.flag_i());
        assert!(cpu.flag_z());
        assert!(cpu.flag_c());
        assert_eq!(cpu.status(), 0b1110_1011);
    }

    #[test]
    fn test_restore_status_keeps_break_flag() {
        let mut cpu = cpu_with_reset_vector();
        cpu.restore_status(0xFF);
        assert!(!cpu.flag_b());

        cpu.flag_b = true;
        cpu.restore_status(0x00);
        assert!(cpu.flag_b());
    }

    #[test]
    fn test_bus_primitives_bill_cycles() {
        let mut cpu = cpu_with_reset_vector();
        cpu.memory_mut().write(0x8000, 0x34);
        cpu.memory_mut().write(0x8001, 0x12);

        assert_eq!(cpu.fetch_word(), 0x1234);
        assert_eq!(cpu.pc(), 0x8002);
        assert_eq!(cpu.cycles(), 2);

        cpu.tick();
        assert_eq!(cpu.cycles(), 3);
    }

    #[test]
    fn test_stack_wraps_within_page_one() {
        let mut cpu = cpu_with_reset_vector();
        cpu.set_sp(0x00);

        cpu.push(0xAB);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.memory().read(0x0100), 0xAB);

        assert_eq!(cpu.pull(), 0xAB);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_push_word_is_little_endian_in_memory() {
        let mut cpu = cpu_with_reset_vector();
        cpu.push_word(0xBEEF);

        assert_eq!(cpu.memory().read(0x01FD), 0xBE);
        assert_eq!(cpu.memory().read(0x01FC), 0xEF);
        assert_eq!(cpu.pull_word(), 0xBEEF);
    }

    #[test]
    fn test_undefined_opcode_counts_fetch() {
        let mut cpu = cpu_with_reset_vector();
        cpu.memory_mut().write(0x8000, 0xFF);

        let result = cpu.step();

        assert_eq!(
            result,
            Err(ExecutionError::UndefinedInstruction {
                opcode: 0xFF,
                address: 0x8000
            })
        );
        assert_eq!(cpu.pc(), 0x8001);
        assert_eq!(cpu.cycles(), 1);
    }

    #[test]
    fn test_set_register_rejects_wide_values() {
        let mut cpu = cpu_with_reset_vector();

        assert!(cpu.set_register(Register::A, 0xFF).is_ok());
        assert_eq!(
            cpu.set_register(Register::SP, 0x1FF),
            Err(SetupError::RegisterOutOfRange {
                register: Register::SP,
                value: 0x1FF
            })
        );
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.register(Register::A), 0xFF);
    }

    #[test]
    fn test_reset_reloads_vector_and_drops_requests() {
        let mut cpu = cpu_with_reset_vector();
        cpu.set_a(0x12);
        cpu.set_pc(0x1234);
        cpu.request_irq();
        cpu.request_nmi();
        cpu.tick();

        cpu.reset();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.cycles(), 0);
        assert!(!cpu.irq_pending());
        assert!(!cpu.nmi_pending());
    }

    #[test]
    fn test_run_for_cycles_nops() {
        let mut cpu = cpu_with_reset_vector();
        for addr in 0x8000..=0x8010 {
            cpu.memory_mut().write(addr, 0xEA);
        }

        assert_eq!(cpu.run_for_cycles(10), Ok(10));
        assert_eq!(cpu.pc(), 0x8005);
    }
}
