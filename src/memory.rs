//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from the
//! storage it executes against, and `FlatMemory`, the plain 64KB array the
//! simulator uses.
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Addresses are `u16`, so every address is in range by construction
//! - Zero page, stack page and vectors are conventions of the processor, not
//!   of the storage

use crate::loader::MemoryImage;

/// Memory bus trait for CPU to read/write bytes.
///
/// The CPU accesses all memory through this abstraction and bills one cycle
/// per call; implementations only store bytes.
///
/// # Examples
///
/// ```
/// use sim6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// // Write a value
/// mem.write(0x1234, 0x42);
///
/// // Read it back
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// A bus that captures writes to an output port, the way a test can watch a
/// program's output without scanning memory:
///
/// ```
/// use sim6502::{FlatMemory, MemoryBus};
///
/// const PORT: u16 = 0xF001;
///
/// struct PortCapture {
///     memory: FlatMemory,
///     output: Vec<u8>,
/// }
///
/// impl MemoryBus for PortCapture {
///     fn read(&self, addr: u16) -> u8 {
///         self.memory.read(addr)
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr == PORT {
///             self.output.push(value);
///         } else {
///             self.memory.write(addr, value);
///         }
///     }
/// }
///
/// let mut bus = PortCapture { memory: FlatMemory::new(), output: Vec::new() };
/// bus.write(PORT, b'H');
/// bus.write(PORT, b'i');
/// assert_eq!(bus.output, b"Hi");
/// assert_eq!(bus.read(PORT), 0x00);
/// ```
pub trait MemoryBus {
    /// Returns the byte at `addr`. Never fails and never panics.
    fn read(&self, addr: u16) -> u8;

    /// Stores `value` at `addr`. Never fails; an implementation may drop
    /// writes to addresses it treats as read-only.
    fn write(&mut self, addr: u16, value: u8);
}

/// Flat 64KB memory, zero-filled at construction.
///
/// # Examples
///
/// ```
/// use sim6502::{FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x0200, 0xEA);
/// assert_eq!(memory.read(0x0200), 0xEA);
///
/// memory.reset();
/// assert_eq!(memory.read(0x0200), 0x00);
/// ```
pub struct FlatMemory {
    bytes: Box<[u8; 0x1_0000]>,
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; 0x1_0000]),
        }
    }

    /// Zero-fills the whole address space.
    pub fn reset(&mut self) {
        self.bytes.fill(0);
    }

    /// Copies every byte of a memory image to its address.
    ///
    /// Addresses not present in the image keep their current contents.
    pub fn load(&mut self, image: &MemoryImage) {
        image.load_into(self);
    }

    /// Returns the whole address space as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        // Initially all zeros
        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);

        // Neighbours untouched
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_flat_memory_boundaries() {
        let mut mem = FlatMemory::new();

        mem.write(0x0000, 0x01);
        mem.write(0x00FF, 0x0F);
        mem.write(0x01FF, 0x1F);
        mem.write(0xFFFF, 0xFF);

        assert_eq!(mem.read(0x0000), 0x01);
        assert_eq!(mem.read(0x00FF), 0x0F);
        assert_eq!(mem.read(0x01FF), 0x1F);
        assert_eq!(mem.read(0xFFFF), 0xFF);
    }

    #[test]
    fn test_reset_zero_fills() {
        let mut mem = FlatMemory::new();
        mem.write(0x0000, 0xAA);
        mem.write(0x8000, 0xBB);
        mem.write(0xFFFF, 0xCC);

        mem.reset();

        assert!(mem.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_image() {
        let mut image = MemoryImage::new();
        image.insert_bytes(0x0300, &[0xA9, 0x01]);

        let mut mem = FlatMemory::new();
        mem.write(0x0302, 0x77);
        mem.load(&image);

        assert_eq!(mem.read(0x0300), 0xA9);
        assert_eq!(mem.read(0x0301), 0x01);
        assert_eq!(mem.read(0x0302), 0x77);
    }
}
