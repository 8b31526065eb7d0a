//! # Register and Flag Selectors
//!
//! Closed sets naming the processor's registers and status flags. Instruction
//! handlers that behave the same across registers (loads, stores, transfers,
//! compares, increments) take a `Register` instead of being duplicated per
//! register, and the setup harness uses both enums to describe initial state.

use std::fmt;

/// A programmer-visible register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    /// Accumulator
    A,
    /// X index register
    X,
    /// Y index register
    Y,
    /// Stack pointer (offset into page 1)
    SP,
    /// Program counter
    PC,
}

impl Register {
    /// Largest value the register can hold.
    pub const fn max_value(self) -> u16 {
        match self {
            Register::PC => 0xFFFF,
            _ => 0xFF,
        }
    }

    /// Assembler-style register name.
    pub const fn name(self) -> &'static str {
        match self {
            Register::A => "A",
            Register::X => "X",
            Register::Y => "Y",
            Register::SP => "SP",
            Register::PC => "PC",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A status register flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    /// Carry
    C,
    /// Zero
    Z,
    /// Interrupt disable
    I,
    /// Decimal mode
    D,
    /// Break
    B,
    /// Overflow
    V,
    /// Negative
    N,
}

impl Flag {
    /// Every flag, in status-byte bit order.
    pub const ALL: [Flag; 7] = [Flag::C, Flag::Z, Flag::I, Flag::D, Flag::B, Flag::V, Flag::N];

    /// Bit mask of this flag in the packed status byte (NV-BDIZC).
    pub const fn mask(self) -> u8 {
        match self {
            Flag::C => 0b0000_0001,
            Flag::Z => 0b0000_0010,
            Flag::I => 0b0000_0100,
            Flag::D => 0b0000_1000,
            Flag::B => 0b0001_0000,
            Flag::V => 0b0100_0000,
            Flag::N => 0b1000_0000,
        }
    }
}

/// Bit 5 of the status byte, which always reads as 1.
pub const UNUSED_STATUS_BIT: u8 = 0b0010_0000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_masks_are_distinct_and_skip_bit_5() {
        let combined = Flag::ALL.iter().fold(0u8, |acc, f| {
            assert_eq!(acc & f.mask(), 0, "{:?} overlaps another flag", f);
            acc | f.mask()
        });
        assert_eq!(combined, !UNUSED_STATUS_BIT);
    }

    #[test]
    fn test_register_widths() {
        assert_eq!(Register::A.max_value(), 0xFF);
        assert_eq!(Register::SP.max_value(), 0xFF);
        assert_eq!(Register::PC.max_value(), 0xFFFF);
    }

    #[test]
    fn test_register_display_uses_name() {
        assert_eq!(Register::SP.to_string(), "SP");
        assert_eq!(format!("{}", Register::A), Register::A.name());
    }
}
