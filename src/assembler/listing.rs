//! Assembly listing: the source text annotated with what each line produced.
//!
//! ```text
//!                           ; countdown
//! pc = 0200                         .ORG $0200
//! = 05                      COUNT   .EQU 5
//! 0200 : A2 05              START   LDX #COUNT
//! 0202 : Reserved 4 Bytes   BUF     .DS 4
//! ```

use std::fmt;

/// Width of the annotation column before the source text.
const ANNOTATION_WIDTH: usize = 25;

/// What one source line contributed to the assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingField {
    /// `.ORG` moved the location counter
    Origin(u16),

    /// `.EQU` defined a constant
    Equate(u16),

    /// An instruction or `.DB` emitted bytes at `address`
    Code { address: u16, bytes: Vec<u8> },

    /// `.DS` skipped `len` bytes at `address`
    Reserve { address: u16, len: u16 },

    /// A label-only line or `.END`, shown with the location counter
    Address(u16),
}

/// Annotation for one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Line number (1-indexed)
    pub line: usize,
    pub field: ListingField,
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingField::Origin(address) => write!(f, "pc = {:04X}", address),
            ListingField::Equate(value) if *value <= 0xFF => write!(f, "= {:02X}", value),
            ListingField::Equate(value) => write!(f, "= {:04X}", value),
            ListingField::Code { address, bytes } => {
                write!(f, "{:04X} :", address)?;
                for byte in bytes {
                    write!(f, " {:02X}", byte)?;
                }
                Ok(())
            }
            ListingField::Reserve { address, len } => {
                write!(f, "{:04X} : Reserved {} Bytes", address, len)
            }
            ListingField::Address(address) => write!(f, "{:04X}", address),
        }
    }
}

/// Renders `source` with the annotation of each line in a fixed-width
/// column to its left. Lines without an entry (blanks, comments, lines after
/// `.END`) get an empty column.
pub fn render(entries: &[ListingEntry], source: &str) -> String {
    let mut entries = entries.iter().peekable();
    let mut out = String::new();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let mut annotation = String::new();
        while let Some(entry) = entries.next_if(|entry| entry.line <= line) {
            if entry.line == line {
                annotation = entry.field.to_string();
            }
        }

        let row = format!("{:<width$} {}", annotation, text, width = ANNOTATION_WIDTH);
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out
}
