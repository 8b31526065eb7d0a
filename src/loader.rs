//! # Memory Images and Intel HEX
//!
//! A [`MemoryImage`] is a sparse, ordered address→byte map: the only thing
//! the processor needs to be handed a program. The assembler produces one,
//! Intel HEX text parses into one, and [`FlatMemory::load`](crate::FlatMemory::load)
//! copies one onto the bus.
//!
//! Intel HEX support covers what a 16-bit address space needs: data (00) and
//! end-of-file (01) records. Segment/linear address records (02, 04) are
//! accepted only when they select offset zero; start address records (03, 05)
//! carry no memory contents and are skipped.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use log::debug;
use thiserror::Error;

use crate::MemoryBus;

/// Largest number of data bytes written per emitted record.
const BYTES_PER_RECORD: usize = 16;

const RECORD_DATA: u8 = 0x00;
const RECORD_EOF: u8 = 0x01;
const RECORD_EXTENDED_SEGMENT: u8 = 0x02;
const RECORD_START_SEGMENT: u8 = 0x03;
const RECORD_EXTENDED_LINEAR: u8 = 0x04;
const RECORD_START_LINEAR: u8 = 0x05;

/// End-of-file record terminating every emitted file.
const EOF_LINE: &str = ":00000001FF";

/// Sparse program image: address → byte, iterated in address order.
///
/// # Examples
///
/// ```
/// use sim6502::MemoryImage;
///
/// let mut image = MemoryImage::new();
/// image.insert_bytes(0x0200, &[0xA9, 0x01]);
/// image.insert(0x0300, 0xEA);
///
/// assert_eq!(image.len(), 3);
/// assert_eq!(image.get(0x0201), Some(0x01));
/// assert_eq!(image.get(0x0202), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryImage {
    bytes: BTreeMap<u16, u8>,
}

impl MemoryImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the byte at `address`, replacing any previous value.
    pub fn insert(&mut self, address: u16, value: u8) {
        self.bytes.insert(address, value);
    }

    /// Sets consecutive bytes starting at `start`. Addresses wrap at 0xFFFF.
    pub fn insert_bytes(&mut self, start: u16, values: &[u8]) {
        let mut address = start;
        for &value in values {
            self.bytes.insert(address, value);
            address = address.wrapping_add(1);
        }
    }

    pub fn get(&self, address: u16) -> Option<u8> {
        self.bytes.get(&address).copied()
    }

    /// Iterates `(address, byte)` pairs in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u8)> + '_ {
        self.bytes.iter().map(|(&address, &value)| (address, value))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writes every byte of the image through `bus`.
    pub fn load_into<B: MemoryBus + ?Sized>(&self, bus: &mut B) {
        for (address, value) in self.iter() {
            bus.write(address, value);
        }
        debug!("loaded {} bytes into memory", self.len());
    }

    /// Groups the image into runs of consecutive addresses.
    fn runs(&self) -> Vec<(u16, Vec<u8>)> {
        let mut runs: Vec<(u16, Vec<u8>)> = Vec::new();
        for (address, value) in self.iter() {
            match runs.last_mut() {
                Some((start, bytes)) if *start as usize + bytes.len() == address as usize => {
                    bytes.push(value);
                }
                _ => runs.push((address, vec![value])),
            }
        }
        runs
    }
}

impl FromIterator<(u16, u8)> for MemoryImage {
    fn from_iter<I: IntoIterator<Item = (u16, u8)>>(iter: I) -> Self {
        Self {
            bytes: iter.into_iter().collect(),
        }
    }
}

/// Errors from [`parse_intel_hex`]. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("line {line}: record does not start with ':'")]
    MissingStartCode { line: usize },

    #[error("line {line}: record contains non-hex characters or an odd digit count")]
    InvalidDigits { line: usize },

    #[error("line {line}: record length does not match its byte count")]
    LengthMismatch { line: usize },

    #[error("line {line}: checksum mismatch")]
    ChecksumMismatch { line: usize },

    #[error("line {line}: unsupported record type {record_type:02X}")]
    UnsupportedRecord { line: usize, record_type: u8 },

    #[error("line {line}: record type {record_type:02X} selects a non-zero address offset")]
    NonZeroOffset { line: usize, record_type: u8 },

    #[error("line {line}: data at ${address:X} runs past $FFFF")]
    AddressOverflow { line: usize, address: u32 },
}

/// Parses Intel HEX text into a memory image.
///
/// Blank lines are skipped and anything after the end-of-file record is
/// ignored. A file without an end-of-file record is accepted.
///
/// # Examples
///
/// ```
/// use sim6502::parse_intel_hex;
///
/// let image = parse_intel_hex(":03020000A9010051\n:00000001FF\n").unwrap();
/// assert_eq!(image.get(0x0200), Some(0xA9));
/// assert_eq!(image.get(0x0202), Some(0x00));
/// ```
pub fn parse_intel_hex(text: &str) -> Result<MemoryImage, HexError> {
    let mut image = MemoryImage::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let record = raw.trim();
        if record.is_empty() {
            continue;
        }

        let digits = record
            .strip_prefix(':')
            .ok_or(HexError::MissingStartCode { line })?;
        let bytes = decode_hex(digits).ok_or(HexError::InvalidDigits { line })?;

        if bytes.len() < 5 || bytes.len() != bytes[0] as usize + 5 {
            return Err(HexError::LengthMismatch { line });
        }
        if bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b)) != 0 {
            return Err(HexError::ChecksumMismatch { line });
        }

        let offset = u16::from_be_bytes([bytes[1], bytes[2]]);
        let record_type = bytes[3];
        let data = &bytes[4..bytes.len() - 1];

        match record_type {
            RECORD_DATA => {
                for (i, &value) in data.iter().enumerate() {
                    let address = offset as u32 + i as u32;
                    if address > 0xFFFF {
                        return Err(HexError::AddressOverflow { line, address });
                    }
                    image.insert(address as u16, value);
                }
            }
            RECORD_EOF => break,
            RECORD_EXTENDED_SEGMENT | RECORD_EXTENDED_LINEAR => {
                if data.iter().any(|&b| b != 0) {
                    return Err(HexError::NonZeroOffset { line, record_type });
                }
            }
            RECORD_START_SEGMENT | RECORD_START_LINEAR => {}
            _ => return Err(HexError::UnsupportedRecord { line, record_type }),
        }
    }

    debug!("parsed Intel HEX: {} bytes", image.len());
    Ok(image)
}

/// Renders a memory image as Intel HEX.
///
/// Consecutive addresses are packed into data records of at most 16 bytes;
/// the output ends with the `:00000001FF` end-of-file record and a newline.
///
/// # Examples
///
/// ```
/// use sim6502::{to_intel_hex, MemoryImage};
///
/// let mut image = MemoryImage::new();
/// image.insert_bytes(0x0200, &[0xA9, 0x01, 0x00]);
///
/// assert_eq!(to_intel_hex(&image), ":03020000A9010051\n:00000001FF\n");
/// ```
pub fn to_intel_hex(image: &MemoryImage) -> String {
    let mut out = String::new();

    for (start, bytes) in image.runs() {
        let mut address = start;
        for chunk in bytes.chunks(BYTES_PER_RECORD) {
            let [high, low] = address.to_be_bytes();
            let mut record = vec![chunk.len() as u8, high, low, RECORD_DATA];
            record.extend_from_slice(chunk);
            let checksum = record
                .iter()
                .fold(0u8, |sum, &b| sum.wrapping_add(b))
                .wrapping_neg();
            record.push(checksum);

            out.push(':');
            for byte in record {
                let _ = write!(out, "{:02X}", byte);
            }
            out.push('\n');

            address = address.wrapping_add(chunk.len() as u16);
        }
    }

    out.push_str(EOF_LINE);
    out.push('\n');
    out
}

fn decode_hex(digits: &str) -> Option<Vec<u8>> {
    if digits.len() % 2 != 0 || !digits.is_ascii() {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
        .collect()
}
