//! 6502 Assembler Module
//!
//! Converts assembly language source code into a [`MemoryImage`].
//!
//! # Dialect
//!
//! Source is case-insensitive and line oriented; `;` starts a comment.
//!
//! ```text
//!         .ORG $0200          ; set the location counter
//! COUNT   .EQU 3              ; constant (one byte wide, so zero page)
//! START:  LDX #COUNT
//! LOOP    DEX
//!         BNE LOOP            ; branch to a label...
//!         BEQ +2              ; ...or by displacement from this branch
//! MSG     .DB 'Hi', $0D, 0    ; bytes and text
//! BUF     .DS 16              ; reserve space
//!         .END
//! ```
//!
//! Labels are 1-8 characters from `A-Z`, `0-9` and `_`, not starting with a
//! digit, and may not be `A` or a mnemonic. Numbers are `$hex`, `%binary` or
//! decimal; `'c'` is a character. Operands may name a symbol with an optional
//! `+n`/`-n` offset.
//!
//! # Passes
//!
//! Pass 1 parses every line, defines symbols and fixes each instruction's
//! addressing mode, and therefore its size. A zero-page form is chosen only
//! when the value is already known to be one byte wide; forward references
//! assemble as absolute. Pass 2 resolves symbols and emits bytes. Errors are
//! collected for a whole pass and returned together.

pub mod encoder;
pub mod lexer;
pub mod listing;
pub mod parser;
pub mod source_map;
pub mod symbol_table;

use log::debug;
use thiserror::Error;

use crate::loader::MemoryImage;
use crate::{AddressingMode, Mnemonic};
use listing::{ListingEntry, ListingField};
use parser::{ByteItem, Expression, Operand};
use source_map::{SourceLocation, SourceMap};
use symbol_table::SymbolTable;

/// Number of addresses the location counter may reach.
const ADDRESS_SPACE: u32 = 0x1_0000;

/// Longest label name.
const MAX_LABEL_LEN: usize = 8;

/// Complete output from assembling source code
#[derive(Debug, Clone)]
pub struct AssemblerOutput {
    /// Assembled bytes at their addresses
    pub image: MemoryImage,

    /// Every label and constant, in definition order
    pub symbols: Vec<Symbol>,

    /// Source map for debugging
    pub source_map: SourceMap,

    /// Per-line annotations for [`render_listing`](Self::render_listing)
    pub listing: Vec<ListingEntry>,

    /// Non-fatal warnings encountered during assembly
    pub warnings: Vec<AssemblerWarning>,
}

impl AssemblerOutput {
    /// Value of a symbol by (case-insensitive) name.
    pub fn symbol(&self, name: &str) -> Option<u16> {
        let name = name.to_ascii_uppercase();
        self.symbols.iter().find(|s| s.name == name).map(|s| s.value)
    }

    /// Listing of `source`, which must be the text that was assembled.
    ///
    /// Each line is prefixed with its address and emitted bytes, `pc =` for
    /// `.ORG`, `=` and the value for `.EQU`, or the size reserved by `.DS`.
    ///
    /// ```
    /// use sim6502::assemble;
    ///
    /// let source = " .ORG $0200\n LDA #$01";
    /// let listing = assemble(source).unwrap().render_listing(source);
    /// assert!(listing.lines().nth(1).unwrap().starts_with("0200 : A9 01 "));
    /// ```
    pub fn render_listing(&self, source: &str) -> String {
        listing::render(&self.listing, source)
    }
}

/// A symbol table entry mapping a label or constant to its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Label name (upper-cased)
    pub name: String,

    /// Address of a label, or value of a `.EQU` constant
    pub value: u16,

    /// Whether references assemble to zero-page forms
    pub zero_page: bool,

    /// Source line where label was defined
    pub defined_at: usize,
}

/// A non-fatal warning from the assembler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerWarning {
    /// Line number where warning occurred
    pub line: usize,

    /// Warning message
    pub message: String,
}

/// An error encountered during assembly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct AssemblerError {
    /// Error type classification
    pub error_type: ErrorType,

    /// Line number where error occurred (1-indexed)
    pub line: usize,

    /// Human-readable error message
    pub message: String,
}

impl AssemblerError {
    pub fn new(error_type: ErrorType, line: usize, message: impl Into<String>) -> Self {
        Self {
            error_type,
            line,
            message: message.into(),
        }
    }
}

/// Classification of assembly errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Syntax error (invalid format, unexpected character)
    SyntaxError,

    /// Undefined label reference
    UndefinedLabel,

    /// Duplicate label definition
    DuplicateLabel,

    /// Invalid label name (too long, starts with digit, etc.)
    InvalidLabel,

    /// Invalid mnemonic (not a recognized instruction)
    InvalidMnemonic,

    /// Invalid operand format for addressing mode
    InvalidOperand,

    /// Operand value out of range (e.g., immediate value > 255, branch too far)
    RangeError,

    /// Invalid directive usage
    InvalidDirective,
}

/// Assembler directive types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblerDirective {
    /// Set origin address (.ORG $XXXX)
    Origin { address: u16 },

    /// Insert literal bytes and text (.DB $XX, 'text', ...)
    Bytes { items: Vec<ByteItem>, len: u16 },

    /// Reserve space without emitting bytes (.DS n)
    Reserve { len: u16 },

    /// Define a constant (LABEL .EQU value)
    Equate { value: u16, zero_page: bool },

    /// Stop assembling (.END)
    End,
}

/// What a source line asks for, as understood in pass 1.
#[derive(Debug, Clone)]
enum StatementKind {
    Instruction {
        mnemonic: Mnemonic,
        mode: AddressingMode,
        operand: Operand,
    },
    Directive(AssemblerDirective),
    LabelOnly,
}

/// A parsed line with its location counter, carried from pass 1 to pass 2.
#[derive(Debug, Clone)]
struct Statement {
    address: u16,
    location: SourceLocation,
    kind: StatementKind,
}

/// Assemble source code into a memory image
///
/// # Returns
///
/// Ok(AssemblerOutput) on success, Err(Vec<AssemblerError>) on failure. If
/// pass 1 finds errors pass 2 does not run, so all reported errors come from
/// the same pass.
///
/// # Examples
///
/// ```
/// use sim6502::assemble;
///
/// let output = assemble(
///     "       .ORG $0300
///      START  LDA #$01
///             STA $80
///             JMP START",
/// )
/// .unwrap();
///
/// assert_eq!(output.image.get(0x0300), Some(0xA9));
/// assert_eq!(output.image.get(0x0302), Some(0x85));
/// assert_eq!(output.image.get(0x0305), Some(0x00));
/// assert_eq!(output.image.get(0x0306), Some(0x03));
/// assert_eq!(output.symbol("start"), Some(0x0300));
/// ```
pub fn assemble(source: &str) -> Result<AssemblerOutput, Vec<AssemblerError>> {
    let (statements, symbols) = first_pass(source)?;
    debug!(
        "assembler pass 1: {} statements, {} symbols",
        statements.len(),
        symbols.symbols().len()
    );

    let output = second_pass(&statements, symbols)?;
    debug!(
        "assembler pass 2: {} bytes, {} warnings",
        output.image.len(),
        output.warnings.len()
    );
    Ok(output)
}

/// Parses every line, defines symbols and sizes each statement.
fn first_pass(source: &str) -> Result<(Vec<Statement>, SymbolTable), Vec<AssemblerError>> {
    let mut errors = Vec::new();
    let mut symbols = SymbolTable::new();
    let mut statements = Vec::new();
    let mut pc: u32 = 0;

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;

        let fields = match lexer::split_line(text) {
            Ok(Some(fields)) => fields,
            Ok(None) => continue,
            Err(message) => {
                errors.push(AssemblerError::new(ErrorType::SyntaxError, line, message));
                continue;
            }
        };

        let location = SourceLocation {
            line,
            column: fields.column,
            length: fields.length,
        };

        let kind = match parse_statement(
            fields.operation.as_deref(),
            &fields.operand,
            fields.label.is_some(),
            &symbols,
            line,
        ) {
            Ok(kind) => kind,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };

        // Labels on .ORG lines name the new origin; .EQU defines its value
        let (label_value, label_zero_page) = match &kind {
            StatementKind::Directive(AssemblerDirective::Origin { address }) => {
                (*address as u32, *address <= 0xFF)
            }
            StatementKind::Directive(AssemblerDirective::Equate { value, zero_page }) => {
                (*value as u32, *zero_page)
            }
            _ => (pc, pc <= 0xFF),
        };

        if let Some(name) = fields.label {
            if let Err(error) = define_label(&mut symbols, name, label_value, label_zero_page, line)
            {
                errors.push(error);
            }
        }

        if let StatementKind::Directive(AssemblerDirective::Origin { address }) = &kind {
            pc = *address as u32;
        }

        let size = statement_size(&kind);
        if pc + size > ADDRESS_SPACE {
            errors.push(AssemblerError::new(
                ErrorType::RangeError,
                line,
                format!("statement at ${:04X} runs past $FFFF", pc),
            ));
            continue;
        }

        let end = matches!(kind, StatementKind::Directive(AssemblerDirective::End));
        statements.push(Statement {
            address: pc as u16,
            location,
            kind,
        });
        pc += size;

        if end {
            break;
        }
    }

    if errors.is_empty() {
        Ok((statements, symbols))
    } else {
        Err(errors)
    }
}

/// Resolves symbols and emits bytes for the statements of pass 1.
fn second_pass(
    statements: &[Statement],
    symbols: SymbolTable,
) -> Result<AssemblerOutput, Vec<AssemblerError>> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut image = MemoryImage::new();
    let mut source_map = SourceMap::new();
    let mut listing = Vec::new();

    for statement in statements {
        let line = statement.location.line;
        let address = statement.address;

        let bytes = match &statement.kind {
            StatementKind::Instruction {
                mnemonic,
                mode,
                operand,
            } => encoder::encode(*mnemonic, *mode, operand, statement.address, &symbols, line),
            StatementKind::Directive(AssemblerDirective::Bytes { items, .. }) => {
                emit_bytes(items, &symbols, line)
            }
            StatementKind::Directive(directive) => {
                let field = match directive {
                    AssemblerDirective::Origin { address } => ListingField::Origin(*address),
                    AssemblerDirective::Equate { value, .. } => ListingField::Equate(*value),
                    AssemblerDirective::Reserve { len } => ListingField::Reserve {
                        address,
                        len: *len,
                    },
                    _ => ListingField::Address(address),
                };
                listing.push(ListingEntry { line, field });
                continue;
            }
            StatementKind::LabelOnly => {
                listing.push(ListingEntry {
                    line,
                    field: ListingField::Address(address),
                });
                continue;
            }
        };

        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };

        for (offset, &byte) in bytes.iter().enumerate() {
            let target = address.wrapping_add(offset as u16);
            if image.get(target).is_some() {
                warnings.push(AssemblerWarning {
                    line,
                    message: format!("address ${:04X} assembled more than once", target),
                });
            }
            image.insert(target, byte);
        }
        source_map.add_mapping(address, bytes.len() as u16, statement.location);
        listing.push(ListingEntry {
            line,
            field: ListingField::Code { address, bytes },
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    source_map.finalize();
    Ok(AssemblerOutput {
        image,
        symbols: symbols.into_symbols(),
        source_map,
        listing,
        warnings,
    })
}

/// Classifies a line's operation and parses its operand.
fn parse_statement(
    operation: Option<&str>,
    operand: &str,
    has_label: bool,
    symbols: &SymbolTable,
    line: usize,
) -> Result<StatementKind, AssemblerError> {
    let Some(operation) = operation else {
        return Ok(StatementKind::LabelOnly);
    };

    if operation.starts_with('.') {
        return parse_directive(operation, operand, has_label, symbols, line)
            .map(StatementKind::Directive);
    }

    let mnemonic: Mnemonic = operation.parse().map_err(|_| {
        AssemblerError::new(
            ErrorType::InvalidMnemonic,
            line,
            format!("unknown mnemonic '{}'", operation),
        )
    })?;
    let operand = parser::parse_operand(operand)
        .map_err(|message| AssemblerError::new(ErrorType::InvalidOperand, line, message))?;
    let mode = encoder::select_mode(mnemonic, &operand, symbols, line)?;

    Ok(StatementKind::Instruction {
        mnemonic,
        mode,
        operand,
    })
}

fn parse_directive(
    name: &str,
    operand: &str,
    has_label: bool,
    symbols: &SymbolTable,
    line: usize,
) -> Result<AssemblerDirective, AssemblerError> {
    let invalid = |message: String| AssemblerError::new(ErrorType::InvalidDirective, line, message);

    match name {
        ".ORG" => {
            let address = known_value(operand, symbols, line)?.value;
            Ok(AssemblerDirective::Origin { address })
        }
        ".DS" => {
            let len = known_value(operand, symbols, line)?.value;
            Ok(AssemblerDirective::Reserve { len })
        }
        ".DB" => {
            let items = parser::parse_byte_items(operand).map_err(invalid)?;
            let len = items
                .iter()
                .map(|item| match item {
                    ByteItem::Value(_) => 1,
                    ByteItem::Text(text) => text.len(),
                })
                .sum::<usize>();
            let len = u16::try_from(len).map_err(|_| {
                AssemblerError::new(ErrorType::RangeError, line, ".DB data too long")
            })?;
            Ok(AssemblerDirective::Bytes { items, len })
        }
        ".EQU" if has_label => {
            let number = known_value(operand, symbols, line)?;
            Ok(AssemblerDirective::Equate {
                value: number.value,
                zero_page: number.zero_page,
            })
        }
        ".EQU" => Err(invalid(".EQU needs a label".to_string())),
        ".END" if operand.is_empty() => Ok(AssemblerDirective::End),
        ".END" => Err(invalid(".END takes no operand".to_string())),
        _ => Err(invalid(format!("unknown directive '{}'", name))),
    }
}

/// Evaluates a directive operand that must be known in pass 1.
fn known_value(
    text: &str,
    symbols: &SymbolTable,
    line: usize,
) -> Result<parser::Number, AssemblerError> {
    let expression = parser::parse_expression(text)
        .map_err(|message| AssemblerError::new(ErrorType::SyntaxError, line, message))?;
    match &expression {
        Expression::Number(number) => Ok(*number),
        Expression::Symbol { name, .. } => {
            let zero_page = symbols
                .lookup_symbol(name)
                .map(|s| s.zero_page)
                .unwrap_or(false);
            let value = encoder::resolve(&expression, symbols, line)?;
            Ok(parser::Number {
                value,
                zero_page: zero_page && value <= 0xFF,
            })
        }
    }
}

fn define_label(
    symbols: &mut SymbolTable,
    name: String,
    value: u32,
    zero_page: bool,
    line: usize,
) -> Result<(), AssemblerError> {
    validate_label(&name)
        .map_err(|message| AssemblerError::new(ErrorType::InvalidLabel, line, message))?;

    // A label after the last byte of memory has no address to name
    let value = u16::try_from(value).map_err(|_| {
        AssemblerError::new(
            ErrorType::RangeError,
            line,
            format!("label '{}' would be at ${:05X}, past $FFFF", name, value),
        )
    })?;

    symbols
        .add_symbol(Symbol {
            name,
            value,
            zero_page,
            defined_at: line,
        })
        .map_err(|existing| {
            AssemblerError::new(
                ErrorType::DuplicateLabel,
                line,
                format!(
                    "label '{}' already defined on line {}",
                    existing.name, existing.defined_at
                ),
            )
        })
}

/// Bytes a statement occupies (or, for `.DS`, skips).
fn statement_size(kind: &StatementKind) -> u32 {
    match kind {
        StatementKind::Instruction { mode, .. } => 1 + mode.operand_bytes() as u32,
        StatementKind::Directive(AssemblerDirective::Bytes { len, .. }) => *len as u32,
        StatementKind::Directive(AssemblerDirective::Reserve { len }) => *len as u32,
        _ => 0,
    }
}

fn emit_bytes(
    items: &[ByteItem],
    symbols: &SymbolTable,
    line: usize,
) -> Result<Vec<u8>, AssemblerError> {
    let mut bytes = Vec::new();
    for item in items {
        match item {
            ByteItem::Text(text) => bytes.extend_from_slice(text),
            ByteItem::Value(expression) => {
                let value = encoder::resolve(expression, symbols, line)?;
                let byte = u8::try_from(value).map_err(|_| {
                    AssemblerError::new(
                        ErrorType::RangeError,
                        line,
                        format!(".DB value ${:04X} does not fit in one byte", value),
                    )
                })?;
                bytes.push(byte);
            }
        }
    }
    Ok(bytes)
}

/// Validate a label name according to the dialect's conventions
///
/// Labels must:
/// - Start with a letter or underscore
/// - Contain only letters, digits, and underscores
/// - Not exceed 8 characters in length
/// - Not be `A` (the accumulator operand) or a mnemonic
fn validate_label(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let first = chars
        .next()
        .ok_or_else(|| "label name cannot be empty".to_string())?;

    if name.len() > MAX_LABEL_LEN {
        return Err(format!(
            "label name too long (max {} characters): {}",
            MAX_LABEL_LEN, name
        ));
    }

    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(format!(
            "label must start with a letter or '_', not '{}'",
            first
        ));
    }

    for ch in chars {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(format!(
                "label contains invalid character '{}' (only letters, digits, and underscores allowed)",
                ch
            ));
        }
    }

    if name == "A" || name.parse::<Mnemonic>().is_ok() {
        return Err(format!("'{}' is reserved and cannot be a label", name));
    }

    Ok(())
}
