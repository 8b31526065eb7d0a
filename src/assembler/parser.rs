//! Operand and literal parsing
//!
//! Turns the compacted operand text produced by the lexer into an
//! [`Operand`]. Nothing here looks at the symbol table: symbols stay names
//! until the assembler resolves them.

/// A numeric literal together with its written width.
///
/// Width decides between zero-page and absolute addressing: hex literals of
/// at most two digits, binary literals of at most eight digits and decimal
/// literals up to 255 are one byte wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Number {
    pub value: u16,
    pub zero_page: bool,
}

/// A value that may refer to a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A literal (number or quoted character).
    Number(Number),

    /// `NAME`, `NAME+n` or `NAME-n`.
    Symbol { name: String, offset: i32 },
}

/// The syntactic form of an instruction operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// No operand text.
    None,
    /// `A`
    Accumulator,
    /// `#value`
    Immediate(Expression),
    /// `value` (zero page, absolute or branch target)
    Direct(Expression),
    /// `value,X`
    IndexedX(Expression),
    /// `value,Y`
    IndexedY(Expression),
    /// `(value)`
    Indirect(Expression),
    /// `(value,X)`
    IndirectX(Expression),
    /// `(value),Y`
    IndirectY(Expression),
    /// `+n` / `-n`: branch displacement from the branch's own address
    Displacement(i32),
}

/// One item of a `.DB` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteItem {
    Value(Expression),
    Text(Vec<u8>),
}

/// Parse a number from a string (supports hex $XX, decimal, binary %XXXXXXXX)
pub fn parse_number(s: &str) -> Result<Number, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("empty number string".to_string());
    }

    if let Some(digits) = s.strip_prefix('$') {
        let value = parse_digits(digits, 16).map_err(|e| format!("invalid hex number: {}", e))?;
        Ok(Number {
            value,
            zero_page: digits.len() <= 2,
        })
    } else if let Some(digits) = s.strip_prefix('%') {
        let value =
            parse_digits(digits, 2).map_err(|e| format!("invalid binary number: {}", e))?;
        Ok(Number {
            value,
            zero_page: digits.len() <= 8,
        })
    } else {
        let value = parse_digits(s, 10).map_err(|e| format!("invalid decimal number: {}", e))?;
        Ok(Number {
            value,
            zero_page: value <= 0xFF,
        })
    }
}

/// `from_str_radix` without the sign prefix it would otherwise accept.
fn parse_digits(digits: &str, radix: u32) -> Result<u16, String> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("'{}'", digits));
    }
    u16::from_str_radix(digits, radix).map_err(|e| e.to_string())
}

/// Parses a number, a quoted character or a symbol with optional offset.
pub fn parse_expression(s: &str) -> Result<Expression, String> {
    let first = s
        .chars()
        .next()
        .ok_or_else(|| "missing operand value".to_string())?;

    if first == '$' || first == '%' || first.is_ascii_digit() {
        return parse_number(s).map(Expression::Number);
    }
    if first == '\'' {
        return parse_char(s).map(Expression::Number);
    }

    let (name, offset) = match s.find(['+', '-']) {
        Some(split) => {
            let magnitude = parse_number(&s[split + 1..])?.value as i32;
            let offset = if s[split..].starts_with('-') {
                -magnitude
            } else {
                magnitude
            };
            (&s[..split], offset)
        }
        None => (s, 0),
    };

    if !is_symbol_name(name) {
        return Err(format!("invalid expression '{}'", s));
    }
    Ok(Expression::Symbol {
        name: name.to_string(),
        offset,
    })
}

/// Parses `'c'` into the character's byte value.
fn parse_char(s: &str) -> Result<Number, String> {
    let inner = s
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .ok_or_else(|| format!("invalid character literal {}", s))?;
    match inner.as_bytes() {
        [byte] => Ok(Number {
            value: *byte as u16,
            zero_page: true,
        }),
        _ => Err(format!("character literal {} must hold one character", s)),
    }
}

fn is_symbol_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Classifies an instruction operand by its syntax.
pub fn parse_operand(text: &str) -> Result<Operand, String> {
    if text.is_empty() {
        return Ok(Operand::None);
    }
    if text == "A" {
        return Ok(Operand::Accumulator);
    }
    if let Some(value) = text.strip_prefix('#') {
        return parse_expression(value).map(Operand::Immediate);
    }
    if let Some(magnitude) = text.strip_prefix('+') {
        return Ok(Operand::Displacement(parse_number(magnitude)?.value as i32));
    }
    if let Some(magnitude) = text.strip_prefix('-') {
        return Ok(Operand::Displacement(-(parse_number(magnitude)?.value as i32)));
    }

    if let Some(inner) = text.strip_prefix('(') {
        if let Some(pointer) = inner.strip_suffix("),Y") {
            return parse_expression(pointer).map(Operand::IndirectY);
        }
        if let Some(pointer) = inner.strip_suffix(",X)") {
            return parse_expression(pointer).map(Operand::IndirectX);
        }
        if let Some(pointer) = inner.strip_suffix(')') {
            return parse_expression(pointer).map(Operand::Indirect);
        }
        return Err(format!("unbalanced parentheses in '{}'", text));
    }

    if let Some(base) = text.strip_suffix(",X") {
        return parse_expression(base).map(Operand::IndexedX);
    }
    if let Some(base) = text.strip_suffix(",Y") {
        return parse_expression(base).map(Operand::IndexedY);
    }
    parse_expression(text).map(Operand::Direct)
}

/// Parses the comma-separated argument list of `.DB`.
pub fn parse_byte_items(text: &str) -> Result<Vec<ByteItem>, String> {
    if text.is_empty() {
        return Err(".DB needs at least one value".to_string());
    }

    super::lexer::split_list(text)
        .into_iter()
        .map(|item| {
            let text = item
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''));
            match text {
                Some("") => Err("empty string in .DB".to_string()),
                Some(text) if item.len() > 1 => Ok(ByteItem::Text(text.as_bytes().to_vec())),
                _ => parse_expression(item).map(ByteItem::Value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: u16, zero_page: bool) -> Expression {
        Expression::Number(Number { value, zero_page })
    }

    #[test]
    fn test_parse_number_hex() {
        assert_eq!(parse_number("$FF").unwrap().value, 255);
        assert_eq!(parse_number("$42").unwrap().value, 66);
        assert_eq!(parse_number("$1234").unwrap().value, 0x1234);
    }

    #[test]
    fn test_parse_number_decimal() {
        assert_eq!(parse_number("255").unwrap().value, 255);
        assert_eq!(parse_number("42").unwrap().value, 42);
        assert_eq!(parse_number("1234").unwrap().value, 1234);
    }

    #[test]
    fn test_parse_number_binary() {
        assert_eq!(parse_number("%11111111").unwrap().value, 255);
        assert_eq!(parse_number("%01000010").unwrap().value, 66);
        assert_eq!(parse_number("%00000001").unwrap().value, 1);
    }

    #[test]
    fn test_parse_number_invalid() {
        assert!(parse_number("$XY").is_err());
        assert!(parse_number("%202").is_err());
        assert!(parse_number("ABC").is_err());
        assert!(parse_number("").is_err());
        assert!(parse_number("$+1").is_err());
        assert!(parse_number("70000").is_err());
    }

    #[test]
    fn test_number_width() {
        assert!(parse_number("$80").unwrap().zero_page);
        assert!(!parse_number("$0080").unwrap().zero_page);
        assert!(parse_number("255").unwrap().zero_page);
        assert!(!parse_number("256").unwrap().zero_page);
    }

    #[test]
    fn test_parse_expression_symbols() {
        assert_eq!(
            parse_expression("TABLE+2"),
            Ok(Expression::Symbol {
                name: "TABLE".to_string(),
                offset: 2
            })
        );
        assert_eq!(
            parse_expression("END_1-$10"),
            Ok(Expression::Symbol {
                name: "END_1".to_string(),
                offset: -16
            })
        );
        assert!(parse_expression("TA BLE").is_err());
        assert!(parse_expression("X+Y").is_err());
    }

    #[test]
    fn test_parse_operand_forms() {
        assert_eq!(parse_operand(""), Ok(Operand::None));
        assert_eq!(parse_operand("A"), Ok(Operand::Accumulator));
        assert_eq!(parse_operand("#$10"), Ok(Operand::Immediate(number(0x10, true))));
        assert_eq!(parse_operand("#'C'"), Ok(Operand::Immediate(number(0x43, true))));
        assert_eq!(parse_operand("$1234,X"), Ok(Operand::IndexedX(number(0x1234, false))));
        assert_eq!(parse_operand("$80,Y"), Ok(Operand::IndexedY(number(0x80, true))));
        assert_eq!(parse_operand("($FFFC)"), Ok(Operand::Indirect(number(0xFFFC, false))));
        assert_eq!(parse_operand("($40,X)"), Ok(Operand::IndirectX(number(0x40, true))));
        assert_eq!(parse_operand("($40),Y"), Ok(Operand::IndirectY(number(0x40, true))));
        assert_eq!(parse_operand("-4"), Ok(Operand::Displacement(-4)));
        assert_eq!(parse_operand("+$10"), Ok(Operand::Displacement(16)));
        assert!(parse_operand("($40").is_err());
    }

    #[test]
    fn test_parse_byte_items() {
        assert_eq!(
            parse_byte_items("$01,'Hi',%10,10"),
            Ok(vec![
                ByteItem::Value(number(1, true)),
                ByteItem::Text(b"Hi".to_vec()),
                ByteItem::Value(number(2, true)),
                ByteItem::Value(number(10, true)),
            ])
        );
        assert!(parse_byte_items("").is_err());
        assert!(parse_byte_items("''").is_err());
    }
}
