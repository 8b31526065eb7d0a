//! Line splitting for 6502 assembly source
//!
//! The dialect is line oriented, so lexing is a matter of cutting each line
//! into its fields rather than producing a token stream:
//!
//! ```text
//! [LABEL[:]]  [OPERATION  [OPERAND]]  [; comment]
//! ```
//!
//! The first word is a label unless it is a mnemonic or starts with `.`
//! (a directive). Everything after the operation is the operand. Outside
//! quoted text the operand is upper-cased and its whitespace is removed,
//! so `$10 , x` and `$10,X` read the same; quoted text keeps its case and
//! spaces.
//!
//! # Examples
//!
//! ```
//! use sim6502::assembler::lexer::split_line;
//!
//! let fields = split_line("loop:  lda ($20), y ; fetch").unwrap().unwrap();
//! assert_eq!(fields.label.as_deref(), Some("LOOP"));
//! assert_eq!(fields.operation.as_deref(), Some("LDA"));
//! assert_eq!(fields.operand, "($20),Y");
//!
//! // Blank and comment-only lines carry nothing
//! assert!(split_line("   ; just a comment").unwrap().is_none());
//! ```

use crate::Mnemonic;

/// The fields of one non-empty source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFields {
    /// Label text, upper-cased, without a trailing `:`.
    pub label: Option<String>,

    /// Mnemonic or directive (including its `.`), upper-cased.
    pub operation: Option<String>,

    /// Operand text, compacted. Empty when there is none.
    pub operand: String,

    /// Column where the line's content starts (0-indexed).
    pub column: usize,

    /// Length of the line's content, excluding the comment.
    pub length: usize,
}

/// Splits one line into label, operation and operand.
///
/// Returns `Ok(None)` for blank and comment-only lines, and an error message
/// for an unterminated quote.
pub fn split_line(text: &str) -> Result<Option<LineFields>, String> {
    let code = strip_comment(text)?;
    let content = code.trim();
    if content.is_empty() {
        return Ok(None);
    }
    let column = code.len() - code.trim_start().len();

    let (first, rest) = next_word(content);
    let (label, operation, rest) = if is_operation(first) {
        (None, Some(first), rest)
    } else {
        let (second, rest) = next_word(rest);
        let operation = if second.is_empty() { None } else { Some(second) };
        (Some(first.trim_end_matches(':')), operation, rest)
    };

    Ok(Some(LineFields {
        label: label.map(str::to_ascii_uppercase),
        operation: operation.map(str::to_ascii_uppercase),
        operand: compact(rest),
        column,
        length: content.len(),
    }))
}

/// Splits `text` at commas that are not inside quotes.
///
/// ```
/// use sim6502::assembler::lexer::split_list;
///
/// assert_eq!(split_list("$01,'A,B',3"), vec!["$01", "'A,B'", "3"]);
/// ```
pub fn split_list(text: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '\'' => quoted = !quoted,
            ',' if !quoted => {
                items.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&text[start..]);
    items
}

/// Mnemonics and directives can never be labels.
fn is_operation(word: &str) -> bool {
    word.starts_with('.') || word.parse::<Mnemonic>().is_ok()
}

/// Removes a trailing `;` comment, honouring quotes.
fn strip_comment(text: &str) -> Result<&str, String> {
    let mut quoted = false;
    for (i, ch) in text.char_indices() {
        match ch {
            '\'' => quoted = !quoted,
            ';' if !quoted => return Ok(&text[..i]),
            _ => {}
        }
    }
    if quoted {
        return Err("unterminated quote".to_string());
    }
    Ok(text)
}

/// Returns the first whitespace-delimited word and the remainder.
fn next_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], &text[end..]),
        None => (text, ""),
    }
}

/// Drops whitespace and upper-cases everything outside quotes.
fn compact(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quoted = false;
    for ch in text.chars() {
        if ch == '\'' {
            quoted = !quoted;
            out.push(ch);
        } else if quoted {
            out.push(ch);
        } else if !ch.is_whitespace() {
            out.push(ch.to_ascii_uppercase());
        }
    }
    out
}
