//! Code-point classification, CSS Syntax Level 3 §4.2.
//!
//! Pure predicates over a single Unicode scalar value. No state, no
//! allocation — these are the leaves the tokenizer's state machine
//! dispatches on.

/// `digit`: a code point between U+0030 DIGIT ZERO and U+0039 DIGIT NINE.
#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// `hex digit`: a digit, or a code point in the ranges A-F / a-f.
#[inline]
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
fn is_uppercase_letter(c: char) -> bool {
    c.is_ascii_uppercase()
}

#[inline]
fn is_lowercase_letter(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// `letter`: an uppercase or lowercase ASCII letter.
#[inline]
pub fn is_letter(c: char) -> bool {
    is_uppercase_letter(c) || is_lowercase_letter(c)
}

/// `non-ASCII ident code point`: the ranges enumerated in CSS Syntax §4.2.
#[inline]
pub fn is_non_ascii_ident_code_point(c: char) -> bool {
    matches!(c,
        '\u{00B7}'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{203F}'..='\u{2040}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
    ) || (c as u32) >= 0x1_0000
}

/// `ident-start code point`: a letter, `_`, or a non-ASCII ident code point.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    is_letter(c) || is_non_ascii_ident_code_point(c) || c == '_'
}

/// `ident code point`: an ident-start code point, a digit, or `-`.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || is_digit(c) || c == '-'
}

/// `non-printable code point`.
#[inline]
pub fn is_non_printable(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{0008}' | '\u{000B}' | '\u{000E}'..='\u{001F}' | '\u{007F}')
}

/// `newline` (post-preprocessing; CR/FF are folded into LF upstream).
#[inline]
pub fn is_newline(c: char) -> bool {
    c == '\u{000A}'
}

/// `whitespace`: newline, tab, or space (post-preprocessing).
#[inline]
pub fn is_whitespace(c: char) -> bool {
    is_newline(c) || c == '\u{0009}' || c == '\u{0020}'
}

/// A surrogate code point (never a valid Rust `char`, but reachable via an
/// escape's numeric value before validity is checked).
#[inline]
pub fn is_surrogate(code_point: u32) -> bool {
    (0xD800..=0xDFFF).contains(&code_point)
}

pub const MAXIMUM_ALLOWED_CODE_POINT: u32 = 0x10_FFFF;
