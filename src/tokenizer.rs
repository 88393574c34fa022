//! The tokenizer, CSS Syntax Level 3 §4.3 "Tokenization".
//!
//! A deterministic state machine over preprocessed Unicode scalar values.
//! `Tokenizer` borrows its input (already run through [`crate::preprocess`])
//! and implements `Iterator<Item = Token>`, yielding tokens lazily until and
//! including one [`Token::Eof`], mirroring the teacher's `Stream`-driven,
//! zero-retained-state pull model.

use std::fmt;

use log::debug;

use crate::codepoint::*;
use crate::error::TextPos;
use crate::stream::Cursor;

/// The sign character, if any, that preceded a numeric literal.
///
/// Preserved even when numerically redundant (`+5px` and `5px` tokenize to
/// the same value but a different sign), since conformance fixtures such as
/// `DIM(+5, px)` depend on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum Sign {
    None,
    Plus,
    Minus,
}

impl Sign {
    fn display_prefix(self) -> &'static str {
        match self {
            Sign::Plus => "+",
            Sign::None | Sign::Minus => "",
        }
    }
}

/// Whether a numeric token's original text had a fractional part or
/// exponent (`number`) or was a bare integer literal (`integer`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum NumberType {
    Integer,
    Number,
}

/// The `id`/`unrestricted` flag on a [`Token::Hash`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum HashFlag {
    Id,
    Unrestricted,
}

/// A tokenized numeric value together with the bits needed to reconstruct
/// its display form: the type flag and the original sign character.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct NumericValue {
    pub value: f64,
    pub number_type: NumberType,
    pub sign: Sign,
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = self.sign.display_prefix();
        match self.number_type {
            NumberType::Integer => write!(f, "{}{}", sign, self.value as i64),
            NumberType::Number => write!(f, "{}{}", sign, self.value),
        }
    }
}

/// A single CSS token, as produced by [`Tokenizer`].
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Token {
    Whitespace,
    Eof,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    Comma,
    OpenParen,
    CloseParen,
    OpenSquare,
    CloseSquare,
    OpenCurly,
    CloseCurly,
    Ident(String),
    AtKeyword(String),
    Function(String),
    Hash(String, HashFlag),
    String(String),
    BadString,
    Url(String),
    BadUrl,
    Delim(char),
    Number(NumericValue),
    Percentage(NumericValue),
    Dimension(NumericValue, String),
    UnicodeRange(u32, u32),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Whitespace => write!(f, "WS"),
            Token::Eof => write!(f, "EOF"),
            Token::Cdo => write!(f, "CDO"),
            Token::Cdc => write!(f, "CDC"),
            Token::Colon => write!(f, "COLON"),
            Token::Semicolon => write!(f, "SEMICOLON"),
            Token::Comma => write!(f, "COMMA"),
            Token::OpenParen => write!(f, "OPEN-PAREN"),
            Token::CloseParen => write!(f, "CLOSE-PAREN"),
            Token::OpenSquare => write!(f, "OPEN-SQUARE"),
            Token::CloseSquare => write!(f, "CLOSE-SQUARE"),
            Token::OpenCurly => write!(f, "OPEN-CURLY"),
            Token::CloseCurly => write!(f, "CLOSE-CURLY"),
            Token::Ident(v) => write!(f, "IDENT({})", v),
            Token::AtKeyword(v) => write!(f, "AT({})", v),
            Token::Function(v) => write!(f, "FUNCTION({})", v),
            Token::Hash(v, _) => write!(f, "HASH({})", v),
            Token::String(v) => write!(f, "STRING({})", v),
            Token::BadString => write!(f, "BADSTRING"),
            Token::Url(v) => write!(f, "URL({})", v),
            Token::BadUrl => write!(f, "BADURL"),
            Token::Delim(c) => write!(f, "DELIM({})", c),
            Token::Number(n) => {
                let sign = n.sign.display_prefix();
                match n.number_type {
                    NumberType::Integer => write!(f, "INT({}{})", sign, n.value as i64),
                    NumberType::Number => write!(f, "NUMBER({}{})", sign, n.value),
                }
            }
            Token::Percentage(n) => write!(f, "PERCENTAGE({}{})", n.sign.display_prefix(), n.value),
            Token::Dimension(n, unit) => {
                write!(f, "DIM({}{}, {})", n.sign.display_prefix(), n.value, unit)
            }
            Token::UnicodeRange(start, end) => {
                if start == end {
                    write!(f, "UNICODE-RANGE({:x})", start)
                } else {
                    write!(f, "UNICODE-RANGE({:x}-{:x})", start, end)
                }
            }
        }
    }
}

#[inline]
fn is_valid_escape(c0: Option<char>, c1: Option<char>) -> bool {
    c0 == Some('\\') && c1 != Some('\n') && c1.is_some()
}

fn would_start_ident_sequence(c0: Option<char>, c1: Option<char>, c2: Option<char>) -> bool {
    match c0 {
        Some('-') => match c1 {
            Some(c1) if is_ident_start(c1) => true,
            Some('-') => true,
            _ => is_valid_escape(c1, c2),
        },
        Some(c0) if is_ident_start(c0) => true,
        Some('\\') => is_valid_escape(c0, c1),
        _ => false,
    }
}

fn starts_number(c0: Option<char>, c1: Option<char>, c2: Option<char>) -> bool {
    match c0 {
        Some('+') | Some('-') => match c1 {
            Some(c1) if is_digit(c1) => true,
            Some('.') => matches!(c2, Some(c2) if is_digit(c2)),
            _ => false,
        },
        Some('.') => matches!(c1, Some(c1) if is_digit(c1)),
        Some(c0) if is_digit(c0) => true,
        _ => false,
    }
}

fn starts_unicode_range(c0: Option<char>, c1: Option<char>, c2: Option<char>) -> bool {
    matches!(c0, Some('U') | Some('u'))
        && c1 == Some('+')
        && matches!(c2, Some('?') | Some(c) if is_hex_digit(c) || c == '?')
}

/// The tokenizer. Borrows the preprocessed input; produces tokens lazily.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    unicode_ranges_allowed: bool,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Constructs a tokenizer over already-preprocessed input.
    ///
    /// `unicode_ranges_allowed` should be `true` only in contexts that parse
    /// `unicode-range` descriptors (e.g. inside `@font-face`); everywhere
    /// else a leading `u`/`U` is tokenized as an identifier.
    pub fn new(input: &'a [char], unicode_ranges_allowed: bool) -> Self {
        Tokenizer {
            cursor: Cursor::new(input),
            unicode_ranges_allowed,
            done: false,
        }
    }

    /// Constructs a tokenizer with `unicode_ranges_allowed` already set to
    /// `true`, for contexts such as `@font-face`'s `unicode-range`
    /// descriptor.
    pub fn new_with_unicode_ranges(input: &'a [char]) -> Self {
        Tokenizer::new(input, true)
    }

    /// Toggles unicode-range tokenization after construction.
    pub fn unicode_ranges(mut self, allowed: bool) -> Self {
        self.unicode_ranges_allowed = allowed;
        self
    }

    /// The tokenizer's current offset into the preprocessed input.
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// Row/column of the tokenizer's current position.
    pub fn text_pos(&self) -> TextPos {
        self.cursor.text_pos()
    }

    fn peek3(&self) -> (Option<char>, Option<char>, Option<char>) {
        (self.cursor.peek(0), self.cursor.peek(1), self.cursor.peek(2))
    }

    // 4.3.1 Consume a token
    fn consume_token(&mut self) -> Token {
        self.consume_comments();

        let c = match self.cursor.consume() {
            None => return Token::Eof,
            Some(c) => c,
        };

        if is_whitespace(c) {
            self.cursor.skip_whitespace();
            return Token::Whitespace;
        }

        match c {
            '"' => self.consume_string_token('"'),
            '#' => {
                let (c0, c1) = (self.cursor.peek(0), self.cursor.peek(1));
                if c0.map_or(false, is_ident_continue) || is_valid_escape(c0, c1) {
                    let (a, b, d) = self.peek3();
                    let flag = if would_start_ident_sequence(a, b, d) {
                        HashFlag::Id
                    } else {
                        HashFlag::Unrestricted
                    };
                    Token::Hash(self.consume_ident_sequence(), flag)
                } else {
                    Token::Delim('#')
                }
            }
            '\'' => self.consume_string_token('\''),
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '+' => {
                let (a, b, _) = self.peek3();
                if starts_number(Some('+'), a, b) {
                    self.cursor.reconsume();
                    self.consume_numeric_token()
                } else {
                    Token::Delim('+')
                }
            }
            ',' => Token::Comma,
            '-' => {
                let (a, b, _) = self.peek3();
                if starts_number(Some('-'), a, b) {
                    self.cursor.reconsume();
                    self.consume_numeric_token()
                } else if a == Some('-') && b == Some('>') {
                    self.cursor.consume();
                    self.cursor.consume();
                    Token::Cdc
                } else if would_start_ident_sequence(Some('-'), a, b) {
                    self.cursor.reconsume();
                    self.consume_ident_like_token()
                } else {
                    Token::Delim('-')
                }
            }
            '.' => {
                let (a, b, _) = self.peek3();
                if starts_number(Some('.'), a, b) {
                    self.cursor.reconsume();
                    self.consume_numeric_token()
                } else {
                    Token::Delim('.')
                }
            }
            ':' => Token::Colon,
            ';' => Token::Semicolon,
            '<' => {
                if self.cursor.peek(0) == Some('!')
                    && self.cursor.peek(1) == Some('-')
                    && self.cursor.peek(2) == Some('-')
                {
                    self.cursor.consume();
                    self.cursor.consume();
                    self.cursor.consume();
                    Token::Cdo
                } else {
                    Token::Delim('<')
                }
            }
            '@' => {
                let (a, b, d) = self.peek3();
                if would_start_ident_sequence(a, b, d) {
                    Token::AtKeyword(self.consume_ident_sequence())
                } else {
                    Token::Delim('@')
                }
            }
            '[' => Token::OpenSquare,
            '\\' => {
                if is_valid_escape(Some('\\'), self.cursor.peek(0)) {
                    self.cursor.reconsume();
                    self.consume_ident_like_token()
                } else {
                    debug!("stray '\\' at {}: parse error", self.cursor.text_pos());
                    Token::Delim('\\')
                }
            }
            ']' => Token::CloseSquare,
            '{' => Token::OpenCurly,
            '}' => Token::CloseCurly,
            'U' | 'u' => {
                let (a, b, _) = self.peek3();
                if self.unicode_ranges_allowed && starts_unicode_range(Some(c), a, b) {
                    self.cursor.reconsume();
                    self.consume_unicode_range_token()
                } else {
                    self.cursor.reconsume();
                    self.consume_ident_like_token()
                }
            }
            c if is_digit(c) => {
                self.cursor.reconsume();
                self.consume_numeric_token()
            }
            c if is_ident_start(c) => {
                self.cursor.reconsume();
                self.consume_ident_like_token()
            }
            c => Token::Delim(c),
        }
    }

    // 4.3.2 Consume comments
    fn consume_comments(&mut self) {
        loop {
            if self.cursor.peek(0) == Some('/') && self.cursor.peek(1) == Some('*') {
                self.cursor.consume();
                self.cursor.consume();
                loop {
                    if self.cursor.peek(0) == Some('*') && self.cursor.peek(1) == Some('/') {
                        self.cursor.consume();
                        self.cursor.consume();
                        break;
                    } else if self.cursor.at_end() {
                        debug!("unterminated comment at {}", self.cursor.text_pos());
                        break;
                    } else {
                        self.cursor.consume();
                    }
                }
            } else {
                break;
            }
        }
    }

    // 4.3.3 Consume a numeric token
    fn consume_numeric_token(&mut self) -> Token {
        let number = self.consume_number();
        let (a, b, d) = self.peek3();
        if would_start_ident_sequence(a, b, d) {
            let unit = self.consume_ident_sequence();
            Token::Dimension(number, unit)
        } else if self.cursor.peek(0) == Some('%') {
            self.cursor.consume();
            Token::Percentage(number)
        } else {
            Token::Number(number)
        }
    }

    // 4.3.4 Consume an ident-like token
    fn consume_ident_like_token(&mut self) -> Token {
        let s = self.consume_ident_sequence();
        if s.eq_ignore_ascii_case("url") && self.cursor.peek(0) == Some('(') {
            self.cursor.consume();
            while self.cursor.peek(0).map_or(false, is_whitespace)
                && self.cursor.peek(1).map_or(false, is_whitespace)
            {
                self.cursor.consume();
            }
            let next = self.cursor.peek(0);
            let next2 = self.cursor.peek(1);
            let quote_follows = next == Some('"')
                || next == Some('\'')
                || (next.map_or(false, is_whitespace)
                    && (next2 == Some('"') || next2 == Some('\'')));
            if quote_follows {
                Token::Function(s)
            } else {
                self.consume_url_token()
            }
        } else if self.cursor.peek(0) == Some('(') {
            self.cursor.consume();
            Token::Function(s)
        } else {
            Token::Ident(s)
        }
    }

    // 4.3.5 Consume a string token
    fn consume_string_token(&mut self, ending: char) -> Token {
        let mut s = String::new();
        loop {
            match self.cursor.consume() {
                Some(c) if c == ending => return Token::String(s),
                None => {
                    debug!("unterminated string at {}", self.cursor.text_pos());
                    return Token::String(s);
                }
                Some(c) if is_newline(c) => {
                    debug!("newline in string at {}", self.cursor.text_pos());
                    self.cursor.reconsume();
                    return Token::BadString;
                }
                Some('\\') => {
                    if self.cursor.at_end() {
                        continue;
                    } else if self.cursor.peek(0).map_or(false, is_newline) {
                        self.cursor.consume();
                    } else {
                        s.push(self.consume_escaped_code_point());
                    }
                }
                Some(c) => s.push(c),
            }
        }
    }

    // 4.3.6 Consume a url token
    fn consume_url_token(&mut self) -> Token {
        let mut s = String::new();
        self.cursor.skip_whitespace();
        loop {
            match self.cursor.consume() {
                Some(')') => return Token::Url(s),
                None => {
                    debug!("unterminated url at {}", self.cursor.text_pos());
                    return Token::Url(s);
                }
                Some(c) if is_whitespace(c) => {
                    self.cursor.skip_whitespace();
                    match self.cursor.peek(0) {
                        Some(')') => {
                            self.cursor.consume();
                            return Token::Url(s);
                        }
                        None => {
                            debug!("unterminated url at {}", self.cursor.text_pos());
                            return Token::Url(s);
                        }
                        Some(_) => {
                            self.consume_remnant_of_bad_url();
                            return Token::BadUrl;
                        }
                    }
                }
                Some(c) if c == '"' || c == '\'' || c == '(' || is_non_printable(c) => {
                    debug!("invalid url content at {}", self.cursor.text_pos());
                    self.consume_remnant_of_bad_url();
                    return Token::BadUrl;
                }
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.cursor.peek(0)) {
                        s.push(self.consume_escaped_code_point());
                    } else {
                        debug!("invalid escape in url at {}", self.cursor.text_pos());
                        self.consume_remnant_of_bad_url();
                        return Token::BadUrl;
                    }
                }
                Some(c) => s.push(c),
            }
        }
    }

    // 4.3.7 Consume an escaped code point
    fn consume_escaped_code_point(&mut self) -> char {
        match self.cursor.consume() {
            None => '\u{FFFD}',
            Some(c) if is_hex_digit(c) => {
                let mut digits = String::new();
                digits.push(c);
                while digits.len() < 6 {
                    match self.cursor.peek(0) {
                        Some(c) if is_hex_digit(c) => {
                            digits.push(c);
                            self.cursor.consume();
                        }
                        _ => break,
                    }
                }
                if self.cursor.peek(0).map_or(false, is_whitespace) {
                    self.cursor.consume();
                }
                let code_point = u32::from_str_radix(&digits, 16).unwrap_or(0);
                if code_point == 0
                    || code_point > MAXIMUM_ALLOWED_CODE_POINT
                    || is_surrogate(code_point)
                {
                    '\u{FFFD}'
                } else {
                    char::from_u32(code_point).unwrap_or('\u{FFFD}')
                }
            }
            Some(c) => c,
        }
    }

    // 4.3.12 Consume an ident sequence
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();
        loop {
            match self.cursor.consume() {
                None => break,
                Some(c) if is_ident_continue(c) => result.push(c),
                Some(c) if is_valid_escape(Some(c), self.cursor.peek(0)) => {
                    result.push(self.consume_escaped_code_point());
                }
                Some(_) => {
                    self.cursor.reconsume();
                    break;
                }
            }
        }
        result
    }

    // 4.3.13 Consume a number
    fn consume_number(&mut self) -> NumericValue {
        let mut number_type = NumberType::Integer;
        let mut digits = String::new();
        let mut sign = Sign::None;

        match self.cursor.peek(0) {
            Some('+') => {
                sign = Sign::Plus;
                self.cursor.consume();
            }
            Some('-') => {
                sign = Sign::Minus;
                digits.push('-');
                self.cursor.consume();
            }
            _ => {}
        }

        while let Some(c) = self.cursor.peek(0) {
            if is_digit(c) {
                digits.push(c);
                self.cursor.consume();
            } else {
                break;
            }
        }

        if self.cursor.peek(0) == Some('.') && self.cursor.peek(1).map_or(false, is_digit) {
            number_type = NumberType::Number;
            digits.push('.');
            self.cursor.consume();
            while let Some(c) = self.cursor.peek(0) {
                if is_digit(c) {
                    digits.push(c);
                    self.cursor.consume();
                } else {
                    break;
                }
            }
        }

        let exponent_starts = matches!(self.cursor.peek(0), Some('E') | Some('e'))
            && (self.cursor.peek(1).map_or(false, is_digit)
                || (matches!(self.cursor.peek(1), Some('+') | Some('-'))
                    && self.cursor.peek(2).map_or(false, is_digit)));

        let mut exponent = String::new();
        if exponent_starts {
            number_type = NumberType::Number;
            self.cursor.consume(); // E/e
            match self.cursor.peek(0) {
                Some('+') | Some('-') => {
                    exponent.push(self.cursor.consume().unwrap());
                }
                _ => {}
            }
            while let Some(c) = self.cursor.peek(0) {
                if is_digit(c) {
                    exponent.push(c);
                    self.cursor.consume();
                } else {
                    break;
                }
            }
        }

        let mantissa: f64 = digits.parse().unwrap_or(0.0);
        let value = if exponent.is_empty() {
            mantissa
        } else {
            let exp: i32 = exponent.parse().unwrap_or(0);
            mantissa * 10f64.powi(exp)
        };

        NumericValue { value, number_type, sign }
    }

    // 4.3.14 Consume a unicode-range token
    fn consume_unicode_range_token(&mut self) -> Token {
        self.cursor.consume(); // U/u
        self.cursor.consume(); // +

        let mut first = String::new();
        loop {
            match self.cursor.peek(0) {
                Some(c) if is_hex_digit(c) && first.len() < 6 => {
                    first.push(c);
                    self.cursor.consume();
                    if first.len() == 6 {
                        break;
                    }
                }
                _ => break,
            }
        }
        if first.len() < 6 {
            loop {
                match self.cursor.peek(0) {
                    Some('?') if first.len() < 6 => {
                        first.push('?');
                        self.cursor.consume();
                        if first.len() == 6 {
                            break;
                        }
                    }
                    _ => break,
                }
            }
        }

        if first.contains('?') {
            let start = u32::from_str_radix(&first.replace('?', "0"), 16).unwrap_or(0);
            let end = u32::from_str_radix(&first.replace('?', "F"), 16).unwrap_or(0);
            return Token::UnicodeRange(start, end);
        }

        let start = u32::from_str_radix(&first, 16).unwrap_or(0);

        if self.cursor.peek(0) == Some('-') && self.cursor.peek(1).map_or(false, is_hex_digit) {
            self.cursor.consume();
            let mut second = String::new();
            loop {
                match self.cursor.peek(0) {
                    Some(c) if is_hex_digit(c) && second.len() < 6 => {
                        second.push(c);
                        self.cursor.consume();
                        if second.len() == 6 {
                            break;
                        }
                    }
                    _ => break,
                }
            }
            let end = u32::from_str_radix(&second, 16).unwrap_or(start);
            Token::UnicodeRange(start, end)
        } else {
            Token::UnicodeRange(start, start)
        }
    }

    // 4.3.15 Consume the remnants of a bad url
    fn consume_remnant_of_bad_url(&mut self) {
        loop {
            match self.cursor.consume() {
                None | Some(')') => return,
                Some(c) => {
                    if is_valid_escape(Some(c), self.cursor.peek(0)) {
                        self.consume_escaped_code_point();
                    }
                }
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.consume_token();
        if token == Token::Eof {
            self.done = true;
        }
        Some(token)
    }
}
