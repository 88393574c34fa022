//! The component-value parser, CSS Syntax Level 3 §5.3 / spec §4.D.
//!
//! Consumes a flat token sequence into a tree of [`Primitive`]s: bare
//! tokens, balanced simple blocks (`{}`/`[]`/`()`), and functions whose
//! argument list is split on top-level commas.

use crate::tokenizer::Token;

/// The opening delimiter of a [`SimpleBlock`](Primitive::SimpleBlock).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum BlockOpener {
    Curly,
    Square,
    Paren,
}

impl BlockOpener {
    fn closing_token(self) -> Token {
        match self {
            BlockOpener::Curly => Token::CloseCurly,
            BlockOpener::Square => Token::CloseSquare,
            BlockOpener::Paren => Token::CloseParen,
        }
    }
}

/// A component value: a bare token, a function call, or a balanced block.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Primitive {
    Token(Token),
    Function { name: String, arguments: Vec<Vec<Primitive>> },
    SimpleBlock { opener: BlockOpener, body: Vec<Primitive> },
}

impl Primitive {
    /// `true` for `Token(Token::Whitespace)`, used to skip runs of
    /// insignificant whitespace while walking a primitive sequence.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Primitive::Token(Token::Whitespace))
    }
}

/// Consumes one component value from `tokens[*pos..]`, advancing `*pos`
/// past it. Returns `None` only at EOF.
pub fn consume_component_value(tokens: &[Token], pos: &mut usize) -> Option<Primitive> {
    let token = tokens.get(*pos)?.clone();
    *pos += 1;

    match token {
        Token::OpenCurly => Some(consume_simple_block(tokens, pos, BlockOpener::Curly)),
        Token::OpenSquare => Some(consume_simple_block(tokens, pos, BlockOpener::Square)),
        Token::OpenParen => Some(consume_simple_block(tokens, pos, BlockOpener::Paren)),
        Token::Function(name) => Some(consume_function(tokens, pos, name)),
        Token::Eof => None,
        other => Some(Primitive::Token(other)),
    }
}

fn consume_simple_block(tokens: &[Token], pos: &mut usize, opener: BlockOpener) -> Primitive {
    let closer = opener.closing_token();
    let mut body = Vec::new();
    loop {
        match tokens.get(*pos) {
            None => break,
            Some(Token::Eof) => break,
            Some(t) if *t == closer => {
                *pos += 1;
                break;
            }
            _ => {
                if let Some(p) = consume_component_value(tokens, pos) {
                    body.push(p);
                } else {
                    break;
                }
            }
        }
    }
    Primitive::SimpleBlock { opener, body }
}

fn consume_function(tokens: &[Token], pos: &mut usize, name: String) -> Primitive {
    let mut arguments: Vec<Vec<Primitive>> = vec![Vec::new()];
    loop {
        match tokens.get(*pos) {
            None | Some(Token::Eof) => break,
            Some(Token::CloseParen) => {
                *pos += 1;
                break;
            }
            Some(Token::Comma) => {
                *pos += 1;
                arguments.push(Vec::new());
            }
            _ => {
                if let Some(p) = consume_component_value(tokens, pos) {
                    arguments.last_mut().unwrap().push(p);
                } else {
                    break;
                }
            }
        }
    }
    Primitive::Function { name, arguments }
}

/// Consumes every remaining component value in `tokens[*pos..]` (stopping
/// at `Eof`), in source order.
pub fn consume_component_values(tokens: &[Token], pos: &mut usize) -> Vec<Primitive> {
    let mut out = Vec::new();
    while let Some(p) = consume_component_value(tokens, pos) {
        out.push(p);
    }
    out
}
