//! The rule/declaration parser, CSS Syntax Level 3 §5 / spec §4.E.
//!
//! A mode-driven consumer of the token stream. The modes in the spec
//! (`TopLevel, AtRule, Rule, Selector, Declaration,
//! AfterDeclarationName, DeclarationValue`) are expressed here as a
//! small set of mutually recursive functions over a token cursor rather
//! than an explicit mode field, since each mode's accumulated state
//! (the rule currently under construction) differs and Rust's call
//! stack already gives us the "rule stack" the spec describes.

use log::warn;

use crate::ast::{AtRule, AtRuleBodyItem, AtRuleBodyMode, Declaration, RuleOrAtRule, StyleRule, Stylesheet};
use crate::component::consume_component_value;
use crate::preprocess::preprocess;
use crate::tokenizer::{Token, Tokenizer};

/// Tokenizes and parses `input` into a [`Stylesheet`].
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let chars = preprocess(input);
    let tokens: Vec<Token> = Tokenizer::new(&chars, false).collect();
    let mut parser = Parser { tokens, pos: 0 };
    parser.top_level()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let t = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Token::Whitespace) {
            self.advance();
        }
    }

    // TopLevel
    fn top_level(&mut self) -> Stylesheet {
        let mut children = Vec::new();
        loop {
            match self.peek().clone() {
                Token::Eof => break,
                Token::Whitespace | Token::Cdo | Token::Cdc => {
                    self.advance();
                }
                Token::AtKeyword(name) => {
                    self.advance();
                    children.push(RuleOrAtRule::AtRule(self.at_rule(name)));
                }
                Token::OpenCurly => {
                    warn!("stray '{{' at top level: parse error");
                    consume_component_value(&self.tokens, &mut self.pos);
                }
                _ => match self.style_rule() {
                    Some(rule) => children.push(RuleOrAtRule::StyleRule(rule)),
                    None => break,
                },
            }
        }
        Stylesheet { children }
    }

    // AtRule. `@name` has already been consumed.
    fn at_rule(&mut self, name: String) -> AtRule {
        let mut prelude = Vec::new();
        loop {
            match self.peek() {
                Token::Semicolon => {
                    self.advance();
                    return AtRule { name, prelude, block: Vec::new(), has_block: false };
                }
                Token::OpenCurly => {
                    self.advance();
                    break;
                }
                Token::Eof => {
                    return AtRule { name, prelude, block: Vec::new(), has_block: false };
                }
                _ => {
                    if let Some(p) = consume_component_value(&self.tokens, &mut self.pos) {
                        prelude.push(p);
                    } else {
                        break;
                    }
                }
            }
        }

        let block = match AtRuleBodyMode::for_name(&name) {
            AtRuleBodyMode::RuleFilled => self
                .rule_list()
                .into_iter()
                .map(|r| match r {
                    RuleOrAtRule::AtRule(a) => AtRuleBodyItem::AtRule(a),
                    RuleOrAtRule::StyleRule(s) => AtRuleBodyItem::StyleRule(s),
                })
                .collect(),
            AtRuleBodyMode::DeclarationFilled => self
                .declaration_list()
                .into_iter()
                .map(AtRuleBodyItem::Declaration)
                .collect(),
        };

        AtRule { name, prelude, block, has_block: true }
    }

    // Rule mode: the body of a rule-filled at-rule (e.g. `media`).
    fn rule_list(&mut self) -> Vec<RuleOrAtRule> {
        let mut items = Vec::new();
        loop {
            match self.peek().clone() {
                Token::Whitespace => {
                    self.advance();
                }
                Token::CloseCurly => {
                    self.advance();
                    break;
                }
                Token::Eof => break,
                // Nested at-rules (e.g. `@supports` inside `@media`) are
                // handled the same way as at the top level.
                Token::AtKeyword(name) => {
                    self.advance();
                    items.push(RuleOrAtRule::AtRule(self.at_rule(name)));
                }
                _ => match self.style_rule() {
                    Some(rule) => items.push(RuleOrAtRule::StyleRule(rule)),
                    None => break,
                },
            }
        }
        items
    }

    // Selector mode, then the nested rule's Declaration mode.
    // Returns `None` if the rule's `{` was never found (discarded per
    // the parse-error recovery rule).
    fn style_rule(&mut self) -> Option<StyleRule> {
        let mut selector = Vec::new();
        loop {
            match self.peek() {
                Token::OpenCurly => {
                    self.advance();
                    break;
                }
                Token::Eof => {
                    warn!("unterminated rule at EOF: discarding incomplete rule");
                    return None;
                }
                _ => {
                    if let Some(p) = consume_component_value(&self.tokens, &mut self.pos) {
                        selector.push(p);
                    } else {
                        return None;
                    }
                }
            }
        }
        let declarations = self.declaration_list();
        Some(StyleRule { selector, declarations })
    }

    // Declaration, AfterDeclarationName, and DeclarationValue modes.
    fn declaration_list(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        loop {
            match self.peek().clone() {
                Token::Whitespace | Token::Semicolon => {
                    self.advance();
                }
                Token::CloseCurly => {
                    self.advance();
                    break;
                }
                Token::Eof => break,
                Token::Ident(name) => {
                    self.advance();
                    self.skip_whitespace();
                    if matches!(self.peek(), Token::Colon) {
                        self.advance();
                        let (value, important) = self.declaration_value();
                        declarations.push(Declaration { name, value, important });
                    } else {
                        warn!("declaration '{}' missing ':': parse error", name);
                        self.recover_declaration();
                    }
                }
                other => {
                    warn!("unexpected {:?} at start of declaration: parse error", other);
                    self.recover_declaration();
                }
            }
        }
        declarations
    }

    // DeclarationValue mode, including `! important` recognition.
    fn declaration_value(&mut self) -> (Vec<crate::component::Primitive>, bool) {
        let mut value = Vec::new();
        let mut important = false;
        loop {
            match self.peek() {
                Token::Semicolon => {
                    self.advance();
                    break;
                }
                Token::CloseCurly | Token::Eof => break,
                Token::Delim('!') => {
                    let checkpoint = self.pos;
                    self.advance();
                    self.skip_whitespace();
                    let is_important = matches!(self.peek(), Token::Ident(s) if s.eq_ignore_ascii_case("important"));
                    if is_important {
                        self.advance();
                        let mut trailing_pos = self.pos;
                        while matches!(self.tokens.get(trailing_pos), Some(Token::Whitespace)) {
                            trailing_pos += 1;
                        }
                        // Only a trailing `! important`, immediately before
                        // the declaration's terminator, sets the flag; an
                        // `!important` followed by more tokens is not the
                        // flag and falls through as ordinary value content.
                        match self.tokens.get(trailing_pos) {
                            Some(Token::Semicolon) => {
                                important = true;
                                self.pos = trailing_pos + 1;
                                break;
                            }
                            None | Some(Token::CloseCurly) | Some(Token::Eof) => {
                                important = true;
                                self.pos = trailing_pos;
                                break;
                            }
                            _ => {}
                        }
                    }
                    self.pos = checkpoint;
                    if let Some(p) = consume_component_value(&self.tokens, &mut self.pos) {
                        value.push(p);
                    } else {
                        break;
                    }
                }
                _ => {
                    if let Some(p) = consume_component_value(&self.tokens, &mut self.pos) {
                        value.push(p);
                    } else {
                        break;
                    }
                }
            }
        }
        (value, important)
    }

    fn recover_declaration(&mut self) {
        loop {
            match self.peek() {
                Token::Semicolon => {
                    self.advance();
                    return;
                }
                Token::CloseCurly | Token::Eof => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
