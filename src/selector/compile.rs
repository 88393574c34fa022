//! The selector compiler, spec §4.F.
//!
//! Consumes the `Primitive` sequence captured as a style rule's selector
//! (or an at-rule prelude used as one) and produces a right-anchored
//! [`Selector`] chain. Implemented as a single left-to-right pass that
//! keeps one compound "open" at a time; a combinator token (explicit
//! `>`/`+`, or an implicit whitespace-separated adjacency) seals the
//! open compound into the chain built so far and records which
//! combinator the *next* compound will be sealed with.

use crate::component::Primitive;
use crate::error::{Error, Result};
use crate::tokenizer::Token;

use super::{AttrOp, AttributeSelector, Combinator, ElementSelector, Selector};

struct Compiler {
    root: Option<Selector>,
    has_current: bool,
    current_tag: Option<String>,
    current_attrs: Vec<AttributeSelector>,
    pending_combinator: Option<Combinator>,
}

impl Compiler {
    fn new() -> Self {
        Compiler {
            root: None,
            has_current: false,
            current_tag: None,
            current_attrs: Vec::new(),
            pending_combinator: None,
        }
    }

    fn start_compound(&mut self, tag: Option<String>) {
        self.has_current = true;
        self.current_tag = tag;
        self.current_attrs = Vec::new();
    }

    fn seal(&mut self) {
        if !self.has_current {
            return;
        }
        let compound = ElementSelector {
            tag: self.current_tag.take(),
            attrs: std::mem::take(&mut self.current_attrs),
        };
        self.root = Some(match self.root.take() {
            None => Selector { compound, link: None },
            Some(old_root) => {
                let comb = self.pending_combinator.take().unwrap_or(Combinator::Descendant);
                Selector { compound, link: Some((comb, Box::new(old_root))) }
            }
        });
        self.has_current = false;
    }

    fn begin_new_compound(&mut self, tag: Option<String>) -> Result<()> {
        if self.has_current {
            // No explicit combinator token intervened: this is an
            // implicit descendant combinator (whitespace-separated
            // compounds).
            self.seal();
            self.pending_combinator = Some(Combinator::Descendant);
        }
        self.start_compound(tag);
        Ok(())
    }

    fn explicit_combinator(&mut self, comb: Combinator) -> Result<()> {
        if !self.has_current {
            return Err(Error::UnsupportedSelector("combinator with no preceding compound".to_string()));
        }
        self.seal();
        self.pending_combinator = Some(comb);
        Ok(())
    }

    fn push_attribute(&mut self, attr: AttributeSelector) {
        if !self.has_current {
            // A lone `[attr]` compound is a universal selector carrying
            // that attribute (spec §9, final bullet).
            self.start_compound(None);
        }
        self.current_attrs.push(attr);
    }

    fn finish(mut self) -> Result<Selector> {
        self.seal();
        self.root.ok_or(Error::EmptySelector)
    }
}

/// Compiles a selector's component-value sequence into a [`Selector`]
/// chain, anchored on the rightmost compound.
pub fn compile_selector(primitives: &[Primitive]) -> Result<Selector> {
    let mut compiler = Compiler::new();

    for primitive in primitives {
        match primitive {
            Primitive::Token(Token::Whitespace) => {}
            Primitive::Token(Token::Ident(name)) => {
                compiler.begin_new_compound(Some(name.clone()))?;
            }
            Primitive::Token(Token::Delim('*')) => {
                compiler.begin_new_compound(None)?;
            }
            Primitive::Token(Token::Delim('>')) => {
                compiler.explicit_combinator(Combinator::Child)?;
            }
            Primitive::Token(Token::Delim('+')) => {
                compiler.explicit_combinator(Combinator::AdjacentSibling)?;
            }
            Primitive::SimpleBlock { opener: crate::component::BlockOpener::Square, body } => {
                let attr = compile_attribute(body)?;
                compiler.push_attribute(attr);
            }
            other => {
                return Err(Error::UnsupportedSelector(format!("{:?}", other)));
            }
        }
    }

    compiler.finish()
}

fn string_value(primitive: &Primitive) -> Option<String> {
    match primitive {
        Primitive::Token(Token::String(s)) => Some(s.clone()),
        Primitive::Token(Token::Ident(s)) => Some(s.clone()),
        _ => None,
    }
}

fn compile_attribute(body: &[Primitive]) -> Result<AttributeSelector> {
    let items: Vec<&Primitive> = body.iter().filter(|p| !p.is_whitespace()).collect();

    match items.as_slice() {
        [Primitive::Token(Token::Ident(name))] => Ok(AttributeSelector {
            name: name.clone(),
            value: None,
            op: AttrOp::Presence,
        }),
        [Primitive::Token(Token::Ident(name)), Primitive::Token(Token::Delim('=')), value] => {
            let value = string_value(value)
                .ok_or_else(|| Error::InvalidAttributeSelector(format!("{:?}", items)))?;
            Ok(AttributeSelector { name: name.clone(), value: Some(value), op: AttrOp::Equals })
        }
        [Primitive::Token(Token::Ident(name)), Primitive::Token(Token::Delim(op1)), Primitive::Token(Token::Delim('=')), value] => {
            let op = match op1 {
                '~' => AttrOp::Includes,
                '|' => AttrOp::DashMatch,
                '^' => AttrOp::PrefixMatch,
                '$' => AttrOp::SuffixMatch,
                '*' => AttrOp::SubstringMatch,
                _ => return Err(Error::InvalidAttributeSelector(format!("{:?}", items))),
            };
            let value = string_value(value)
                .ok_or_else(|| Error::InvalidAttributeSelector(format!("{:?}", items)))?;
            Ok(AttributeSelector { name: name.clone(), value: Some(value), op })
        }
        _ => Err(Error::InvalidAttributeSelector(format!("{:?}", items))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::consume_component_values;
    use crate::preprocess::preprocess;
    use crate::tokenizer::Tokenizer;

    fn compile(src: &str) -> Result<Selector> {
        let chars = preprocess(src);
        let tokens: Vec<Token> = Tokenizer::new(&chars, false).collect();
        let mut pos = 0;
        let primitives = consume_component_values(&tokens, &mut pos);
        compile_selector(&primitives)
    }

    #[test]
    fn descendant_combinator() {
        let sel = compile("h1 em").unwrap();
        assert_eq!(sel.compound.tag.as_deref(), Some("em"));
        match &sel.link {
            Some((Combinator::Descendant, anc)) => {
                assert_eq!(anc.compound.tag.as_deref(), Some("h1"));
            }
            other => panic!("expected descendant link, got {:?}", other),
        }
    }

    #[test]
    fn child_combinator() {
        let sel = compile("span > em").unwrap();
        assert!(matches!(sel.link, Some((Combinator::Child, _))));
    }

    #[test]
    fn universal_descendant() {
        let sel = compile("div * p").unwrap();
        assert_eq!(sel.compound.tag.as_deref(), Some("p"));
        match &sel.link {
            Some((Combinator::Descendant, star)) => {
                assert!(star.compound.tag.is_none());
                match &star.link {
                    Some((Combinator::Descendant, div)) => {
                        assert_eq!(div.compound.tag.as_deref(), Some("div"));
                    }
                    other => panic!("expected descendant link, got {:?}", other),
                }
            }
            other => panic!("expected descendant link, got {:?}", other),
        }
    }

    #[test]
    fn adjacent_sibling_combinator() {
        let sel = compile("math + p").unwrap();
        assert!(matches!(sel.link, Some((Combinator::AdjacentSibling, _))));
    }

    #[test]
    fn dash_match_attribute() {
        let sel = compile("a[hreflang|='en']").unwrap();
        assert_eq!(sel.compound.attrs.len(), 1);
        let attr = &sel.compound.attrs[0];
        assert_eq!(attr.name, "hreflang");
        assert_eq!(attr.op, AttrOp::DashMatch);
        assert_eq!(attr.value.as_deref(), Some("en"));
    }

    #[test]
    fn equals_attribute() {
        let sel = compile("a[hreflang='en']").unwrap();
        assert_eq!(sel.compound.attrs[0].op, AttrOp::Equals);
    }

    #[test]
    fn lone_attribute_is_universal_compound() {
        let sel = compile("[disabled]").unwrap();
        assert!(sel.compound.tag.is_none());
        assert_eq!(sel.compound.attrs[0].name, "disabled");
        assert_eq!(sel.compound.attrs[0].op, AttrOp::Presence);
    }

    #[test]
    fn empty_selector_errors() {
        assert!(matches!(compile(""), Err(Error::EmptySelector)));
    }
}
