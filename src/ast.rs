//! The parser's output data model, spec §3 "Parser AST".

use crate::component::Primitive;

/// A parsed stylesheet: an ordered sequence of at-rules and style rules.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Stylesheet {
    pub children: Vec<RuleOrAtRule>,
}

/// A top-level or nested child of a stylesheet/at-rule body.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum RuleOrAtRule {
    AtRule(AtRule),
    StyleRule(StyleRule),
}

/// `AtRule { name, prelude, block }`. `block` is empty (and `has_block` is
/// `false`) for at-rules terminated by `;` rather than a `{}` body.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct AtRule {
    pub name: String,
    pub prelude: Vec<Primitive>,
    pub block: Vec<AtRuleBodyItem>,
    pub has_block: bool,
}

/// The content mode an [`AtRule`]'s block is parsed in, selected by name.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AtRuleBodyMode {
    /// `media`: a nested sequence of style/at-rules.
    RuleFilled,
    /// `page`: a flat sequence of declarations.
    DeclarationFilled,
}

impl AtRuleBodyMode {
    /// Unknown at-rules are carried forward opaquely as rule-filled,
    /// per the recommendation recorded in `DESIGN.md`.
    pub fn for_name(name: &str) -> AtRuleBodyMode {
        match name {
            "page" => AtRuleBodyMode::DeclarationFilled,
            _ => AtRuleBodyMode::RuleFilled,
        }
    }
}

/// An item inside an at-rule's block; which variants actually occur
/// depends on the at-rule's [`AtRuleBodyMode`].
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum AtRuleBodyItem {
    AtRule(AtRule),
    StyleRule(StyleRule),
    Declaration(Declaration),
}

/// `StyleRule { selector, declarations }`.
#[derive(Clone, PartialEq, Debug, Default)]
#[allow(missing_docs)]
pub struct StyleRule {
    pub selector: Vec<Primitive>,
    pub declarations: Vec<Declaration>,
}

/// `Declaration { name, value, important }`.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Declaration {
    pub name: String,
    pub value: Vec<Primitive>,
    pub important: bool,
}
