//! The selector matcher, spec §4.G.

use super::node::Element;
use super::{AttrOp, AttributeSelector, Combinator, ElementSelector, Selector};

fn type_matches<E: Element>(compound: &ElementSelector, element: &E) -> bool {
    match &compound.tag {
        None => true,
        Some(tag) => tag == element.local_name(),
    }
}

fn attribute_matches<E: Element>(attr: &AttributeSelector, element: &E) -> bool {
    let value = match element.attribute(&attr.name) {
        Some(v) => v,
        None => return false,
    };
    let pattern = match &attr.value {
        None => return true, // presence only
        Some(p) => p.as_str(),
    };
    match attr.op {
        AttrOp::Presence => true,
        AttrOp::Equals => value == pattern,
        AttrOp::Includes => value.split_whitespace().any(|tok| tok == pattern),
        AttrOp::DashMatch => {
            value == pattern || value.strip_prefix(pattern).map_or(false, |rest| rest.starts_with('-'))
        }
        AttrOp::PrefixMatch => value.starts_with(pattern),
        AttrOp::SuffixMatch => value.ends_with(pattern),
        AttrOp::SubstringMatch => value.contains(pattern),
    }
}

fn compound_matches<E: Element>(compound: &ElementSelector, element: &E) -> bool {
    type_matches(compound, element) && compound.attrs.iter().all(|a| attribute_matches(a, element))
}

/// `true` iff `element` is matched by `selector`.
pub fn selects<E: Element>(selector: &Selector, element: &E) -> bool {
    compound_matches(&selector.compound, element) && link_matches(selector, element)
}

fn link_matches<E: Element>(selector: &Selector, element: &E) -> bool {
    match &selector.link {
        None => true,
        Some((Combinator::Descendant, ancestor_selector)) => {
            find_first_ancestor_match(ancestor_selector, element)
        }
        Some((Combinator::Child, parent_selector)) => match element.parent_element() {
            Some(parent) => compound_matches(&parent_selector.compound, &parent),
            None => false,
        },
        Some((Combinator::AdjacentSibling, prev_selector)) => {
            match element.previous_sibling_element() {
                Some(prev) => compound_matches(&prev_selector.compound, &prev),
                None => false,
            }
        }
    }
}

/// Walks strictly up the ancestor chain for the first node whose compound
/// matches `ancestor_selector`, then checks that node's own links.
///
/// This does not backtrack: once a compound match is found, its deeper
/// links either hold or the whole descendant test fails — an ancestor
/// further up that might also satisfy the compound is never tried. This
/// mirrors a known limitation of the selector model this matcher is
/// built from (see `DESIGN.md`).
fn find_first_ancestor_match<E: Element>(ancestor_selector: &Selector, element: &E) -> bool {
    let mut cur = element.parent_element();
    while let Some(node) = cur {
        if compound_matches(&ancestor_selector.compound, &node) {
            return link_matches(ancestor_selector, &node);
        }
        cur = node.parent_element();
    }
    false
}
