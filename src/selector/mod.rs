//! Selector compilation, matching, and subtree search, spec §4.F–4.H.

mod compile;
mod finder;
mod matcher;
mod node;

pub use compile::compile_selector;
pub use finder::{find, Find};
pub use matcher::selects;
pub use node::Element;

/// The combinator linking a compound to the compound before it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
}

/// A type-or-universal selector plus zero or more attribute selectors,
/// matched against a single element.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[allow(missing_docs)]
pub struct ElementSelector {
    pub tag: Option<String>,
    pub attrs: Vec<AttributeSelector>,
}

/// The six attribute match operators, plus bare presence (`[name]`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum AttrOp {
    Presence,
    Equals,
    Includes,
    DashMatch,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct AttributeSelector {
    pub name: String,
    pub value: Option<String>,
    pub op: AttrOp,
}

/// A compiled selector, anchored on its rightmost compound. `link`, when
/// present, points toward the compound the combinator relates this one
/// to (an ancestor, a parent, or a preceding sibling) — never forward.
///
/// # Limitations
///
/// The [`Combinator::Descendant`] link does not backtrack: matching walks
/// strictly-ancestor elements and commits to the first one whose own
/// compound matches, without retrying an earlier candidate if that one's
/// further links then fail. A selector such as `a b c` can therefore miss
/// a valid match when an intervening `b`-shaped ancestor exists closer to
/// the element than the `b` the chain should have bound to. See
/// `DESIGN.md` for why this is preserved rather than fixed.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Selector {
    pub compound: ElementSelector,
    pub link: Option<(Combinator, Box<Selector>)>,
}

impl Selector {
    /// Yields every node in `root`'s subtree that this selector matches,
    /// in document order, `root` included. Equivalent to [`find`].
    pub fn find<E: Element>(&self, root: E) -> Find<'_, E> {
        find(self, root)
    }

    /// Whether `element` itself matches this selector. Equivalent to
    /// [`selects`].
    pub fn matches<E: Element>(&self, element: &E) -> bool {
        selects(self, element)
    }
}
