//! The host-tree interface the matcher and finder require, spec §6
//! "Selector surface".

/// A node in the caller's document tree.
///
/// Implemented against whatever DOM-like structure the host provides
/// (see `tests/selectors.rs` for a `roxmltree::Node` adapter). Text
/// nodes, which expose no attributes and no meaningful local name,
/// simply never match an `ElementSelector` with a non-empty `attrs`
/// list or a `Some` tag other than their own.
pub trait Element: Copy {
    /// The iterator [`Element::children`] returns.
    type Children: Iterator<Item = Self>;

    /// The node's local (unprefixed) element name.
    fn local_name(&self) -> &str;

    /// The value of attribute `name`, or `None` if absent (including on
    /// non-element nodes).
    fn attribute(&self, name: &str) -> Option<&str>;

    /// The node's parent, or `None` at the document root.
    fn parent_element(&self) -> Option<Self>;

    /// The nearest preceding sibling that is itself an element (text and
    /// comment siblings are skipped), or `None` if there is none.
    fn previous_sibling_element(&self) -> Option<Self>;

    /// The node's children, in document order.
    fn children(&self) -> Self::Children;
}
