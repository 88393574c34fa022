//! The finder, spec §4.H: yields every matching node in a subtree, lazily,
//! in document order.

use super::matcher::selects;
use super::node::Element;
use super::Selector;

/// A lazy depth-first iterator over the nodes in `root`'s subtree (`root`
/// included) that `selector` matches, in document order.
pub struct Find<'s, E: Element> {
    selector: &'s Selector,
    stack: Vec<E>,
}

impl<'s, E: Element> Find<'s, E> {
    fn new(selector: &'s Selector, root: E) -> Self {
        Find { selector, stack: vec![root] }
    }
}

impl<'s, E: Element> Iterator for Find<'s, E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        while let Some(node) = self.stack.pop() {
            let mut children: Vec<E> = node.children().collect();
            children.reverse();
            self.stack.extend(children);
            if selects(self.selector, &node) {
                return Some(node);
            }
        }
        None
    }
}

/// Yields every node in `root`'s subtree that `selector` matches, in
/// document order, `root` included.
pub fn find<E: Element>(selector: &Selector, root: E) -> Find<'_, E> {
    Find::new(selector, root)
}
