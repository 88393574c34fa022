/*!
A conforming [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/)
tokenizer and parser, together with a [CSS Selectors Level
3](https://www.w3.org/TR/css-selectors-3/) subset matcher that evaluates
compiled selectors against a caller-supplied element tree.

This is not a browser-grade CSS engine. If you need cascading,
specificity, computed values, or the full selector grammar
(pseudo-classes, `:not()`, the general-sibling combinator), use
[cssparser](https://crates.io/crates/cssparser) +
[selectors](https://crates.io/crates/selectors) instead.

## Scope

- Tokenization follows the CSS Syntax Level 3 state machine exactly,
  including escapes, every numeric form, `url(...)`, `unicode-range`,
  and comment handling.
- The rule/declaration parser builds a `Stylesheet` of at-rules and
  style rules; `media` at-rules are rule-filled, `page` is
  declaration-filled, and `!important` is recognised.
- The selector compiler and matcher support type and universal
  selectors, six attribute match operators, and the descendant (` `),
  child (`>`), and adjacent-sibling (`+`) combinators.

## Limitations

- Pseudo-classes, pseudo-elements, `:not()`, and the general-sibling
  combinator (`~`) are not part of the supported grammar; compiling a
  selector that uses them fails with [`Error::UnsupportedSelector`].
- The descendant combinator's ancestor search does not backtrack: once
  it finds the first ancestor whose compound matches, it commits to
  that node. A selector like `a b c` can fail to match even when a
  *different* ancestor bound to `b` would have succeeded. See
  `DESIGN.md` for the source of this limitation.
- No cascading, specificity, inheritance, or computed-value resolution.

## Example

```
use css3_syntax::parser::parse_stylesheet;

let sheet = parse_stylesheet("h1 { color: red; }");
assert_eq!(sheet.children.len(), 1);
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod component;
pub mod error;
pub mod parser;
pub mod selector;
pub mod tokenizer;

mod codepoint;
mod preprocess;
mod stream;

pub use error::{Error, Result, TextPos};
pub use preprocess::preprocess;
pub use tokenizer::{Token, Tokenizer};
