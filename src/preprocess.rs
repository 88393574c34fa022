//! Input preprocessing, CSS Syntax Level 3 §3.3.
//!
//! Normalises raw input into the stream of Unicode scalar values the
//! tokenizer actually runs over: CR, CRLF, and FF all become LF; NUL and
//! any surrogate (unreachable through a well-formed `&str`, but kept here
//! for parity with the spec) become U+FFFD.

/// Preprocesses `input` into a flat `Vec<char>` ready for tokenization.
pub fn preprocess(input: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\u{000C}' => out.push('\n'),
            '\u{0000}' => out.push('\u{FFFD}'),
            c if ('\u{D800}'..='\u{DFFF}').contains(&c) => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_crlf_cr_ff() {
        assert_eq!(preprocess("a\r\nb\rc\u{000C}d"), vec!['a', '\n', 'b', '\n', 'c', '\n', 'd']);
    }

    #[test]
    fn replaces_nul() {
        assert_eq!(preprocess("a\u{0}b"), vec!['a', '\u{FFFD}', 'b']);
    }
}
