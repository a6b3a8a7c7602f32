//! Placeholder scanner for `${variable}` syntax
//!
//! Finds balanced placeholder spans, tracking nested `${` so that
//! `${outer${inner}}` is one span whose key contains another placeholder.

use std::ops::Range;

const OPEN: &str = "${";
const CLOSE: u8 = b'}';

/// A balanced `${...}` span in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range of the whole placeholder, including `${` and `}`.
    pub span: Range<usize>,

    /// Byte range of the key between `${` and the matching `}`.
    pub key: Range<usize>,
}

impl Placeholder {
    /// Returns the key text of this placeholder within `input`.
    #[must_use]
    pub fn key_in<'a>(&self, input: &'a str) -> &'a str {
        &input[self.key.clone()]
    }

    /// Returns true if the placeholder spans the whole of `input`.
    #[must_use]
    pub const fn covers(&self, input: &str) -> bool {
        self.span.start == 0 && self.span.end == input.len()
    }
}

/// Finds the first balanced placeholder starting at or after byte offset `from`.
///
/// A `}` seen before any `${` is plain text. A `${` whose nesting never returns
/// to zero is plain text as well; the scan then retries from the next `${`.
///
/// `from` must lie on a char boundary.
///
/// # Examples
///
/// ```
/// use tessera_application::variable_resolver::parser::find_placeholder;
///
/// let input = "a-${outer${inner}}-b";
/// let placeholder = find_placeholder(input, 0).unwrap();
/// assert_eq!(&input[placeholder.span.clone()], "${outer${inner}}");
/// assert_eq!(placeholder.key_in(input), "outer${inner}");
/// ```
#[must_use]
pub fn find_placeholder(input: &str, from: usize) -> Option<Placeholder> {
    let bytes = input.as_bytes();
    let mut search = from;

    while let Some(offset) = input.get(search..)?.find(OPEN) {
        let start = search + offset;
        let mut depth = 0usize;
        let mut i = start;

        while i < bytes.len() {
            if bytes[i..].starts_with(OPEN.as_bytes()) {
                depth += 1;
                i += OPEN.len();
                continue;
            }
            if bytes[i] == CLOSE {
                depth -= 1;
                if depth == 0 {
                    return Some(Placeholder {
                        span: start..i + 1,
                        key: start + OPEN.len()..i,
                    });
                }
            }
            i += 1;
        }

        // Unbalanced: this `${` is plain text
        search = start + OPEN.len();
    }

    None
}

/// Returns all top-level placeholders in order of appearance.
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut cursor = 0;

    while let Some(placeholder) = find_placeholder(input, cursor) {
        cursor = placeholder.span.end;
        placeholders.push(placeholder);
    }

    placeholders
}

/// Returns true if the input contains at least one balanced placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    find_placeholder(input, 0).is_some()
}

/// Extracts the raw keys of all top-level placeholders.
#[must_use]
pub fn extract_placeholder_keys(input: &str) -> Vec<String> {
    parse_placeholders(input)
        .iter()
        .map(|p| p.key_in(input).to_string())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_simple_placeholder() {
        let placeholder = find_placeholder("${name}", 0).unwrap();
        assert_eq!(placeholder.span, 0..7);
        assert_eq!(placeholder.key, 2..6);
        assert!(placeholder.covers("${name}"));
    }

    #[test]
    fn test_find_placeholder_in_text() {
        let input = "Hello ${name}, welcome!";
        let placeholder = find_placeholder(input, 0).unwrap();
        assert_eq!(&input[placeholder.span.clone()], "${name}");
        assert!(!placeholder.covers(input));
    }

    #[test]
    fn test_nested_placeholder_is_one_span() {
        let input = "${var${part}}";
        let placeholder = find_placeholder(input, 0).unwrap();
        assert_eq!(placeholder.span, 0..input.len());
        assert_eq!(placeholder.key_in(input), "var${part}");
    }

    #[test]
    fn test_closing_brace_before_open_is_text() {
        let input = "#{exp(\\}{ID=, ${var})}";
        let placeholder = find_placeholder(input, 0).unwrap();
        assert_eq!(placeholder.key_in(input), "var");
    }

    #[test]
    fn test_no_placeholders() {
        for input in ["varvar", "$", "{}", "$}{", "#{expr}", "{{name}}"] {
            assert!(find_placeholder(input, 0).is_none(), "input: {input}");
        }
    }

    #[test]
    fn test_empty_placeholder_is_found() {
        let placeholder = find_placeholder("${}", 0).unwrap();
        assert_eq!(placeholder.key_in("${}"), "");
    }

    #[test]
    fn test_unbalanced_open_is_skipped() {
        let input = "${a ${b}";
        let placeholder = find_placeholder(input, 0).unwrap();
        assert_eq!(placeholder.key_in(input), "b");
        assert!(find_placeholder("${unclosed", 0).is_none());
    }

    #[test]
    fn test_search_from_offset() {
        let input = "${a}${b}";
        let placeholder = find_placeholder(input, 4).unwrap();
        assert_eq!(placeholder.key_in(input), "b");
        assert!(find_placeholder(input, input.len()).is_none());
    }

    #[test]
    fn test_multibyte_text() {
        let input = "Ключ ${имя} 🦀";
        let placeholder = find_placeholder(input, 0).unwrap();
        assert_eq!(placeholder.key_in(input), "имя");
    }

    #[test]
    fn test_parse_placeholders() {
        let keys = extract_placeholder_keys("${a} and ${b${c}} and ${");
        assert_eq!(keys, vec!["a", "b${c}"]);
    }

    #[test]
    fn test_has_placeholders() {
        assert!(has_placeholders("x ${y}"));
        assert!(!has_placeholders("x ${y"));
        assert!(!has_placeholders("x y}"));
    }
}
