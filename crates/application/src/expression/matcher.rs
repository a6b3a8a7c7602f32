//! Span matchers for `#{...}` expressions
//!
//! An expression span is `#{` followed by content and a closing `}`. The
//! content never contains `#{` or `${`, so the innermost expressions of a
//! nested input are matched first.

use std::ops::Range;

const OPEN: &str = "#{";
const NESTED_OPENERS: [&str; 2] = ["#{", "${"];

/// A matched `#{...}` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionMatch {
    /// Byte range of the whole span, including `#{` and `}`.
    pub span: Range<usize>,

    /// Byte range of the content between `#{` and `}`.
    pub content: Range<usize>,
}

impl ExpressionMatch {
    /// Returns the content text of this match within `input`.
    #[must_use]
    pub fn content_in<'a>(&self, input: &'a str) -> &'a str {
        &input[self.content.clone()]
    }

    /// Returns the whole span text of this match within `input`.
    #[must_use]
    pub fn span_in<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }

    /// Returns true if the match spans the whole of `input`.
    #[must_use]
    pub const fn covers(&self, input: &str) -> bool {
        self.span.start == 0 && self.span.end == input.len()
    }
}

/// How a span's closing brace is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Shortest content ending in `)` followed by `}`.
    Reluctant,
    /// Longest content ending in `)` followed by `}`.
    Greedy,
}

impl MatchStrategy {
    /// Finds the first span at or after byte offset `from` with this strategy.
    #[must_use]
    pub fn find(self, input: &str, from: usize) -> Option<ExpressionMatch> {
        match self {
            Self::Reluctant => find_reluctant(input, from),
            Self::Greedy => find_greedy(input, from),
        }
    }
}

/// Finds the first span at or after `from`, preferring the shortest content
/// that ends in `)` immediately followed by `}`.
///
/// Falls back to the content up to the first `}` when no such content exists.
///
/// # Examples
///
/// ```
/// use tessera_application::expression::matcher::find_reluctant;
///
/// let input = "#{target(})}";
/// let found = find_reluctant(input, 0).unwrap();
/// assert_eq!(found.content_in(input), "target(})");
/// ```
#[must_use]
pub fn find_reluctant(input: &str, from: usize) -> Option<ExpressionMatch> {
    find_with(input, from, |closers| closers.first().copied())
}

/// Finds the first span at or after `from`, preferring the longest content
/// that ends in `)` immediately followed by `}`.
///
/// Falls back to the content up to the first `}` when no such content exists.
#[must_use]
pub fn find_greedy(input: &str, from: usize) -> Option<ExpressionMatch> {
    find_with(input, from, |closers| closers.last().copied())
}

/// Scans for `#{` openers and picks a closing brace for each.
///
/// `pick` chooses among the offsets of `)}` pairs within the allowed region.
fn find_with(
    input: &str,
    from: usize,
    pick: impl Fn(&[usize]) -> Option<usize>,
) -> Option<ExpressionMatch> {
    let mut search = from;

    while let Some(offset) = input.get(search..)?.find(OPEN) {
        let start = search + offset;
        let content_start = start + OPEN.len();
        let region = allowed_region(&input[content_start..]);
        let bytes = region.as_bytes();

        // Offsets of `}` directly preceded by `)`
        let call_closers: Vec<usize> = bytes
            .iter()
            .enumerate()
            .filter(|&(i, &b)| b == b'}' && i > 0 && bytes[i - 1] == b')')
            .map(|(i, _)| i)
            .collect();

        let close = pick(&call_closers).or_else(|| region.find('}'));
        if let Some(close) = close {
            let content_end = content_start + close;
            return Some(ExpressionMatch {
                span: start..content_end + 1,
                content: content_start..content_end,
            });
        }

        search = content_start;
    }

    None
}

/// Returns the prefix of `text` that precedes any nested opener.
fn allowed_region(text: &str) -> &str {
    let end = NESTED_OPENERS
        .iter()
        .filter_map(|opener| text.find(opener))
        .min()
        .unwrap_or(text.len());
    &text[..end]
}
