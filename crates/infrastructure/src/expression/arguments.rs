//! Function call parsing for expression processors
//!
//! An expression such as `substringBefore(a\,b, """,""")` is split into the
//! function name and its argument text, and the argument text into
//! individual arguments:
//! - a comma separates arguments
//! - `\,` is a literal comma
//! - `"""..."""` quotes an argument verbatim, commas and escapes included
//! - unquoted arguments are trimmed

const TRIPLE_QUOTE: &str = "\"\"\"";
const ESCAPED_COMMA: &str = "\\,";

/// A parsed `name(arguments)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionCall<'a> {
    /// The function name as written.
    pub name: &'a str,
    /// The raw text between the outer parentheses.
    pub arguments: &'a str,
}

/// Parses an expression of the form `name(arguments)`.
///
/// Returns `None` if the expression is not a function call.
#[must_use]
pub fn parse_function_call(expression: &str) -> Option<FunctionCall<'_>> {
    let paren_pos = expression.find('(')?;
    let name = &expression[..paren_pos];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let arguments = expression[paren_pos + 1..].strip_suffix(')')?;
    Some(FunctionCall { name, arguments })
}

/// Splits argument text into individual arguments.
///
/// Empty text yields a single empty argument.
#[must_use]
pub fn split_arguments(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut verbatim: Option<String> = None;
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix(TRIPLE_QUOTE)
            && let Some(end) = after.find(TRIPLE_QUOTE)
        {
            verbatim = Some(after[..end].to_string());
            rest = &after[end + TRIPLE_QUOTE.len()..];
            continue;
        }
        if let Some(after) = rest.strip_prefix(ESCAPED_COMMA) {
            current.push(',');
            rest = after;
            continue;
        }

        rest = &rest[ch.len_utf8()..];
        if ch == ',' {
            args.push(finish_argument(&mut current, &mut verbatim));
        } else {
            current.push(ch);
        }
    }

    args.push(finish_argument(&mut current, &mut verbatim));
    args
}

fn finish_argument(current: &mut String, verbatim: &mut Option<String>) -> String {
    let arg = verbatim
        .take()
        .unwrap_or_else(|| current.trim().to_string());
    current.clear();
    arg
}
