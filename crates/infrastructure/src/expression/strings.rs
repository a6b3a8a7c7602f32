//! String manipulation functions

use rand::seq::IndexedRandom;
use tessera_domain::Value;

use super::function::FunctionExpressionProcessor;

/// Creates a processor with the string functions:
/// `trim`, `toLowerCase`, `toUpperCase`, `capitalizeFirstWord`,
/// `capitalizeWords`, `capitalizeWordsFully`, `uncapitalizeFirstWord`,
/// `uncapitalizeWords`, `escapeHTML`, `escapeJSON`, `quoteRegExp`, `anyOf`,
/// `substringBefore` and `substringAfter`.
#[must_use]
pub fn string_functions() -> FunctionExpressionProcessor {
    FunctionExpressionProcessor::new()
        .unary("trim", |arg| Ok(Value::from(arg.trim())))
        .unary("toLowerCase", |arg| Ok(Value::from(arg.to_lowercase())))
        .unary("toUpperCase", |arg| Ok(Value::from(arg.to_uppercase())))
        .unary("capitalizeFirstWord", |arg| Ok(Value::from(capitalize(arg))))
        .unary("capitalizeWords", |arg| {
            Ok(Value::from(map_words(arg, capitalize)))
        })
        .unary("capitalizeWordsFully", |arg| {
            Ok(Value::from(map_words(&arg.to_lowercase(), capitalize)))
        })
        .unary("uncapitalizeFirstWord", |arg| Ok(Value::from(uncapitalize(arg))))
        .unary("uncapitalizeWords", |arg| {
            Ok(Value::from(map_words(arg, uncapitalize)))
        })
        .unary("escapeHTML", |arg| Ok(Value::from(escape_html(arg))))
        .unary("escapeJSON", |arg| Ok(Value::from(escape_json(arg))))
        .unary("quoteRegExp", |arg| Ok(Value::from(regex::escape(arg))))
        .variadic("anyOf", |args| {
            Ok(Value::from(
                args.choose(&mut rand::rng()).cloned().unwrap_or_default(),
            ))
        })
        .exactly("substringBefore", 2, |args| {
            let (text, separator) = (&args[0], &args[1]);
            Ok(Value::from(
                text.find(separator.as_str()).map_or(text.as_str(), |pos| &text[..pos]),
            ))
        })
        .exactly("substringAfter", 2, |args| {
            let (text, separator) = (&args[0], &args[1]);
            Ok(Value::from(
                text.find(separator.as_str())
                    .map_or("", |pos| &text[pos + separator.len()..]),
            ))
        })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn uncapitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Applies `f` to every whitespace-delimited word, keeping the whitespace.
fn map_words(text: &str, f: fn(&str) -> String) -> String {
    let mut result = String::with_capacity(text.len());
    let mut word_start = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = word_start.take() {
                result.push_str(&f(&text[start..i]));
            }
            result.push(c);
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        result.push_str(&f(&text[start..]));
    }

    result
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_json(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
