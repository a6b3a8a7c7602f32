//! Variable key parsing
//!
//! A key may carry a default value after the first colon (`name:default`) and
//! may address an element of a structured value (`name[0].field`).

const DEFAULT_SEPARATOR: char = ':';

/// A parsed variable key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableKey<'a> {
    /// The key exactly as written.
    pub key: &'a str,
    /// The key without the default value part.
    pub name: &'a str,
    /// Text after the first colon, if any.
    pub default_value: Option<&'a str>,
}

impl<'a> VariableKey<'a> {
    /// Parses a key.
    #[must_use]
    pub fn parse(key: &'a str) -> Self {
        match key.split_once(DEFAULT_SEPARATOR) {
            Some((name, default_value)) => Self {
                key,
                name,
                default_value: Some(default_value),
            },
            None => Self {
                key,
                name: key,
                default_value: None,
            },
        }
    }

    /// Returns true if the key declares a default value.
    #[must_use]
    pub const fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }
}

/// One step of a compound key: the root name, an optional list index and the
/// optional remainder after a dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompoundPath<'a> {
    pub root: &'a str,
    pub index: Option<usize>,
    pub rest: Option<&'a str>,
}

impl<'a> CompoundPath<'a> {
    /// Splits `root[index].rest`; the part after a colon is ignored.
    pub(crate) fn parse(path: &'a str) -> Option<Self> {
        let path = path.split(DEFAULT_SEPARATOR).next().unwrap_or(path);
        let root_end = path.find(['[', '.']).unwrap_or(path.len());
        let root = &path[..root_end];
        if root.is_empty() {
            return None;
        }

        let mut remainder = &path[root_end..];
        let mut index = None;
        if let Some(after_bracket) = remainder.strip_prefix('[') {
            let close = after_bracket.find(']')?;
            index = Some(after_bracket[..close].parse().ok()?);
            remainder = &after_bracket[close + 1..];
        }

        let rest = remainder.strip_prefix('.').filter(|rest| !rest.is_empty());
        Some(Self { root, index, rest })
    }
}
