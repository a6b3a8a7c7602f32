//! Variable resolution engine
//!
//! Resolves `${variable}` references against the variable store and the
//! dynamic variables.

use std::sync::Arc;

use tessera_domain::Value;
use tracing::trace;

use super::dynamic::{DynamicCache, DynamicVariableBridge};
use super::parser::{find_placeholder, parse_placeholders};
use crate::ports::VariableStore;

/// The placeholder resolution engine.
///
/// Stateless across calls: each [`Self::resolve`] call works on its own copy
/// of the text and its own dynamic value cache.
#[derive(Clone)]
pub struct VariableResolver {
    store: Arc<dyn VariableStore>,
    dynamic: DynamicVariableBridge,
}

impl VariableResolver {
    /// Creates a resolver over the given store and dynamic variables.
    #[must_use]
    pub fn new(store: Arc<dyn VariableStore>, dynamic: DynamicVariableBridge) -> Self {
        Self { store, dynamic }
    }

    /// Creates a resolver with no dynamic variables.
    #[must_use]
    pub fn with_store(store: Arc<dyn VariableStore>) -> Self {
        Self::new(store, DynamicVariableBridge::empty())
    }

    /// Returns the dynamic variable bridge.
    #[must_use]
    pub const fn dynamic(&self) -> &DynamicVariableBridge {
        &self.dynamic
    }

    /// Resolves all placeholders in the input.
    ///
    /// If the whole input is a single placeholder, the value is returned with
    /// its native type. Otherwise the result is a string in which every known
    /// placeholder is replaced by its stringified value. Unknown placeholders
    /// are left as they are.
    #[must_use]
    pub fn resolve(&self, input: &str) -> Value {
        let mut cache = DynamicCache::new();
        self.resolve_with(input, &mut cache)
    }

    fn resolve_with(&self, input: &str, cache: &mut DynamicCache) -> Value {
        let mut text = input.to_string();
        let mut cursor = 0;

        while let Some(placeholder) = find_placeholder(&text, cursor) {
            let start = placeholder.span.start;
            let mut end = placeholder.span.end;
            let mut key = placeholder.key_in(&text).to_string();

            if key.contains("${") {
                let resolved_key = self.resolve_with(&key, cache).to_string();
                text.replace_range(placeholder.key.clone(), &resolved_key);
                end = placeholder.key.start + resolved_key.len() + 1;
                key = resolved_key;
            }

            match self.lookup(&key, cache) {
                Some(value) if start == 0 && end == text.len() => return value,
                Some(value) => {
                    let replacement = value.to_string();
                    text.replace_range(start..end, &replacement);
                    cursor = start + replacement.len();
                }
                None => {
                    trace!(key = %key, "Variable is not found");
                    cursor = end;
                }
            }
        }

        Value::String(text)
    }

    fn lookup(&self, key: &str, cache: &mut DynamicCache) -> Option<Value> {
        self.store
            .get(key)
            .or_else(|| self.dynamic.lookup_cached(key, cache))
    }

    /// Resolves a single variable by name, without scanning for placeholders.
    #[must_use]
    pub fn resolve_value(&self, name: &str) -> Option<Value> {
        self.store.get(name).or_else(|| self.dynamic.lookup(name))
    }

    /// Returns the keys of top-level placeholders that would stay unresolved.
    ///
    /// Dynamic variables are not evaluated; a registered name counts as
    /// resolvable.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        parse_placeholders(input)
            .iter()
            .map(|placeholder| placeholder.key_in(input))
            .filter(|key| !key.contains("${"))
            .filter(|key| {
                self.store.get(key).is_none() && self.dynamic.registry().get(key).is_none()
            })
            .map(str::to_string)
            .collect()
    }

    /// Extracts the keys of all top-level placeholders without resolving them.
    #[must_use]
    pub fn extract_variable_names(input: &str) -> Vec<String> {
        super::parser::extract_placeholder_keys(input)
    }
}

impl std::fmt::Debug for VariableResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableResolver")
            .field("dynamic", &self.dynamic)
            .finish_non_exhaustive()
    }
}
