//! Dynamic variables
//!
//! Computed variables consulted after the variable store misses.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tessera_domain::{ResolverSettings, Value};
use tracing::{debug, error};

use crate::ports::DynamicVariable;

/// Registry of named dynamic variable providers.
#[derive(Clone, Default)]
pub struct DynamicVariables {
    providers: BTreeMap<String, Arc<dyn DynamicVariable>>,
}

impl DynamicVariables {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider, replacing any provider with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        provider: impl DynamicVariable + 'static,
    ) -> &mut Self {
        self.providers.insert(name.into(), Arc::new(provider));
        self
    }

    /// Builder-style variant of [`Self::register`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, provider: impl DynamicVariable + 'static) -> Self {
        self.register(name, provider);
        self
    }

    /// Adds every provider of `other`, replacing providers with the same name.
    pub fn merge(&mut self, other: Self) -> &mut Self {
        self.providers.extend(other.providers);
        self
    }

    /// Returns the provider registered under exactly `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn DynamicVariable>> {
        self.providers.get(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for DynamicVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicVariables")
            .field("names", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Values already computed during one resolution call.
///
/// Every occurrence of a dynamic variable within one call sees the same value.
pub type DynamicCache = HashMap<String, Option<Value>>;

/// Looks up dynamic variables by name, honoring dry runs and camelCase aliases.
#[derive(Debug, Clone)]
pub struct DynamicVariableBridge {
    registry: Arc<DynamicVariables>,
    settings: ResolverSettings,
}

impl DynamicVariableBridge {
    /// Creates a bridge over the given registry.
    #[must_use]
    pub fn new(registry: DynamicVariables, settings: ResolverSettings) -> Self {
        Self {
            registry: Arc::new(registry),
            settings,
        }
    }

    /// Creates a bridge with no providers.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(DynamicVariables::new(), ResolverSettings::default())
    }

    /// Returns the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &DynamicVariables {
        &self.registry
    }

    /// Looks up a dynamic variable.
    ///
    /// The exact name wins over its kebab-case alias. A provider error is
    /// logged and treated as not found.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if self.settings.dry_run {
            debug!(name, "Dry run: dynamic variable is not evaluated");
            return None;
        }

        let provider = self.registry.get(name).or_else(|| {
            to_kebab_case(name).and_then(|alias| self.registry.get(&alias))
        })?;

        match provider.calculate_value() {
            Ok(value) => Some(value),
            Err(message) => {
                error!("Unable to resolve dynamic variable ${{{name}}}: {message}");
                None
            }
        }
    }

    /// Same as [`Self::lookup`], memoizing results in `cache`.
    pub fn lookup_cached(&self, name: &str, cache: &mut DynamicCache) -> Option<Value> {
        if let Some(cached) = cache.get(name) {
            return cached.clone();
        }
        let value = self.lookup(name);
        cache.insert(name.to_string(), value.clone());
        value
    }
}

/// Converts a camelCase name to kebab-case.
///
/// Returns `None` when the name has no uppercase letters and so no alias.
fn to_kebab_case(name: &str) -> Option<String> {
    if !name.chars().any(char::is_uppercase) {
        return None;
    }

    let mut kebab = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            if !kebab.is_empty() {
                kebab.push('-');
            }
            kebab.extend(c.to_lowercase());
        } else {
            kebab.push(c);
        }
    }
    Some(kebab)
}
