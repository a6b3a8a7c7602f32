//! Variable store port

use std::collections::HashMap;

use parking_lot::RwLock;
use tessera_domain::{Value, Variables};

/// Port for looking up variables by name.
///
/// Lookup by a bare name returns the innermost scope's value. Absence is
/// reported as `None`, never as an error.
pub trait VariableStore: Send + Sync {
    /// Returns the value stored under `name`, if any.
    fn get(&self, name: &str) -> Option<Value>;
}

impl VariableStore for Variables {
    fn get(&self, name: &str) -> Option<Value> {
        self.get_variable(name)
    }
}

impl VariableStore for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        Self::get(self, name).filter(|v| !v.is_null()).cloned()
    }
}

/// Shared mutable stores are read under a read lock for the duration of a single lookup.
impl<T: VariableStore> VariableStore for RwLock<T> {
    fn get(&self, name: &str) -> Option<Value> {
        self.read().get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hash_map_store() {
        let mut store = HashMap::new();
        store.insert("name".to_string(), Value::from("Vividus"));
        store.insert("nothing".to_string(), Value::Null);

        assert_eq!(VariableStore::get(&store, "name"), Some(Value::from("Vividus")));
        assert_eq!(VariableStore::get(&store, "nothing"), None);
        assert_eq!(VariableStore::get(&store, "missing"), None);
    }

    #[test]
    fn test_locked_variables_store() {
        let store = RwLock::new(Variables::default());
        assert_eq!(store.get("key:fallback"), Some(Value::from("fallback")));

        store.write().put_story_variable("key", "value");
        assert_eq!(store.get("key"), Some(Value::from("value")));
    }
}
