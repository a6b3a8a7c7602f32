//! Variable resolution module
//!
//! Provides parsing and resolution of `${variable}` syntax in strings.
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use tessera_application::variable_resolver::VariableResolver;
//! use tessera_domain::Value;
//!
//! let mut store = HashMap::new();
//! store.insert("host".to_string(), Value::from("localhost"));
//! store.insert("port".to_string(), Value::Integer(8080));
//!
//! let resolver = VariableResolver::with_store(Arc::new(store));
//!
//! assert_eq!(
//!     resolver.resolve("http://${host}:${port}/api"),
//!     Value::from("http://localhost:8080/api")
//! );
//! assert_eq!(resolver.resolve("${port}"), Value::Integer(8080));
//! ```

pub mod builtins;
pub mod dynamic;
pub mod engine;
pub mod parser;

pub use builtins::{BuiltinInfo, BuiltinVariables};
pub use dynamic::{DynamicCache, DynamicVariableBridge, DynamicVariables};
pub use engine::VariableResolver;
pub use parser::{
    Placeholder, extract_placeholder_keys, find_placeholder, has_placeholders, parse_placeholders,
};
