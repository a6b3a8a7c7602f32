//! Tessera Domain - Core resolution types
//!
//! This crate defines the data model shared by the resolution engine:
//! runtime values, tables, target type descriptors, the layered variable
//! store and the resolver settings.
//! All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod settings;
pub mod table;
pub mod types;
pub mod value;

pub use environment::{ResolvedVariable, VariableKey, VariableMap, VariableScope, Variables};
pub use error::{DomainError, DomainResult};
pub use settings::ResolverSettings;
pub use table::Table;
pub use types::TypeDescriptor;
pub use value::{Value, ValueMap};
