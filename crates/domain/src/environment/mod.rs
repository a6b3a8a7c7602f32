//! Variable store domain types

mod key;
mod resolution;
mod variable;

pub use key::VariableKey;
pub use resolution::Variables;
pub use variable::{ResolvedVariable, VariableMap, VariableScope};
