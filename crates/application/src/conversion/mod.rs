//! Parameter conversion
//!
//! Resolves a raw step argument into a value of its declared type:
//! placeholders and expressions first, generic type conversion after.

pub mod parameter;
pub mod placeholder;

pub use parameter::ParameterConverter;
pub use placeholder::{NULL_EXPRESSION, PlaceholderResolver};
