//! Generic type converter port

use tessera_domain::{DomainResult, TypeDescriptor, Value};

/// Port for parsing text into a value of a declared type.
pub trait TypeConverter: Send + Sync {
    /// Converts `value` into `target`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the text cannot be parsed into the target type.
    fn convert(&self, value: &str, target: &TypeDescriptor) -> DomainResult<Value>;
}
