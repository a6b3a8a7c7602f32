//! Dynamic variable port

use tessera_domain::Value;

/// Outcome of a dynamic variable calculation: the value, or a message
/// describing why it could not be calculated.
pub type DynamicVariableResult = Result<Value, String>;

/// A named, zero-argument computed value provider.
///
/// Implementations must be free of side effects within a single resolution
/// pass.
pub trait DynamicVariable: Send + Sync {
    /// Calculates the current value.
    fn calculate_value(&self) -> DynamicVariableResult;
}

impl<F> DynamicVariable for F
where
    F: Fn() -> DynamicVariableResult + Send + Sync,
{
    fn calculate_value(&self) -> DynamicVariableResult {
        self()
    }
}
