//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the resolution engine and its collaborators.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer
//! or by the embedding step-execution engine.

mod clock;
mod dynamic_variable;
mod expression_processor;
mod type_converter;
mod variable_store;

pub use clock::{Clock, FixedClock};
pub use dynamic_variable::{DynamicVariable, DynamicVariableResult};
pub use expression_processor::ExpressionProcessor;
pub use type_converter::TypeConverter;
pub use variable_store::VariableStore;
