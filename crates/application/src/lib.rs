//! Tessera Application - Resolution engine and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the variable store, dynamic variables,
//!   expression processors, the type converter and the clock)
//! - The `${...}` placeholder resolver and dynamic variable bridge
//! - The `#{...}` expression matchers and adaptor
//! - The parameter conversion integrator
//! - Application-level error handling

pub mod conversion;
pub mod error;
pub mod expression;
pub mod ports;
pub mod variable_resolver;

pub use conversion::{ParameterConverter, PlaceholderResolver};
pub use error::{ApplicationError, ApplicationResult, ExpressionError};
pub use expression::ExpressionAdaptor;
pub use ports::{
    Clock, DynamicVariable, DynamicVariableResult, ExpressionProcessor, FixedClock, TypeConverter,
    VariableStore,
};
pub use variable_resolver::{
    BuiltinVariables, DynamicVariableBridge, DynamicVariables, VariableResolver,
};
